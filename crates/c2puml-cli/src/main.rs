//! c2puml CLI - convert C/C++ source trees into PlantUML class diagrams.
//!
//! Three-stage pipeline, each stage runnable on its own:
//! - `parse`: parse a project into `model.json`
//! - `transform`: apply the configuration, writing `model_transformed.json`
//! - `generate`: render one `.puml` per source file
//!
//! With no subcommand, all three stages run in sequence.

use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use c2puml::{export, Config, Generator, ProjectModel, Transformer};
use c2puml_c::{ProjectOptions, ProjectParser};

/// c2puml - C/C++ to PlantUML converter.
#[derive(Parser)]
#[command(name = "c2puml", version, about)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Output directory for models and diagrams
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Step 1: parse a C/C++ project and write model.json.
    Parse {
        /// Project root (overrides source_roots from the configuration)
        root: Option<PathBuf>,
    },
    /// Step 2: transform model.json based on the configuration.
    Transform,
    /// Step 3: generate PlantUML diagrams from the model.
    Generate,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Some(Commands::Parse { root }) => run_parse(cli, root.as_deref()),
        Some(Commands::Transform) => run_transform(cli),
        Some(Commands::Generate) => run_generate(cli),
        None => {
            run_parse(cli, None)?;
            run_transform(cli)?;
            run_generate(cli)
        }
    }
}

/// Step 1: parse. The project root comes from the command line when given,
/// from the configuration's `source_roots` otherwise.
fn run_parse(cli: &Cli, root: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_or_default(&cli.config, root.is_some())?;

    let roots: Vec<PathBuf> = match root {
        Some(root) => vec![root.to_path_buf()],
        None => config.source_roots.iter().map(PathBuf::from).collect(),
    };
    if roots.is_empty() {
        return Err("No project root specified (pass one to `parse` or set source_roots in the configuration)".into());
    }

    let parser = ProjectParser::new(ProjectOptions::from_config(&config));
    let model = parser.parse_project(&roots)?;

    let model_path = cli.output_dir.join(&config.model_output_path);
    model.save(&model_path)?;
    info!("Model saved to {}", model_path.display());
    Ok(())
}

/// Step 2: transform.
fn run_transform(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&cli.config)?;
    let model_path = cli.output_dir.join(&config.model_output_path);
    let output_path = cli.output_dir.join("model_transformed.json");

    Transformer::new().transform(&model_path, &cli.config, &output_path)?;
    Ok(())
}

/// Step 3: generate. Prefers the transformed model, falls back to the raw
/// one, and fails with a readable message when neither exists.
fn run_generate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let model_path = export::resolve_model_file(&cli.output_dir)?;
    let model = ProjectModel::load(&model_path)?;

    let include_depth = Config::load(&cli.config)
        .map(|c| c.include_depth)
        .unwrap_or(1);

    let written = Generator::new().generate(&model, &cli.output_dir, include_depth)?;
    info!("Generated {} diagrams in {}", written.len(), cli.output_dir.display());
    Ok(())
}

/// For `parse` with an explicit root, a missing config file is fine and the
/// defaults apply; everywhere else it is an error.
fn load_config_or_default(
    path: &Path,
    allow_missing: bool,
) -> Result<Config, Box<dyn std::error::Error>> {
    if allow_missing && !path.exists() {
        return Ok(Config::default());
    }
    Ok(Config::load(path)?)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_log::LogTracer::init();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
