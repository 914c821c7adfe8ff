//! Project-level parsing: discovery, filtering and include-dependency
//! expansion.
//!
//! Discovery enumerates candidate files under one or more roots. With an
//! include depth of zero every candidate passing the file filters is parsed
//! as-is; with a positive depth the `.c`-family entry files seed a worklist,
//! and each parsed file's resolvable includes are scheduled one hop deeper
//! until the configured bound. System includes are recorded by name but
//! never expanded.

use crate::error::{ParserError, ParserResult};
use crate::parser_impl::CParser;
use crate::resolve::IncludeResolver;
use c2puml::model::{FileModel, ProjectModel};
use c2puml::transform::{compile_patterns, should_keep};
use c2puml::Config;
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Directories never descended into, beyond dot-prefixed entries.
const NOISE_DIRS: &[&str] = &["CMakeFiles", "node_modules", "__pycache__"];

/// Options controlling one project parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Project display name for the model
    pub project_name: String,

    /// Whether discovery descends into subdirectories
    pub recursive: bool,

    /// Include hops to follow when expanding the parse set (0 = parse every
    /// discovered candidate, follow nothing)
    pub include_depth: u32,

    /// Regex patterns candidate paths must match (any of), when non-empty
    pub file_include: Vec<String>,

    /// Regex patterns that exclude candidate paths
    pub file_exclude: Vec<String>,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            project_name: "C_Project".to_string(),
            recursive: true,
            include_depth: 1,
            file_include: Vec::new(),
            file_exclude: Vec::new(),
        }
    }
}

impl ProjectOptions {
    /// Derive parse options from the pipeline configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            project_name: config.project_name.clone(),
            recursive: config.recursive,
            include_depth: config.include_depth,
            file_include: config.file_filters.include.clone(),
            file_exclude: config.file_filters.exclude.clone(),
        }
    }
}

/// Counters collected during one project parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Files taken off the worklist
    pub files_attempted: usize,

    /// Files parsed into the model
    pub files_succeeded: usize,

    /// Files skipped after a read/parse failure
    pub files_failed: usize,

    /// Headers scheduled through include expansion
    pub headers_expanded: usize,

    /// Distinct include names that resolved to nothing under the roots
    pub failed_include_lookups: usize,
}

/// Walks project roots and orchestrates [`CParser`] across the parse set.
#[derive(Debug, Default)]
pub struct ProjectParser {
    parser: CParser,
    options: ProjectOptions,
}

impl ProjectParser {
    pub fn new(options: ProjectOptions) -> Self {
        Self {
            parser: CParser::new(),
            options,
        }
    }

    /// Parse a project from the given roots.
    pub fn parse_project(&self, roots: &[PathBuf]) -> ParserResult<ProjectModel> {
        self.parse_project_with_stats(roots).map(|(model, _)| model)
    }

    /// Parse a project, also returning the run's counters.
    pub fn parse_project_with_stats(
        &self,
        roots: &[PathBuf],
    ) -> ParserResult<(ProjectModel, ParseStats)> {
        let existing: Vec<PathBuf> = roots.iter().filter(|r| r.is_dir()).cloned().collect();
        for root in roots {
            if !root.is_dir() {
                warn!("Project root does not exist: {}", root.display());
            }
        }
        let Some(primary) = existing.first().cloned() else {
            return Err(ParserError::RootNotFound(
                roots.first().cloned().unwrap_or_else(|| PathBuf::from(".")),
            ));
        };

        info!(
            "Parsing project '{}' from {} root(s)",
            self.options.project_name,
            existing.len()
        );

        let include = compile_patterns(&self.options.file_include);
        let exclude = compile_patterns(&self.options.file_exclude);

        // The miss cache lives exactly as long as this run
        let mut resolver = IncludeResolver::new();
        let mut stats = ParseStats::default();
        let mut model = ProjectModel::new(
            &self.options.project_name,
            primary.to_string_lossy().into_owned(),
        );

        let mut queue: VecDeque<(PathBuf, PathBuf, u32)> = VecDeque::new();
        for root in &existing {
            for candidate in self.discover_files(root) {
                let is_entry = if self.options.include_depth > 0 {
                    self.parser.is_source_path(&candidate)
                } else {
                    true
                };
                if is_entry && passes_filters(&candidate, root, &include, &exclude) {
                    queue.push_back((candidate, root.clone(), 0));
                }
            }
        }

        let mut visited: HashSet<PathBuf> = HashSet::new();
        while let Some((path, root, depth)) = queue.pop_front() {
            let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());
            if !visited.insert(canonical) {
                continue;
            }

            stats.files_attempted += 1;
            let file_model = match self.parser.parse_file(&path, &root) {
                Ok(model) => model,
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    stats.files_failed += 1;
                    continue;
                }
            };
            stats.files_succeeded += 1;

            if depth < self.options.include_depth {
                for include_name in &file_model.includes {
                    let Some(resolved) = resolver.resolve(include_name, path.parent(), &root)
                    else {
                        continue;
                    };
                    if passes_filters(&resolved, &root, &include, &exclude) {
                        stats.headers_expanded += 1;
                        queue.push_back((resolved, root.clone(), depth + 1));
                    }
                }
            }

            insert_file(&mut model, file_model);
        }

        stats.failed_include_lookups = resolver.miss_count();
        let summary = model.summary();
        info!(
            "Parse complete: {} files, {} structs, {} enums, {} functions ({} failed)",
            summary.files, summary.structs, summary.enums, summary.functions, stats.files_failed
        );
        Ok((model, stats))
    }

    /// Candidate files under one root, in a deterministic order.
    fn discover_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        collect_files(root, self.options.recursive, &self.parser, &mut files);
        files.sort();
        files
    }
}

fn collect_files(dir: &Path, recursive: bool, parser: &CParser, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read directory {}: {e}", dir.display());
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.starts_with('.') || NOISE_DIRS.contains(&name.as_str()) {
            continue;
        }
        if path.is_dir() {
            if recursive {
                collect_files(&path, recursive, parser, out);
            }
        } else if parser.can_parse(&path) {
            out.push(path);
        }
    }
}

fn passes_filters(path: &Path, root: &Path, include: &[Regex], exclude: &[Regex]) -> bool {
    let relative = path
        .strip_prefix(root)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
    should_keep(&relative, include, exclude)
}

/// Insert a parsed file under its basename; on a basename collision the
/// newcomer gets a deterministic path-hash suffix so both files stay
/// addressable.
fn insert_file(model: &mut ProjectModel, file: FileModel) {
    let basename = file.basename().to_string();
    let key = if model.files.contains_key(&basename) {
        let mut hasher = DefaultHasher::new();
        file.relative_path.hash(&mut hasher);
        let key = format!("{basename}_{:08x}", hasher.finish() as u32);
        debug!(
            "Basename collision: {} stored as {key}",
            file.relative_path
        );
        key
    } else {
        basename
    };
    model.files.insert(key, file);
}
