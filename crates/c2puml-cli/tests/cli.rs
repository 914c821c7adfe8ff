//! Integration tests for top-level CLI behavior.

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_c2puml(args: &[&str], cwd: &Path) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_c2puml");
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run c2puml binary")
}

#[test]
fn generate_without_model_exits_with_readable_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_c2puml(&["--output-dir", "out", "generate"], dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("No model file found for generation"));
}

#[test]
fn transform_with_missing_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_c2puml(&["--config", "missing.json", "transform"], dir.path());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Configuration file not found"));
    assert!(stderr.contains("missing.json"));
}

#[test]
fn parse_with_explicit_root_needs_no_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/main.c"), "int main(void) { return 0; }\n").unwrap();

    let output = run_c2puml(&["--output-dir", "out", "parse", "src"], dir.path());

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("out/model.json").exists());
}

#[test]
fn full_pipeline_writes_diagram_per_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(
        src.join("main.c"),
        "#include \"utils.h\"\n\nint main(void) {\n    return 0;\n}\n",
    )
    .unwrap();
    fs::write(src.join("utils.h"), "struct Point { int x; int y; };\n").unwrap();

    fs::write(
        dir.path().join("config.json"),
        format!(
            r#"{{"project_name": "demo", "source_roots": ["{}"], "include_depth": 1}}"#,
            src.display()
        ),
    )
    .unwrap();

    let output = run_c2puml(&["--output-dir", "out"], dir.path());
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert!(dir.path().join("out/model.json").exists());
    assert!(dir.path().join("out/model_transformed.json").exists());

    let diagram = fs::read_to_string(dir.path().join("out/main.puml")).unwrap();
    assert!(diagram.contains("@startuml main"));
    assert!(diagram.contains("HEADER_UTILS"));
    assert!(diagram.contains("MAIN --> HEADER_UTILS : <<include>>"));
    // Headers get no diagram of their own
    assert!(!dir.path().join("out/utils.puml").exists());
}
