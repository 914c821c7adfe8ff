//! Integration tests for the full parse → transform → generate pipeline

use c2puml::{Config, Generator, ProjectModel, Transformer};
use c2puml_c::{ProjectOptions, ProjectParser};
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn parse(root: &Path, options: ProjectOptions) -> ProjectModel {
    ProjectParser::new(options)
        .parse_project(&[root.to_path_buf()])
        .unwrap()
}

#[test]
fn test_basic_pipeline_produces_expected_diagram() {
    let project = tempfile::tempdir().unwrap();
    write(
        project.path(),
        "main.c",
        "#include \"utils.h\"\n\nint main(void) {\n    return 0;\n}\n",
    );
    write(
        project.path(),
        "utils.h",
        "struct Point { int x; int y; };\n",
    );

    let model = parse(project.path(), ProjectOptions::default());
    let config = Config::default(); // include_depth = 1
    let transformed = Transformer::new().apply(model, &config);

    let out = tempfile::tempdir().unwrap();
    Generator::new()
        .generate(&transformed, out.path(), config.include_depth)
        .unwrap();

    let diagram = fs::read_to_string(out.path().join("main.puml")).unwrap();
    assert!(diagram.contains("@startuml main"));
    assert!(diagram.contains("HEADER_UTILS"));
    assert!(diagram.contains("+ struct Point"));
    assert!(diagram.contains("MAIN --> HEADER_UTILS : <<include>>"));
    assert!(diagram.trim_end().ends_with("@enduml"));
}

#[test]
fn test_parse_is_idempotent_modulo_timestamp() {
    let project = tempfile::tempdir().unwrap();
    write(
        project.path(),
        "app.c",
        "#include \"app.h\"\nstatic int counter = 0;\nint run(void) { return counter; }\n",
    );
    write(
        project.path(),
        "app.h",
        "#define APP_VERSION 2\ntypedef unsigned int u32;\nint run(void);\n",
    );

    let first = parse(project.path(), ProjectOptions::default());
    let second = parse(project.path(), ProjectOptions::default());

    // Byte-identical apart from created_at
    let files_first = serde_json::to_string(&first.files).unwrap();
    let files_second = serde_json::to_string(&second.files).unwrap();
    assert_eq!(files_first, files_second);
    assert_eq!(first.project_name, second.project_name);
    assert_eq!(first.project_root, second.project_root);
}

#[test]
fn test_model_round_trips_through_json() {
    let project = tempfile::tempdir().unwrap();
    write(
        project.path(),
        "lib.c",
        "#include \"lib.h\"\n\
         struct State { int mode; struct { int a; int b; } limits; };\n\
         enum Level { LOW, HIGH = 10 };\n\
         union Word { int i; float f; };\n\
         typedef struct State state_t;\n\
         int lib_init(void (*on_ready)(int));\n\
         static char tag = 'x';\n",
    );
    write(project.path(), "lib.h", "#define LIB_API 1\n");

    let model = parse(project.path(), ProjectOptions::default());
    let path = project.path().join("model.json");
    model.save(&path).unwrap();
    let reloaded = ProjectModel::load(&path).unwrap();

    assert_eq!(model, reloaded);
}

#[test]
fn test_include_relations_respect_depth_bound() {
    let project = tempfile::tempdir().unwrap();
    write(project.path(), "main.c", "#include \"l1.h\"\n");
    write(project.path(), "l1.h", "#include \"l2.h\"\n");
    write(project.path(), "l2.h", "#include \"l3.h\"\n");
    write(project.path(), "l3.h", "int bottom;\n");

    let model = parse(
        project.path(),
        ProjectOptions {
            include_depth: 3,
            ..ProjectOptions::default()
        },
    );

    let config = Config {
        include_depth: 2,
        ..Config::default()
    };
    let transformed = Transformer::new().apply(model, &config);

    let relations = &transformed.files["main.c"].include_relations;
    assert!(!relations.is_empty());
    assert!(relations.iter().all(|r| r.depth <= 2));
    assert!(relations.iter().all(|r| r.source_file != r.included_file));
    assert!(!relations.iter().any(|r| r.included_file == "l3.h"));

    // The generated diagram honors the same bound
    let out = tempfile::tempdir().unwrap();
    Generator::new()
        .generate(&transformed, out.path(), config.include_depth)
        .unwrap();
    let diagram = fs::read_to_string(out.path().join("main.puml")).unwrap();
    assert!(diagram.contains("HEADER_L1"));
    assert!(diagram.contains("HEADER_L2"));
    assert!(!diagram.contains("HEADER_L3"));
}

#[test]
fn test_file_filter_scenario_excludes_header_everywhere() {
    let project = tempfile::tempdir().unwrap();
    write(
        project.path(),
        "main.c",
        "#include \"included.h\"\n#include \"excluded.h\"\n",
    );
    write(project.path(), "included.h", "int keep;\n");
    write(project.path(), "excluded.h", "int drop;\n");

    let model = parse(
        project.path(),
        ProjectOptions {
            file_exclude: vec!["excluded\\.h".to_string()],
            ..ProjectOptions::default()
        },
    );

    let mut keys: Vec<_> = model.files.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["included.h", "main.c"]);
    // The raw include name survives in the source file's include list
    assert!(model.files["main.c"]
        .includes
        .contains(&"excluded.h".to_string()));
}

#[test]
fn test_typedef_classes_flow_through_pipeline() {
    let project = tempfile::tempdir().unwrap();
    write(
        project.path(),
        "main.c",
        "#include \"types.h\"\npoint_t origin;\n",
    );
    write(
        project.path(),
        "types.h",
        "typedef struct Point { int x; int y; } point_t;\ntypedef int (*cmp_fn)(int, int);\n",
    );

    let model = parse(project.path(), ProjectOptions::default());
    let out = tempfile::tempdir().unwrap();
    Generator::new().generate(&model, out.path(), 1).unwrap();

    let diagram = fs::read_to_string(out.path().join("main.puml")).unwrap();
    assert!(diagram.contains("class \"point_t\" as TYPEDEF_POINT_T <<struct>> #LightYellow"));
    assert!(diagram.contains("class \"cmp_fn\" as TYPEDEF_CMP_FN <<function pointer>>"));
    assert!(diagram.contains("alias of int (*)(int, int)"));
    assert!(diagram.contains("HEADER_TYPES ..> TYPEDEF_POINT_T : <<declares>>"));
    assert!(diagram.contains("MAIN ..> TYPEDEF_POINT_T : <<uses>>"));
}

#[test]
fn test_function_locals_stay_out_of_the_model() {
    let project = tempfile::tempdir().unwrap();
    write(
        project.path(),
        "logic.c",
        "int shared = 1;\n\
         int compute(int input) {\n\
             int local = input * 2;\n\
             for (int i = 0; i < 4; i++) { local += i; }\n\
             return local;\n\
         }\n",
    );

    let model = parse(project.path(), ProjectOptions::default());
    let globals: Vec<_> = model.files["logic.c"]
        .globals
        .iter()
        .map(|g| g.name.clone())
        .collect();
    assert_eq!(globals, vec!["shared"]);
}

#[test]
fn test_transform_from_files_on_disk() {
    let project = tempfile::tempdir().unwrap();
    write(project.path(), "main.c", "#include \"api.h\"\nint keep_me(void);\nint drop_me(void);\n");
    write(project.path(), "api.h", "int keep_me(void);\n");

    let out = tempfile::tempdir().unwrap();
    let model = parse(project.path(), ProjectOptions::default());
    let model_path = out.path().join("model.json");
    model.save(&model_path).unwrap();

    let config_path = out.path().join("config.json");
    fs::write(
        &config_path,
        r#"{"element_filters": {"functions": {"exclude": ["^drop_"]}}}"#,
    )
    .unwrap();

    let transformed_path = out.path().join("model_transformed.json");
    Transformer::new()
        .transform(&model_path, &config_path, &transformed_path)
        .unwrap();

    let transformed = ProjectModel::load(&transformed_path).unwrap();
    let names: Vec<_> = transformed.files["main.c"]
        .functions
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["keep_me"]);

    // The parse output on disk is untouched
    let original = ProjectModel::load(&model_path).unwrap();
    assert_eq!(original.files["main.c"].functions.len(), 2);
}

#[test]
fn test_collision_scenario_distinct_content_addressable() {
    let project = tempfile::tempdir().unwrap();
    write(project.path(), "dir1/a.c", "#include \"test.h\"\n");
    write(project.path(), "dir1/test.h", "struct One { int x; };\n");
    write(project.path(), "dir2/b.c", "#include \"test.h\"\n");
    write(project.path(), "dir2/test.h", "struct Two { int y; };\n");

    let model = parse(project.path(), ProjectOptions::default());

    let keys: Vec<_> = model
        .files
        .keys()
        .filter(|k| k.starts_with("test.h"))
        .cloned()
        .collect();
    assert_eq!(keys.len(), 2);

    let one = model.files.values().find(|f| f.structs.contains_key("One"));
    let two = model.files.values().find(|f| f.structs.contains_key("Two"));
    assert!(one.is_some());
    assert!(two.is_some());
    assert_ne!(one.unwrap().relative_path, two.unwrap().relative_path);
}
