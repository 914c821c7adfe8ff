//! PlantUML class-diagram generation.
//!
//! Renders one diagram per source file: the file's own class, a class per
//! header reachable within the configured include depth, a class per complex
//! typedef, and the include/declares/uses arrows between them.

use crate::error::Result;
use crate::model::{FileModel, ProjectModel, TypedefKind};
use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Colors per class kind. The defaults are the fixed palette used in the
/// emitted diagrams; an options struct keeps them in one place.
#[derive(Debug, Clone)]
pub struct DiagramStyle {
    /// Source file classes
    pub source_color: String,
    /// Header file classes
    pub header_color: String,
    /// Typedef classes (all kinds)
    pub typedef_color: String,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            source_color: "LightBlue".to_string(),
            header_color: "LightGreen".to_string(),
            typedef_color: "LightYellow".to_string(),
        }
    }
}

/// PlantUML diagram generator.
#[derive(Debug, Default)]
pub struct Generator {
    style: DiagramStyle,
}

/// A header in the include tree: its file key plus the key of the file
/// whose `#include` reached it first (the arrow source for its edge).
#[derive(Debug)]
struct TreeNode {
    key: String,
    parent: String,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: DiagramStyle) -> Self {
        Self { style }
    }

    /// Render one `.puml` file per source file into `output_dir`.
    pub fn generate(
        &self,
        model: &ProjectModel,
        output_dir: &Path,
        include_depth: u32,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir)
            .map_err(|e| crate::error::ModelError::Io(output_dir.to_path_buf(), e))?;

        let mut written = Vec::new();
        for file in model.files.values() {
            if !file.is_source_file() {
                continue;
            }
            let diagram = self.generate_diagram(file, model, include_depth);
            let output_path = output_dir.join(format!("{}.puml", stem(file.basename())));
            fs::write(&output_path, diagram)
                .map_err(|e| crate::error::ModelError::Io(output_path.clone(), e))?;
            debug!("Generated {}", output_path.display());
            written.push(output_path);
        }

        info!("Generated {} PlantUML files in {}", written.len(), output_dir.display());
        Ok(written)
    }

    /// Render the diagram text for one source file.
    pub fn generate_diagram(
        &self,
        file: &FileModel,
        project: &ProjectModel,
        include_depth: u32,
    ) -> String {
        let basename = stem(file.basename());
        let source_id = uml_id(basename);
        let headers = self.include_tree(file, project, include_depth);

        // Names declared by any header in the tree decide `+` vs `-` in the
        // source class
        let mut header_names: HashSet<String> = HashSet::new();
        for node in &headers {
            if let Some(header) = project.files.get(&node.key) {
                header_names.extend(header.structs.keys().cloned());
                header_names.extend(header.enums.keys().cloned());
                header_names.extend(header.unions.keys().cloned());
                header_names.extend(header.typedefs.keys().cloned());
                header_names.extend(header.functions.iter().map(|f| f.name.clone()));
                header_names.extend(header.globals.iter().map(|g| g.name.clone()));
                header_names
                    .extend(header.macros.iter().map(|m| macro_signature_name(m).to_string()));
            }
        }

        let mut lines = vec![format!("@startuml {basename}"), String::new()];

        // Source class
        lines.extend(self.render_file_class(
            file,
            basename,
            &source_id,
            "source",
            &self.style.source_color,
            Some(&header_names),
        ));

        // Header classes
        for node in &headers {
            if let Some(header) = project.files.get(&node.key) {
                let header_stem = stem(header.basename());
                let header_id = format!("HEADER_{}", uml_id(header_stem));
                lines.extend(self.render_file_class(
                    header,
                    header_stem,
                    &header_id,
                    "header",
                    &self.style.header_color,
                    None,
                ));
            }
        }

        // Typedef classes from the source file and every header in the tree
        let mut typedef_owners: Vec<&str> = Vec::new();
        let mut seen_typedefs: HashSet<String> = HashSet::new();
        for key in std::iter::once(file.basename()).chain(headers.iter().map(|n| n.key.as_str()))
        {
            typedef_owners.push(key);
            let owner = if key == file.basename() {
                Some(file)
            } else {
                project.files.get(key)
            };
            if let Some(owner) = owner {
                for rel in &owner.typedef_relations {
                    if seen_typedefs.insert(rel.typedef_name.clone()) {
                        lines.extend(self.render_typedef_class(owner, rel));
                    }
                }
            }
        }

        // Relationships
        lines.extend(self.render_relationships(
            file,
            project,
            &source_id,
            &headers,
            &typedef_owners,
        ));

        lines.push(String::new());
        lines.push("@enduml".to_string());
        lines.join("\n")
    }

    /// Headers reachable from `file` within `include_depth` hops.
    ///
    /// Prefers recorded include relations; falls back to a breadth-first walk
    /// over the raw include lists when no relations were recorded. Each node
    /// remembers the file whose `#include` reached it first, so the arrow
    /// pass can draw every tree edge. Deduplicated, nearest depth first.
    fn include_tree(
        &self,
        file: &FileModel,
        project: &ProjectModel,
        include_depth: u32,
    ) -> Vec<TreeNode> {
        let mut tree: Vec<TreeNode> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(file.basename().to_string());

        if !file.include_relations.is_empty() {
            let mut relations: Vec<_> = file
                .include_relations
                .iter()
                .filter(|rel| rel.depth <= include_depth)
                .collect();
            relations.sort_by_key(|rel| rel.depth);
            for rel in relations {
                if seen.insert(rel.included_file.clone()) {
                    tree.push(TreeNode {
                        key: rel.included_file.clone(),
                        parent: rel.source_file.clone(),
                    });
                }
            }
            return tree;
        }

        // Fallback: walk raw includes through the files mapping
        let mut frontier: Vec<String> = vec![file.basename().to_string()];
        let mut depth = 1;
        while depth <= include_depth && !frontier.is_empty() {
            let mut next = Vec::new();
            for key in frontier {
                let current = if key == file.basename() {
                    Some(file)
                } else {
                    project.files.get(&key)
                };
                let Some(current) = current else { continue };
                for include_name in &current.includes {
                    if let Some(target) = project.resolve_include(include_name) {
                        if seen.insert(target.to_string()) {
                            tree.push(TreeNode {
                                key: target.to_string(),
                                parent: key.clone(),
                            });
                            next.push(target.to_string());
                        }
                    }
                }
            }
            frontier = next;
            depth += 1;
        }
        tree
    }

    /// Render one file class (source or header).
    ///
    /// `header_names` is `Some` for the source class: members also declared
    /// in an included header get `+`, file-local members get `-`. Header
    /// class members are always `+`.
    fn render_file_class(
        &self,
        file: &FileModel,
        display_name: &str,
        id: &str,
        stereotype: &str,
        color: &str,
        header_names: Option<&HashSet<String>>,
    ) -> Vec<String> {
        let vis = |name: &str| match header_names {
            Some(names) => {
                if names.contains(name) {
                    '+'
                } else {
                    '-'
                }
            }
            None => '+',
        };

        let mut lines = vec![
            format!("class \"{display_name}\" as {id} <<{stereotype}>> #{color}"),
            "{".to_string(),
        ];

        if !file.macros.is_empty() {
            lines.push("    -- Macros --".to_string());
            for text in &file.macros {
                let display = macro_display(text);
                lines.push(format!("    {} #define {display}", vis(macro_signature_name(text))));
            }
        }

        if !file.typedefs.is_empty() {
            lines.push("    -- Typedefs --".to_string());
            for (name, underlying) in &file.typedefs {
                lines.push(format!("    {} typedef {underlying} {name}", vis(name)));
            }
        }

        if !file.globals.is_empty() {
            lines.push("    -- Global Variables --".to_string());
            for global in &file.globals {
                lines.push(format!(
                    "    {} {} {}",
                    vis(&global.name),
                    global.type_name,
                    global.name
                ));
            }
        }

        if !file.functions.is_empty() {
            lines.push("    -- Functions --".to_string());
            for function in &file.functions {
                lines.push(format!(
                    "    {} {} {}()",
                    vis(&function.name),
                    function.return_type,
                    function.name
                ));
            }
        }

        if !file.structs.is_empty() {
            lines.push("    -- Structs --".to_string());
            for (name, item) in &file.structs {
                lines.push(format!("    {} struct {name}", vis(name)));
                for field in &item.fields {
                    lines.push(format!("        + {} {}", field.type_name, field.name));
                }
            }
        }

        if !file.enums.is_empty() {
            lines.push("    -- Enums --".to_string());
            for (name, item) in &file.enums {
                lines.push(format!("    {} enum {name}", vis(name)));
                for value in &item.values {
                    lines.push(format!("        + {}", value.name));
                }
            }
        }

        if !file.unions.is_empty() {
            lines.push("    -- Unions --".to_string());
            for (name, item) in &file.unions {
                lines.push(format!("    {} union {name}", vis(name)));
                for field in &item.fields {
                    lines.push(format!("        + {} {}", field.type_name, field.name));
                }
            }
        }

        lines.push("}".to_string());
        lines.push(String::new());
        lines
    }

    /// Render a typedef class for one typedef relation.
    fn render_typedef_class(
        &self,
        owner: &FileModel,
        rel: &crate::model::TypedefRelation,
    ) -> Vec<String> {
        let id = format!("TYPEDEF_{}", uml_id(&rel.typedef_name));
        let stereotype = match rel.relationship_type {
            TypedefKind::Struct => "struct",
            TypedefKind::Enum => "enum",
            TypedefKind::Union => "union",
            TypedefKind::FunctionPointer => "function pointer",
            TypedefKind::Alias => "typedef",
        };
        let color = &self.style.typedef_color;

        let mut lines = vec![
            format!(
                "class \"{}\" as {id} <<{stereotype}>> #{color}",
                rel.typedef_name
            ),
            "{".to_string(),
        ];

        match rel.relationship_type {
            TypedefKind::Struct => {
                if let Some(item) = lookup_struct(owner, rel) {
                    for field in &item.fields {
                        lines.push(format!("    + {} {}", field.type_name, field.name));
                    }
                }
            }
            TypedefKind::Union => {
                if let Some(item) = lookup_union(owner, rel) {
                    for field in &item.fields {
                        lines.push(format!("    + {} {}", field.type_name, field.name));
                    }
                }
            }
            TypedefKind::Enum => {
                if let Some(item) = lookup_enum(owner, rel) {
                    for value in &item.values {
                        match &value.value {
                            Some(v) => lines.push(format!("    {} = {v}", value.name)),
                            None => lines.push(format!("    {}", value.name)),
                        }
                    }
                }
            }
            TypedefKind::Alias | TypedefKind::FunctionPointer => {
                lines.push(format!("    alias of {}", rel.original_type));
            }
        }

        lines.push("}".to_string());
        lines.push(String::new());
        lines
    }

    /// Render include/declares/uses arrows, duplicates suppressed.
    fn render_relationships(
        &self,
        file: &FileModel,
        project: &ProjectModel,
        source_id: &str,
        headers: &[TreeNode],
        typedef_owners: &[&str],
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let mut emitted: HashSet<(String, String, &'static str)> = HashSet::new();
        let class_id = |key: &str| -> String {
            if key == file.basename() {
                source_id.to_string()
            } else {
                format!("HEADER_{}", uml_id(stem(key)))
            }
        };

        // Include arrows: recorded relations when present, the tree edges of
        // the raw-include walk otherwise
        if !file.include_relations.is_empty() {
            let in_tree: HashSet<&str> = headers.iter().map(|n| n.key.as_str()).collect();
            for rel in &file.include_relations {
                if !in_tree.contains(rel.included_file.as_str()) {
                    continue;
                }
                let src = class_id(&rel.source_file);
                let dst = class_id(&rel.included_file);
                if emitted.insert((src.clone(), dst.clone(), "include")) {
                    lines.push(format!("{src} --> {dst} : <<include>>"));
                }
            }
        } else {
            for node in headers {
                let src = class_id(&node.parent);
                let dst = class_id(&node.key);
                if emitted.insert((src.clone(), dst.clone(), "include")) {
                    lines.push(format!("{src} --> {dst} : <<include>>"));
                }
            }
        }

        // Typedef names declared anywhere in the tree, with their declaring
        // file
        let mut declared: Vec<(String, String)> = Vec::new();
        for key in typedef_owners {
            let owner = if *key == file.basename() {
                Some(file)
            } else {
                project.files.get(*key)
            };
            if let Some(owner) = owner {
                for rel in &owner.typedef_relations {
                    declared.push((rel.typedef_name.clone(), key.to_string()));
                }
            }
        }

        // Declares arrows
        for (typedef_name, owner_key) in &declared {
            let src = class_id(owner_key);
            let dst = format!("TYPEDEF_{}", uml_id(typedef_name));
            if emitted.insert((src.clone(), dst.clone(), "declares")) {
                lines.push(format!("{src} ..> {dst} : <<declares>>"));
            }
        }

        // Uses arrows: a file references a typedef declared elsewhere
        for key in typedef_owners {
            let user = if *key == file.basename() {
                Some(file)
            } else {
                project.files.get(*key)
            };
            let Some(user) = user else { continue };
            for (typedef_name, owner_key) in &declared {
                if owner_key == key {
                    continue;
                }
                if references_type(user, typedef_name) {
                    let src = class_id(key);
                    let dst = format!("TYPEDEF_{}", uml_id(typedef_name));
                    if emitted.insert((src.clone(), dst.clone(), "uses")) {
                        lines.push(format!("{src} ..> {dst} : <<uses>>"));
                    }
                }
            }
        }

        lines
    }
}

/// True when any type string in the file mentions `type_name` as a whole
/// word.
fn references_type(file: &FileModel, type_name: &str) -> bool {
    let mentions = |text: &str| {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .any(|word| word == type_name)
    };

    file.structs
        .values()
        .flat_map(|s| &s.fields)
        .chain(file.unions.values().flat_map(|u| &u.fields))
        .chain(&file.globals)
        .any(|field| mentions(&field.type_name))
        || file.functions.iter().any(|f| {
            mentions(&f.return_type) || f.parameters.iter().any(|p| mentions(&p.type_name))
        })
}

fn lookup_struct<'a>(
    owner: &'a FileModel,
    rel: &crate::model::TypedefRelation,
) -> Option<&'a crate::model::Struct> {
    owner
        .structs
        .get(&rel.typedef_name)
        .or_else(|| owner.structs.get(&rel.struct_tag_name))
        .or_else(|| owner.structs.get(&rel.original_type))
}

fn lookup_union<'a>(
    owner: &'a FileModel,
    rel: &crate::model::TypedefRelation,
) -> Option<&'a crate::model::Union> {
    owner
        .unions
        .get(&rel.typedef_name)
        .or_else(|| owner.unions.get(&rel.struct_tag_name))
        .or_else(|| owner.unions.get(&rel.original_type))
}

fn lookup_enum<'a>(
    owner: &'a FileModel,
    rel: &crate::model::TypedefRelation,
) -> Option<&'a crate::model::Enum> {
    owner
        .enums
        .get(&rel.typedef_name)
        .or_else(|| owner.enums.get(&rel.struct_tag_name))
        .or_else(|| owner.enums.get(&rel.original_type))
}

/// Deterministic class identifier: uppercased, non-alphanumerics become `_`.
fn uml_id(name: &str) -> String {
    name.to_uppercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// File name without its last extension.
fn stem(basename: &str) -> &str {
    match basename.rfind('.') {
        Some(0) | None => basename,
        Some(idx) => &basename[..idx],
    }
}

/// The signature part of a stored macro text: the name, plus the parameter
/// list for function-like macros.
fn macro_display(text: &str) -> &str {
    let name_end = text
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(text.len());
    if text[name_end..].starts_with('(') {
        match text[name_end..].find(')') {
            Some(close) => &text[..name_end + close + 1],
            None => &text[..name_end],
        }
    } else {
        &text[..name_end]
    }
}

/// Just the macro name, without any parameter list.
fn macro_signature_name(text: &str) -> &str {
    let end = text
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Enum, EnumValue, Field, Function, Struct, TypedefKind, TypedefRelation};

    fn file(relative: &str) -> FileModel {
        FileModel::new(format!("/p/{relative}"), relative, "/p", "utf-8")
    }

    fn project_with(files: Vec<FileModel>) -> ProjectModel {
        let mut project = ProjectModel::new("demo", "/p");
        for f in files {
            project.files.insert(f.basename().to_string(), f);
        }
        project
    }

    #[test]
    fn test_uml_id_strips_non_alphanumerics() {
        assert_eq!(uml_id("utils"), "UTILS");
        assert_eq!(uml_id("my-header.v2"), "MY_HEADER_V2");
    }

    #[test]
    fn test_stem() {
        assert_eq!(stem("main.c"), "main");
        assert_eq!(stem("archive.tar.gz"), "archive.tar");
        assert_eq!(stem("Makefile"), "Makefile");
    }

    #[test]
    fn test_macro_display() {
        assert_eq!(macro_display("MAX_SIZE 128"), "MAX_SIZE");
        assert_eq!(macro_display("MIN(a, b) ((a) < (b))"), "MIN(a, b)");
    }

    #[test]
    fn test_basic_diagram_contains_header_class_and_include_arrow() {
        let mut main = file("main.c");
        main.includes = vec!["utils.h".to_string()];
        let mut utils = file("utils.h");
        utils.structs.insert(
            "Point".to_string(),
            Struct::new("Point", vec![Field::new("x", "int"), Field::new("y", "int")]),
        );
        let project = project_with(vec![main.clone(), utils]);

        let diagram = Generator::new().generate_diagram(&main, &project, 1);

        assert!(diagram.starts_with("@startuml main"));
        assert!(diagram.ends_with("@enduml"));
        assert!(diagram.contains("class \"utils\" as HEADER_UTILS <<header>> #LightGreen"));
        assert!(diagram.contains("+ struct Point"));
        assert!(diagram.contains("MAIN --> HEADER_UTILS : <<include>>"));
    }

    #[test]
    fn test_depth_bounds_header_classes() {
        let mut main = file("main.c");
        main.includes = vec!["a.h".to_string()];
        let mut a = file("a.h");
        a.includes = vec!["b.h".to_string()];
        let b = file("b.h");
        let project = project_with(vec![main.clone(), a, b]);

        let shallow = Generator::new().generate_diagram(&main, &project, 1);
        assert!(shallow.contains("HEADER_A"));
        assert!(!shallow.contains("HEADER_B"));

        // Every header in the tree gets its include edge, depth-2 ones from
        // the header that pulled them in
        let deep = Generator::new().generate_diagram(&main, &project, 2);
        assert!(deep.contains("MAIN --> HEADER_A : <<include>>"));
        assert!(deep.contains("HEADER_A --> HEADER_B : <<include>>"));
    }

    #[test]
    fn test_empty_file_still_renders_closed_diagram() {
        let empty = file("empty.c");
        let project = project_with(vec![empty.clone()]);
        let diagram = Generator::new().generate_diagram(&empty, &project, 1);

        assert!(diagram.contains("class \"empty\" as EMPTY <<source>> #LightBlue"));
        assert!(diagram.contains("{\n}"));
        assert!(diagram.ends_with("@enduml"));
    }

    #[test]
    fn test_visibility_marks_header_declared_elements_public() {
        let mut main = file("main.c");
        main.includes = vec!["api.h".to_string()];
        main.functions = vec![
            Function::new("exported", "int").declaration(),
            Function::new("local_only", "void"),
        ];
        let mut api = file("api.h");
        api.functions = vec![Function::new("exported", "int").declaration()];
        let project = project_with(vec![main.clone(), api]);

        let diagram = Generator::new().generate_diagram(&main, &project, 1);
        assert!(diagram.contains("    + int exported()"));
        assert!(diagram.contains("    - void local_only()"));
    }

    #[test]
    fn test_typedef_classes_by_kind() {
        let mut main = file("main.c");
        main.typedefs
            .insert("point_t".to_string(), "struct Point".to_string());
        main.typedefs
            .insert("cmp_fn".to_string(), "int (*)(int, int)".to_string());
        main.structs.insert(
            "Point".to_string(),
            Struct::new("Point", vec![Field::new("x", "int")]),
        );
        main.typedef_relations.push(
            TypedefRelation::new("point_t", "Point", TypedefKind::Struct).with_tag("Point"),
        );
        main.typedef_relations.push(TypedefRelation::new(
            "cmp_fn",
            "int (*)(int, int)",
            TypedefKind::FunctionPointer,
        ));
        let project = project_with(vec![main.clone()]);

        let diagram = Generator::new().generate_diagram(&main, &project, 1);
        assert!(diagram.contains("class \"point_t\" as TYPEDEF_POINT_T <<struct>> #LightYellow"));
        assert!(diagram.contains("    + int x"));
        assert!(diagram
            .contains("class \"cmp_fn\" as TYPEDEF_CMP_FN <<function pointer>> #LightYellow"));
        assert!(diagram.contains("    alias of int (*)(int, int)"));
        assert!(diagram.contains("MAIN ..> TYPEDEF_POINT_T : <<declares>>"));
    }

    #[test]
    fn test_enum_typedef_class_renders_values() {
        let mut main = file("main.c");
        main.enums.insert(
            "Status".to_string(),
            Enum::new(
                "Status",
                vec![EnumValue::new("OK"), EnumValue::with_value("FAILED", "3")],
            ),
        );
        main.typedefs
            .insert("status_t".to_string(), "enum Status".to_string());
        main.typedef_relations.push(
            TypedefRelation::new("status_t", "Status", TypedefKind::Enum).with_tag("Status"),
        );
        let project = project_with(vec![main.clone()]);

        let diagram = Generator::new().generate_diagram(&main, &project, 1);
        assert!(diagram.contains("class \"status_t\" as TYPEDEF_STATUS_T <<enum>> #LightYellow"));
        // Enum values are unprefixed, explicit values kept
        assert!(diagram.contains("\n    OK\n"));
        assert!(diagram.contains("\n    FAILED = 3\n"));
    }

    #[test]
    fn test_custom_style_colors() {
        let main = file("main.c");
        let project = project_with(vec![main.clone()]);

        let style = DiagramStyle {
            source_color: "Tomato".to_string(),
            ..DiagramStyle::default()
        };
        let diagram = Generator::with_style(style).generate_diagram(&main, &project, 1);
        assert!(diagram.contains("<<source>> #Tomato"));
    }

    #[test]
    fn test_uses_arrow_for_foreign_typedef() {
        let mut main = file("main.c");
        main.includes = vec!["types.h".to_string()];
        main.globals = vec![Field::new("counter", "u32")];
        let mut types = file("types.h");
        types
            .typedefs
            .insert("u32".to_string(), "unsigned int".to_string());
        types.typedef_relations.push(TypedefRelation::new(
            "u32",
            "unsigned int",
            TypedefKind::Alias,
        ));
        let project = project_with(vec![main.clone(), types]);

        let diagram = Generator::new().generate_diagram(&main, &project, 1);
        assert!(diagram.contains("HEADER_TYPES ..> TYPEDEF_U32 : <<declares>>"));
        assert!(diagram.contains("MAIN ..> TYPEDEF_U32 : <<uses>>"));
    }

    #[test]
    fn test_duplicate_include_arrows_suppressed() {
        let mut main = file("main.c");
        main.includes = vec!["utils.h".to_string(), "utils.h".to_string()];
        let utils = file("utils.h");
        let project = project_with(vec![main.clone(), utils]);

        let diagram = Generator::new().generate_diagram(&main, &project, 1);
        let arrows = diagram
            .matches("MAIN --> HEADER_UTILS : <<include>>")
            .count();
        assert_eq!(arrows, 1);
    }

    #[test]
    fn test_generate_writes_puml_per_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut main = file("main.c");
        main.includes = vec!["utils.h".to_string()];
        let utils = file("utils.h");
        let project = project_with(vec![main, utils]);

        let written = Generator::new().generate(&project, dir.path(), 1).unwrap();
        assert_eq!(written.len(), 1);
        assert!(dir.path().join("main.puml").exists());
        assert!(!dir.path().join("utils.puml").exists());
    }
}
