use super::entities::{Enum, Field, Function, Struct, Union};
use super::relations::{IncludeRelation, TypedefRelation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structural record of one parsed source or header file.
///
/// Created once by the file parser and treated as immutable afterwards,
/// except for `include_relations` (appended during the transformer's include
/// pass) and the filtered copies the transformer substitutes for whole
/// collections. Map keys are unique per file; project-level basename
/// collisions are disambiguated by the project parser, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileModel {
    /// Absolute path of the file on disk
    pub file_path: String,

    /// Path relative to `project_root`
    pub relative_path: String,

    /// Root directory of the project this file belongs to
    pub project_root: String,

    /// Encoding the file was decoded with (`utf-8`, or `utf-8 (lossy)` when
    /// invalid byte sequences were replaced)
    pub encoding_used: String,

    /// Structs by name
    #[serde(default)]
    pub structs: BTreeMap<String, Struct>,

    /// Enums by name
    #[serde(default)]
    pub enums: BTreeMap<String, Enum>,

    /// Unions by name
    #[serde(default)]
    pub unions: BTreeMap<String, Union>,

    /// Functions in declaration order
    #[serde(default)]
    pub functions: Vec<Function>,

    /// Top-level variables in declaration order
    #[serde(default)]
    pub globals: Vec<Field>,

    /// Include targets as written, quotes/brackets stripped, in order
    #[serde(default)]
    pub includes: Vec<String>,

    /// Macro definitions: the full text after `#define ` (name, parameter
    /// list for function-like macros, raw replacement)
    #[serde(default)]
    pub macros: Vec<String>,

    /// Typedef name → raw underlying type
    #[serde(default)]
    pub typedefs: BTreeMap<String, String>,

    /// Typedef classifications for diagram stereotyping
    #[serde(default)]
    pub typedef_relations: Vec<TypedefRelation>,

    /// Include edges, populated by the transformer's include pass
    #[serde(default)]
    pub include_relations: Vec<IncludeRelation>,
}

impl FileModel {
    /// Create an empty model for the given paths.
    pub fn new(
        file_path: impl Into<String>,
        relative_path: impl Into<String>,
        project_root: impl Into<String>,
        encoding_used: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            relative_path: relative_path.into(),
            project_root: project_root.into(),
            encoding_used: encoding_used.into(),
            structs: BTreeMap::new(),
            enums: BTreeMap::new(),
            unions: BTreeMap::new(),
            functions: Vec::new(),
            globals: Vec::new(),
            includes: Vec::new(),
            macros: Vec::new(),
            typedefs: BTreeMap::new(),
            typedef_relations: Vec::new(),
            include_relations: Vec::new(),
        }
    }

    /// File name component of `relative_path`.
    pub fn basename(&self) -> &str {
        self.relative_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// Whether this is a `.c`-family source file (as opposed to a header).
    pub fn is_source_file(&self) -> bool {
        let name = self.basename();
        [".c", ".cpp", ".cc", ".cxx"]
            .iter()
            .any(|ext| name.to_ascii_lowercase().ends_with(ext))
    }

    /// Element counts, used for post-parse summary logging.
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            structs: self.structs.len(),
            enums: self.enums.len(),
            unions: self.unions.len(),
            functions: self.functions.len(),
            globals: self.globals.len(),
            includes: self.includes.len(),
            macros: self.macros.len(),
            typedefs: self.typedefs.len(),
        }
    }
}

/// Per-file element counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub structs: usize,
    pub enums: usize,
    pub unions: usize,
    pub functions: usize,
    pub globals: usize,
    pub includes: usize,
    pub macros: usize,
    pub typedefs: usize,
}
