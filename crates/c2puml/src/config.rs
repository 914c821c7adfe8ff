//! Declarative pipeline configuration, loaded from a flat JSON file.
//!
//! Every section is optional; an empty config is a valid no-op. Unknown keys
//! are ignored so configs can carry annotations for other tooling.

use crate::error::{ModelError, Result};
use crate::model::{Enum, Field, Function, Struct, Union};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Include/exclude regex pattern lists.
///
/// An empty include list means "everything"; exclude always wins. Invalid
/// patterns are logged and skipped at application time, never fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPatterns {
    /// Patterns a name must match (any of) to be kept
    #[serde(default)]
    pub include: Vec<String>,

    /// Patterns that drop a name when matched
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl FilterPatterns {
    /// True when neither list contains a pattern.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

/// Per-category element filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementFilters {
    #[serde(default)]
    pub structs: FilterPatterns,
    #[serde(default)]
    pub enums: FilterPatterns,
    #[serde(default)]
    pub unions: FilterPatterns,
    #[serde(default)]
    pub functions: FilterPatterns,
    #[serde(default)]
    pub globals: FilterPatterns,
    #[serde(default)]
    pub macros: FilterPatterns,
    #[serde(default)]
    pub typedefs: FilterPatterns,
}

/// Restricts model transformations to files matching any of the patterns.
/// An empty list applies the transformations to every file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSelection {
    #[serde(default)]
    pub selected_files: Vec<String>,
}

/// Old name → new name, per element category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameSpec {
    #[serde(default)]
    pub structs: BTreeMap<String, String>,
    #[serde(default)]
    pub enums: BTreeMap<String, String>,
    #[serde(default)]
    pub unions: BTreeMap<String, String>,
    #[serde(default)]
    pub functions: BTreeMap<String, String>,
    #[serde(default)]
    pub globals: BTreeMap<String, String>,
    #[serde(default)]
    pub macros: BTreeMap<String, String>,
    #[serde(default)]
    pub typedefs: BTreeMap<String, String>,
}

/// Elements to add to the selected files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddSpec {
    #[serde(default)]
    pub structs: Vec<Struct>,
    #[serde(default)]
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub unions: Vec<Union>,
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub globals: Vec<Field>,
    #[serde(default)]
    pub macros: Vec<String>,
    #[serde(default)]
    pub typedefs: BTreeMap<String, String>,
}

/// Element names to remove from the selected files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveSpec {
    #[serde(default)]
    pub structs: Vec<String>,
    #[serde(default)]
    pub enums: Vec<String>,
    #[serde(default)]
    pub unions: Vec<String>,
    #[serde(default)]
    pub functions: Vec<String>,
    #[serde(default)]
    pub globals: Vec<String>,
    #[serde(default)]
    pub macros: Vec<String>,
    #[serde(default)]
    pub typedefs: Vec<String>,
}

/// Model transformations, scoped by `file_selection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transformations {
    #[serde(default)]
    pub file_selection: FileSelection,
    #[serde(default)]
    pub rename: RenameSpec,
    #[serde(default)]
    pub add: AddSpec,
    #[serde(default)]
    pub remove: RemoveSpec,
}

/// Top-level configuration consumed by all three pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project display name
    pub project_name: String,

    /// Root directories to parse
    pub source_roots: Vec<String>,

    /// Whether discovery descends into subdirectories
    pub recursive: bool,

    /// Regex filters over candidate file paths, applied before parsing
    pub file_filters: FilterPatterns,

    /// Regex filters over element names, applied by the transformer
    pub element_filters: ElementFilters,

    /// Per-root-file regex lists restricting which includes are followed
    /// during include-relation processing (`root.c` → patterns)
    pub include_filters: BTreeMap<String, Vec<String>>,

    /// Rename/add/remove transformations
    pub transformations: Transformations,

    /// Maximum number of include hops to follow
    pub include_depth: u32,

    /// Where the parse stage writes its model, relative to the output dir
    pub model_output_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: "C_Project".to_string(),
            source_roots: Vec::new(),
            recursive: true,
            file_filters: FilterPatterns::default(),
            element_filters: ElementFilters::default(),
            include_filters: BTreeMap::new(),
            transformations: Transformations::default(),
            include_depth: 1,
            model_output_path: "model.json".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ModelError::ConfigNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|e| ModelError::Io(path.to_path_buf(), e))?;
        serde_json::from_str(&text).map_err(|e| ModelError::ConfigLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
