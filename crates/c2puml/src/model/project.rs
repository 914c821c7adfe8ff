use super::file::FileModel;
use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Aggregate of all parsed files for one project, plus metadata.
///
/// The `files` mapping is the single source of truth for cross-file lookups:
/// include resolution and typedef qualification both go through it. Keys are
/// basenames, with a deterministic hash suffix appended when two files in
/// different directories share a basename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectModel {
    /// Project display name
    pub project_name: String,

    /// Root directory the project was parsed from
    pub project_root: String,

    /// Parsed files, keyed by (disambiguated) basename
    #[serde(default)]
    pub files: BTreeMap<String, FileModel>,

    /// RFC 3339 timestamp of the parse run
    pub created_at: String,
}

impl ProjectModel {
    /// Create an empty project model stamped with the current time.
    pub fn new(project_name: impl Into<String>, project_root: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            project_root: project_root.into(),
            files: BTreeMap::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Load a model from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ModelError::ModelNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|e| ModelError::Io(path.to_path_buf(), e))?;
        serde_json::from_str(&text).map_err(|e| ModelError::ModelLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save the model as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ModelError::Io(parent.to_path_buf(), e))?;
            }
        }
        let text = serde_json::to_string_pretty(self).map_err(|e| ModelError::ModelSave {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, text).map_err(|e| ModelError::Io(path.to_path_buf(), e))
    }

    /// Look up a file by its raw include name, trying header extensions when
    /// the name as written is not a key.
    pub fn resolve_include(&self, include_name: &str) -> Option<&str> {
        resolve_include_key(&self.files, include_name)
    }

    /// Totals across all files, used for post-parse summary logging.
    pub fn summary(&self) -> ProjectSummary {
        let mut summary = ProjectSummary {
            files: self.files.len(),
            ..ProjectSummary::default()
        };
        for file in self.files.values() {
            let counts = file.summary();
            summary.structs += counts.structs;
            summary.enums += counts.enums;
            summary.unions += counts.unions;
            summary.functions += counts.functions;
            summary.globals += counts.globals;
        }
        summary
    }
}

/// Resolve a textual include against a files mapping, trying header
/// extensions when the name as written is not a key. Directory components
/// are dropped because the mapping is keyed by (disambiguated) basename.
pub(crate) fn resolve_include_key<'a>(
    files: &'a BTreeMap<String, FileModel>,
    include_name: &str,
) -> Option<&'a str> {
    let basename = include_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(include_name);
    for candidate in [
        basename.to_string(),
        format!("{basename}.h"),
        format!("{basename}.hpp"),
        format!("{basename}.hxx"),
    ] {
        if let Some((key, _)) = files.get_key_value(candidate.as_str()) {
            return Some(key.as_str());
        }
    }
    None
}

/// Project-wide element counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectSummary {
    pub files: usize,
    pub structs: usize,
    pub enums: usize,
    pub unions: usize,
    pub functions: usize,
    pub globals: usize,
}
