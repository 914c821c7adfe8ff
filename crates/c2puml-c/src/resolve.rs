//! Include-name resolution against a project tree.
//!
//! An include name is looked up relative to the including file's directory
//! first (the C search rule for quoted includes), then under the project
//! root and its conventional subfolders, with header-extension fallback.
//!
//! Failed root lookups are memoized per resolver instance, keyed by
//! `(include name, project root)`: on large trees the same missing system
//! header is referenced from many files, and repeating the directory probes
//! for each one is a quadratic trap. The resolver is constructed fresh for
//! every project parse and discarded with it, so one run's misses can never
//! leak into the next.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Subfolders of the project root searched for headers, in order.
const SEARCH_SUBDIRS: &[&str] = &["", "include", "src", "lib", "headers"];

/// Extension fallbacks tried for each search location, in order.
const HEADER_EXTENSIONS: &[&str] = &[".h", ".hpp", ".hxx", ""];

/// Resolves include names to project files, memoizing failed lookups.
#[derive(Debug, Default)]
pub struct IncludeResolver {
    misses: HashSet<(String, PathBuf)>,
}

impl IncludeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `include_name` to a file, searching the including file's own
    /// directory first, then the project root and its conventional
    /// subfolders. Returns `None` for system includes and anything else not
    /// present in the project.
    pub fn resolve(
        &mut self,
        include_name: &str,
        including_dir: Option<&Path>,
        project_root: &Path,
    ) -> Option<PathBuf> {
        if let Some(dir) = including_dir {
            let local = dir.join(include_name);
            if local.is_file() {
                return Some(local);
            }
        }

        let key = (include_name.to_string(), project_root.to_path_buf());
        if self.misses.contains(&key) {
            return None;
        }

        for subdir in SEARCH_SUBDIRS {
            let base = if subdir.is_empty() {
                project_root.to_path_buf()
            } else {
                project_root.join(subdir)
            };
            if !base.is_dir() {
                continue;
            }
            for ext in HEADER_EXTENSIONS {
                let candidate = base.join(format!("{include_name}{ext}"));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }

        self.misses.insert(key);
        None
    }

    /// Number of distinct failed lookups so far.
    pub fn miss_count(&self) -> usize {
        self.misses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_in_root_and_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("utils.h"), "").unwrap();
        fs::create_dir(dir.path().join("include")).unwrap();
        fs::write(dir.path().join("include/api.h"), "").unwrap();

        let mut resolver = IncludeResolver::new();
        assert!(resolver.resolve("utils.h", None, dir.path()).is_some());
        assert!(resolver.resolve("api.h", None, dir.path()).is_some());
        assert!(resolver.resolve("stdio.h", None, dir.path()).is_none());
    }

    #[test]
    fn test_resolve_extension_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("defs.hpp"), "").unwrap();

        let mut resolver = IncludeResolver::new();
        let resolved = resolver.resolve("defs", None, dir.path()).unwrap();
        assert!(resolved.ends_with("defs.hpp"));
    }

    #[test]
    fn test_resolve_prefers_including_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("common.h"), "").unwrap();
        fs::write(dir.path().join("sub/common.h"), "").unwrap();

        let mut resolver = IncludeResolver::new();
        let resolved = resolver
            .resolve("common.h", Some(&dir.path().join("sub")), dir.path())
            .unwrap();
        assert!(resolved.ends_with("sub/common.h"));
    }

    #[test]
    fn test_failed_lookups_are_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = IncludeResolver::new();

        assert!(resolver.resolve("missing.h", None, dir.path()).is_none());
        assert_eq!(resolver.miss_count(), 1);
        // Same miss again does not grow the cache
        assert!(resolver.resolve("missing.h", None, dir.path()).is_none());
        assert_eq!(resolver.miss_count(), 1);
    }

    #[test]
    fn test_subdir_includes_resolve() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sys")).unwrap();
        fs::write(dir.path().join("sys/types.h"), "").unwrap();

        let mut resolver = IncludeResolver::new();
        assert!(resolver.resolve("sys/types.h", None, dir.path()).is_some());
    }
}
