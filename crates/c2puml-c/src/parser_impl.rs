//! Per-file parsing: bytes → decoded text → tokens → FileModel.

use crate::error::{ParserError, ParserResult};
use crate::extractor;
use crate::tokenizer;
use c2puml::model::FileModel;
use log::debug;
use std::fs;
use std::path::Path;

/// File extensions the parser handles.
pub const FILE_EXTENSIONS: &[&str] = &[".c", ".h", ".cpp", ".cc", ".cxx", ".hpp", ".hxx"];

/// Extensions of `.c`-family entry files (sources, not headers).
pub const SOURCE_EXTENSIONS: &[&str] = &[".c", ".cpp", ".cc", ".cxx"];

/// Parser for a single C/C++ file.
#[derive(Debug, Default)]
pub struct CParser;

impl CParser {
    pub fn new() -> Self {
        Self
    }

    /// Whether this parser handles the given path, by extension.
    pub fn can_parse(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        FILE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    }

    /// Whether the path is a `.c`-family source file.
    pub fn is_source_path(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        SOURCE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    }

    /// Parse one file into a FileModel.
    ///
    /// The file's bytes are decoded as UTF-8; invalid sequences are replaced
    /// rather than failing the parse, with `encoding_used` recording which
    /// path was taken.
    pub fn parse_file(&self, path: &Path, project_root: &Path) -> ParserResult<FileModel> {
        let bytes = fs::read(path).map_err(|e| ParserError::Io(path.to_path_buf(), e))?;
        let (source, encoding) = decode_bytes(bytes);

        let relative = path
            .strip_prefix(project_root)
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_else(|_| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string_lossy().into_owned())
            });

        Ok(self.parse_source(
            &source,
            &path.to_string_lossy(),
            &relative,
            &project_root.to_string_lossy(),
            encoding,
        ))
    }

    /// Parse source text into a FileModel. Extraction is best effort and
    /// never fails; `include_relations` is left empty for the transformer.
    pub fn parse_source(
        &self,
        source: &str,
        file_path: &str,
        relative_path: &str,
        project_root: &str,
        encoding: &str,
    ) -> FileModel {
        let tokens = tokenizer::tokenize(source);
        let extraction = extractor::extract_all(&tokens);

        let mut model = FileModel::new(file_path, relative_path, project_root, encoding);
        model.structs = extraction.structs;
        model.enums = extraction.enums;
        model.unions = extraction.unions;
        model.functions = extraction.functions;
        model.globals = extraction.globals;
        model.includes = extraction.includes;
        model.macros = extraction.macros;
        model.typedefs = extraction.typedefs;
        model.typedef_relations = extraction.typedef_relations;

        debug!(
            "Parsed {relative_path}: {} structs, {} functions, {} includes",
            model.structs.len(),
            model.functions.len(),
            model.includes.len()
        );
        model
    }
}

/// Decode file bytes, falling back to lossy replacement instead of failing.
fn decode_bytes(bytes: Vec<u8>) -> (String, &'static str) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, "utf-8"),
        Err(err) => {
            let text = String::from_utf8_lossy(err.as_bytes()).into_owned();
            (text, "utf-8 (lossy)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_can_parse_by_extension() {
        let parser = CParser::new();
        assert!(parser.can_parse(Path::new("main.c")));
        assert!(parser.can_parse(Path::new("lib.HPP")));
        assert!(!parser.can_parse(Path::new("readme.md")));
        assert!(!parser.can_parse(Path::new("noext")));
    }

    #[test]
    fn test_parse_source_populates_model() {
        let parser = CParser::new();
        let model = parser.parse_source(
            "#include \"utils.h\"\nstruct Point { int x; int y; };\nint main(void) { return 0; }",
            "/p/main.c",
            "main.c",
            "/p",
            "utf-8",
        );
        assert_eq!(model.includes, vec!["utils.h"]);
        assert!(model.structs.contains_key("Point"));
        assert_eq!(model.functions.len(), 1);
        assert!(model.include_relations.is_empty());
    }

    #[test]
    fn test_parse_file_with_invalid_utf8_is_lossy_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weird.c");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"int ok;\n\xFF\xFEchar x;\n").unwrap();

        let parser = CParser::new();
        let model = parser.parse_file(&path, dir.path()).unwrap();
        assert_eq!(model.encoding_used, "utf-8 (lossy)");
        assert!(model.globals.iter().any(|g| g.name == "ok"));
    }

    #[test]
    fn test_relative_path_outside_root_falls_back_to_basename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alone.c");
        std::fs::write(&path, "int x;").unwrap();

        let parser = CParser::new();
        let model = parser.parse_file(&path, Path::new("/unrelated/root")).unwrap();
        assert_eq!(model.relative_path, "alone.c");
    }
}
