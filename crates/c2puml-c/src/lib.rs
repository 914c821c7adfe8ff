//! # c2puml-c
//!
//! C/C++ structural parser for c2puml: turns source trees into the
//! [`c2puml::model::ProjectModel`] the transformer and generator consume.
//!
//! ## What it extracts
//!
//! - Structs, unions (nested anonymous members included), enums
//! - Functions (declarations and definitions, storage class as flags)
//! - Top-level globals, macros, typedefs with kind classification
//! - `#include` targets, with project-level include-dependency expansion
//!
//! This is deliberately not a compiler. Parsing is regex/brace-matching over
//! a token stream, best effort by design: malformed fragments are skipped
//! and the rest of the file still parses. Conditional compilation is never
//! evaluated, so every `#if` branch is visible in the model.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use c2puml_c::{ProjectOptions, ProjectParser};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let parser = ProjectParser::new(ProjectOptions::default());
//! let model = parser.parse_project(&[PathBuf::from("./my_project")])?;
//! println!("Parsed {} files", model.files.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extractor;
mod parser_impl;
pub mod project;
pub mod resolve;
pub mod tokenizer;

// Export the file parser implementation
pub use parser_impl::{CParser, FILE_EXTENSIONS, SOURCE_EXTENSIONS};

// Export key types from submodules
pub use error::{ParserError, ParserResult};
pub use project::{ParseStats, ProjectOptions, ProjectParser};
pub use resolve::IncludeResolver;
