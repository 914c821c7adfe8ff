//! # c2puml
//!
//! Structural model, transformer and PlantUML export for converting C/C++
//! source trees into class diagrams.
//!
//! The pipeline has three stages, each runnable on its own:
//!
//! ```text
//! Project Parser (c2puml-c)
//!     ↓ model.json
//! Transformer (filters, renames, include relations)
//!     ↓ model_transformed.json
//! Generator (one .puml per source file)
//! ```
//!
//! This crate owns the middle and bottom of that picture: the serialized
//! [`model::ProjectModel`], the declarative [`config::Config`], the
//! [`transform::Transformer`] and the [`export::Generator`]. Parsing lives in
//! the `c2puml-c` crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use c2puml::transform::Transformer;
//! use std::path::Path;
//!
//! # fn main() -> c2puml::Result<()> {
//! let transformer = Transformer::new();
//! transformer.transform(
//!     Path::new("output/model.json"),
//!     Path::new("config.json"),
//!     Path::new("output/model_transformed.json"),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod transform;

// Re-export main types
pub use config::Config;
pub use error::{ModelError, Result};
pub use export::Generator;
pub use model::{
    Enum, EnumValue, Field, FileModel, Function, IncludeRelation, ProjectModel, Struct,
    TypedefKind, TypedefRelation, Union,
};
pub use transform::Transformer;
