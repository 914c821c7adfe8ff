//! Structural model of a parsed C/C++ project.
//!
//! The model is the contract between the three pipeline stages: the project
//! parser produces it, the transformer rewrites it, the generator consumes
//! it. Everything here serializes to plain JSON through serde, and the
//! serialized form *is* the external interface (`model.json`).
//!
//! Maps use [`std::collections::BTreeMap`] so that repeated runs over an
//! unchanged source tree serialize byte-identically (modulo `created_at`).

mod entities;
mod file;
mod project;
mod relations;

pub use entities::{Enum, EnumValue, Field, Function, Struct, Union};
pub use file::FileModel;
pub use project::ProjectModel;
pub(crate) use project::resolve_include_key;
pub use relations::{IncludeRelation, TypedefKind, TypedefRelation};
