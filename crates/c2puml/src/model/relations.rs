use serde::{Deserialize, Serialize};

/// How a typedef maps onto its underlying type.
///
/// Drives diagram stereotyping: complex kinds get their own class, plain
/// aliases and function pointers render as `alias of <type>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypedefKind {
    /// Plain alias of another type (`typedef unsigned int u32;`)
    Alias,
    /// Typedef of a struct, with or without a tag
    Struct,
    /// Typedef of an enum
    Enum,
    /// Typedef of a union
    Union,
    /// Function pointer (`typedef int (*cmp_fn)(int, int);`)
    FunctionPointer,
}

/// Record of how one typedef name maps onto an underlying type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedefRelation {
    /// The typedef'd name
    pub typedef_name: String,

    /// Raw textual underlying type
    pub original_type: String,

    /// Relationship classification
    pub relationship_type: TypedefKind,

    /// For struct/enum/union typedefs, the tag name when one was written
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub struct_tag_name: String,
}

impl TypedefRelation {
    pub fn new(
        typedef_name: impl Into<String>,
        original_type: impl Into<String>,
        relationship_type: TypedefKind,
    ) -> Self {
        Self {
            typedef_name: typedef_name.into(),
            original_type: original_type.into(),
            relationship_type,
            struct_tag_name: String::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.struct_tag_name = tag.into();
        self
    }
}

/// A directed, depth-tagged edge recording that one file includes another,
/// resolved to a project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeRelation {
    /// File containing the `#include`
    pub source_file: String,

    /// The included project file
    pub included_file: String,

    /// Hop count from the root source file (1 = direct include)
    pub depth: u32,
}

impl IncludeRelation {
    /// Create a relation, rejecting self-edges.
    ///
    /// Returns `None` when `source_file == included_file`; a file including
    /// itself carries no diagram information and would loop the traversal.
    pub fn new(
        source_file: impl Into<String>,
        included_file: impl Into<String>,
        depth: u32,
    ) -> Option<Self> {
        let source_file = source_file.into();
        let included_file = included_file.into();
        if source_file == included_file {
            return None;
        }
        Some(Self {
            source_file,
            included_file,
            depth,
        })
    }
}
