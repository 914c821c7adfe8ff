use serde::{Deserialize, Serialize};

/// A struct/union member, function parameter or global variable.
///
/// `type` is the raw textual C type: pointers, array suffixes and qualifiers
/// are retained verbatim (`char *`, `uint8_t[32]`, `const int : 3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Declared name (empty for unnamed prototype parameters)
    pub name: String,

    /// Raw textual C type
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A C struct. Field order matches source declaration order, including
/// nested anonymous members at their declared position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Struct {
    /// Struct name (tag name, or typedef name for tagless typedef structs)
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<Field>,

    /// Names of functions associated to this struct by naming convention
    #[serde(default)]
    pub methods: Vec<String>,
}

impl Struct {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            methods: Vec::new(),
        }
    }
}

/// A single enum constant with its explicit value, when one was written.
///
/// Ordinal position is implied by sequence order and not stored redundantly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Constant name
    pub name: String,

    /// Explicit value text (`0`, `0x10`, `FLAG_A | FLAG_B`), if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl EnumValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// A C enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    /// Enum name
    pub name: String,

    /// Values in declaration order
    pub values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(name: impl Into<String>, values: Vec<EnumValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A C union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Union {
    /// Union name
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<Field>,
}

impl Union {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// A function declaration or definition.
///
/// Both forms are recorded identically apart from `is_declaration`; storage
/// class keywords are folded into flags rather than kept in the return type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Function name
    pub name: String,

    /// Raw textual return type
    pub return_type: String,

    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<Field>,

    /// Declared `static`
    #[serde(default)]
    pub is_static: bool,

    /// Declared `inline`
    #[serde(default)]
    pub is_inline: bool,

    /// Prototype only (ends in `;`), as opposed to a definition with a body
    #[serde(default)]
    pub is_declaration: bool,
}

impl Function {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            is_static: false,
            is_inline: false,
            is_declaration: false,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<Field>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn static_fn(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn inline_fn(mut self) -> Self {
        self.is_inline = true;
        self
    }

    pub fn declaration(mut self) -> Self {
        self.is_declaration = true;
        self
    }
}
