//! Parameter descriptors and JSON type mapping
//!
//! Declares the parameter metadata a tool carries and the mapping from
//! declared kinds to JSON-schema type names used by the AI surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared kind of a tool parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Enum,
    Any,
    Null,
    /// Anything the source declared that we don't model (function, symbol,
    /// bigint, date, ...). Kept verbatim for display, mapped to string.
    #[serde(untagged)]
    Other(String),
}

impl ParamKind {
    /// Parse a declared type name. Generic suffixes (`Foo<Bar>`) are stripped
    /// to the base name before matching; unrecognized names become Other.
    pub fn parse(raw: &str) -> Self {
        let base = match raw.find('<') {
            Some(idx) => &raw[..idx],
            None => raw,
        };
        match base.trim().to_lowercase().as_str() {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "object" => Self::Object,
            "array" => Self::Array,
            "enum" => Self::Enum,
            "any" => Self::Any,
            "null" | "undefined" => Self::Null,
            other => Self::Other(other.to_string()),
        }
    }

    /// JSON-schema type name for the AI function-calling surface.
    /// Enum carries its own value list and maps to "string"; everything we
    /// can't express maps to "string" as well.
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::String | Self::Enum | Self::Any | Self::Other(_) => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }
}

/// Static metadata for one tool parameter. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name as the caller supplies it
    pub name: String,
    /// Declared kind
    pub kind: ParamKind,
    /// Human-readable description for both surfaces
    #[serde(default)]
    pub description: String,
    /// Whether the caller may omit this parameter
    #[serde(default)]
    pub optional: bool,
    /// Default value surfaced to the CLI layer (the registry never applies it)
    #[serde(default)]
    pub default: Option<Value>,
    /// Allowed values for Enum parameters
    #[serde(default)]
    pub values: Vec<String>,
}

impl ParamSpec {
    /// Create a required parameter of the given kind
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            optional: false,
            default: None,
            values: Vec::new(),
        }
    }

    /// Shorthand for a required string parameter
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::String)
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the parameter optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Set the CLI-facing default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set allowed enum values
    pub fn with_values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }
}
