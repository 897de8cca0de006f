//! Tool descriptors
//!
//! Static metadata describing a registered tool: name, module grouping,
//! ordered parameter list, examples, return shape, and visibility.

use serde::{Deserialize, Serialize};

use super::param::{ParamKind, ParamSpec};

/// Who gets to see a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Exposed on both the AI and CLI surfaces
    Public,
    /// Hidden from the AI schema, still reachable from the CLI
    Protected,
    /// Hidden from both surfaces, invocable only directly by name
    Private,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Public
    }
}

/// Declared return shape of a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnSpec {
    pub kind: ParamKind,
    #[serde(default)]
    pub description: String,
}

/// Static metadata for one tool. Created at catalog-load time, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Unique key within the catalog
    pub name: String,
    /// Grouping label shared by related tools
    pub module: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Ordered parameter list; invocation arguments follow this order
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    /// Usage examples
    #[serde(default)]
    pub examples: Vec<String>,
    /// Declared return shape
    #[serde(default)]
    pub returns: Option<ReturnSpec>,
    /// Surface visibility
    #[serde(default)]
    pub visibility: Visibility,
}

impl ToolSpec {
    /// Create a public tool spec in the given module
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            description: String::new(),
            params: Vec::new(),
            examples: Vec::new(),
            returns: None,
            visibility: Visibility::Public,
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a parameter (invocation order follows call order)
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Append a usage example
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Set return shape
    pub fn with_returns(mut self, kind: ParamKind, description: impl Into<String>) -> Self {
        self.returns = Some(ReturnSpec {
            kind,
            description: description.into(),
        });
        self
    }

    /// Set visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Description with the documented fallback for undescribed tools
    pub fn description_or_fallback(&self) -> String {
        if self.description.is_empty() {
            format!("Execute the {} function", self.name)
        } else {
            self.description.clone()
        }
    }

    /// Names of parameters the caller must supply
    pub fn required_params(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| !p.optional)
            .map(|p| p.name.as_str())
            .collect()
    }
}
