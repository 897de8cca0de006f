//! Prompt catalog
//!
//! Static prompt descriptors keyed by id. Prompts declare which other
//! prompts they depend on (bare id, any-of, all-of) and which tools or tool
//! modules they require. Loadable from TOML or built programmatically.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SitekitError};

/// A prompt dependency entry: a bare prompt id, the first resolvable id of
/// an alternative list, or every id of a required list (missing members are
/// skipped with a warning).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyRef {
    Id(String),
    Any { any: Vec<String> },
    All { all: Vec<String> },
}

impl DependencyRef {
    /// Bare-id convenience constructor
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }
}

/// Static descriptor for one prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSpec {
    /// Unique key within the catalog
    pub id: String,
    /// Optional heading emitted above the content
    #[serde(default)]
    pub title: Option<String>,
    /// Instruction text
    pub content: String,
    /// Prompt dependencies, resolved before this prompt
    #[serde(default)]
    pub depends: Vec<DependencyRef>,
    /// Required tools: literal tool names, or bare module labels that expand
    /// to every public tool of that module
    #[serde(default)]
    pub tools: Vec<String>,
    /// Free-form grouping label
    #[serde(default)]
    pub category: Option<String>,
}

impl PromptSpec {
    /// Create a prompt with content only
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            content: content.into(),
            depends: Vec::new(),
            tools: Vec::new(),
            category: None,
        }
    }

    /// Set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a dependency
    pub fn with_dependency(mut self, dep: DependencyRef) -> Self {
        self.depends.push(dep);
        self
    }

    /// Append a required tool or module reference
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tools.push(tool.into());
        self
    }

    /// Set category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// TOML file structure
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(rename = "prompt")]
    prompts: Vec<PromptSpec>,
}

/// Catalog of prompt descriptors loaded from TOML or built in code
#[derive(Debug, Clone, Default)]
pub struct PromptCatalog {
    prompts: HashMap<String, PromptSpec>,
}

impl PromptCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            prompts: HashMap::new(),
        }
    }

    /// Load catalog from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SitekitError::Catalog(format!("Failed to read prompt catalog: {}", e))
        })?;
        Self::from_toml(&content)
    }

    /// Load catalog from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let catalog: TomlCatalog = toml::from_str(content)
            .map_err(|e| SitekitError::Catalog(format!("Failed to parse TOML: {}", e)))?;

        let mut prompts = HashMap::new();
        for prompt in catalog.prompts {
            prompts.insert(prompt.id.clone(), prompt);
        }
        Ok(Self { prompts })
    }

    /// The prompt pack shipped with the binary
    pub fn default_pack() -> Self {
        Self::from_toml(include_str!("defaults.toml"))
            .unwrap_or_else(|_| Self::new())
    }

    /// Add a prompt to the catalog
    pub fn add(&mut self, prompt: PromptSpec) {
        self.prompts.insert(prompt.id.clone(), prompt);
    }

    /// Get a prompt by id
    pub fn get(&self, id: &str) -> Option<&PromptSpec> {
        self.prompts.get(id)
    }

    /// Check if a prompt exists
    pub fn contains(&self, id: &str) -> bool {
        self.prompts.contains_key(id)
    }

    /// List all prompt ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.prompts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Get number of prompts
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
