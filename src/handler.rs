//! Tool/prompt facade
//!
//! Thin composition root wiring the tool registry and the prompt catalog
//! behind one API. Both the AI-agent caller and the CLI builder go through
//! this type.

use serde_json::Value;

use crate::error::Result;
use crate::prompt::{ComposedPrompt, PromptBuilder, PromptCatalog};
use crate::tools::{CommandSpec, ToolRegistry};

/// Composition root over a tool registry and a prompt catalog
#[derive(Clone, Default)]
pub struct Toolkit {
    registry: ToolRegistry,
    prompts: PromptCatalog,
}

impl Toolkit {
    pub fn new(registry: ToolRegistry, prompts: PromptCatalog) -> Self {
        Self { registry, prompts }
    }

    /// Access the tool registry
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Access the prompt catalog
    pub fn prompts(&self) -> &PromptCatalog {
        &self.prompts
    }

    /// AI function-calling schemas for every public tool
    pub fn tool_definitions(&self) -> Vec<Value> {
        self.registry.tool_definitions()
    }

    /// CLI command descriptors for every non-private tool
    pub fn cli_commands(&self) -> Vec<CommandSpec> {
        self.registry.cli_commands()
    }

    /// Validate and invoke a tool by name
    pub async fn use_tool(&self, name: &str, parameters: Value) -> Result<Value> {
        self.registry.invoke(name, parameters).await
    }

    /// Compose a prompt and its transitive tool requirements
    pub fn build_prompt(&self, id: &str) -> Result<ComposedPrompt> {
        PromptBuilder::new(&self.prompts, &self.registry).build(id)
    }
}
