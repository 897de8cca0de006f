//! Prompt builder
//!
//! Resolves a prompt's dependency graph against the prompt catalog and its
//! transitive tool requirements against the tool registry, producing one
//! concatenated instruction block plus a deduplicated tool list.
//!
//! Traversal states per node: unvisited -> visiting -> resolved. The
//! visiting set is cloned per path, so a diamond (the same prompt reachable
//! via two branches) resolves fine while a true cycle (a prompt reachable
//! from itself along one path) fails fast.

use std::collections::HashSet;

use log::warn;

use crate::error::{Result, SitekitError};
use crate::tools::{ToolRegistry, ToolSpec};

use super::catalog::{DependencyRef, PromptCatalog, PromptSpec};

/// Result of composing a prompt: the concatenated instruction text and the
/// full descriptors of every tool the prompt (transitively) requires.
#[derive(Debug, Clone)]
pub struct ComposedPrompt {
    pub system_prompt: String,
    pub tools: Vec<ToolSpec>,
}

/// Resolves prompts against a prompt catalog and a tool registry
pub struct PromptBuilder<'a> {
    catalog: &'a PromptCatalog,
    registry: &'a ToolRegistry,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(catalog: &'a PromptCatalog, registry: &'a ToolRegistry) -> Self {
        Self { catalog, registry }
    }

    /// Compose the prompt with the given id.
    ///
    /// The root id must exist; missing *dependencies* degrade to a warning
    /// and omission, a cycle aborts the build naming the revisited id.
    pub fn build(&self, id: &str) -> Result<ComposedPrompt> {
        let root = self
            .catalog
            .get(id)
            .ok_or_else(|| SitekitError::PromptNotFound(id.to_string()))?;

        let mut expanded: Vec<String> = Vec::new();
        let mut visiting = HashSet::new();
        visiting.insert(root.id.clone());
        self.resolve_deps(root, &visiting, &mut expanded)?;

        // Dedup by id, first occurrence wins; the root always goes last
        let mut seen = HashSet::new();
        let mut ordered: Vec<&PromptSpec> = Vec::new();
        for dep_id in &expanded {
            if dep_id != id && seen.insert(dep_id.clone()) {
                if let Some(prompt) = self.catalog.get(dep_id) {
                    ordered.push(prompt);
                }
            }
        }
        ordered.push(root);

        let system_prompt = ordered
            .iter()
            .map(|p| render_block(p))
            .collect::<Vec<_>>()
            .join("\n\n");

        let tools = self.collect_tools(&ordered);

        Ok(ComposedPrompt {
            system_prompt,
            tools,
        })
    }

    /// Depth-first post-order expansion of a prompt's dependencies.
    /// `visiting` holds every id on the current path, including `prompt`.
    fn resolve_deps(
        &self,
        prompt: &PromptSpec,
        visiting: &HashSet<String>,
        out: &mut Vec<String>,
    ) -> Result<()> {
        for dep in &prompt.depends {
            for dep_id in self.resolve_ref(&prompt.id, dep) {
                if visiting.contains(&dep_id) {
                    return Err(SitekitError::CircularDependency(dep_id));
                }
                // get() cannot fail here: resolve_ref only returns known ids
                if let Some(dep_prompt) = self.catalog.get(&dep_id) {
                    let mut path = visiting.clone();
                    path.insert(dep_id.clone());
                    self.resolve_deps(dep_prompt, &path, out)?;
                    out.push(dep_id);
                }
            }
        }
        Ok(())
    }

    /// Resolve one dependency reference to the catalog ids it names.
    /// Missing references warn and resolve to nothing; they never abort.
    fn resolve_ref(&self, from: &str, dep: &DependencyRef) -> Vec<String> {
        match dep {
            DependencyRef::Id(id) => {
                if self.catalog.contains(id) {
                    vec![id.clone()]
                } else {
                    warn!("prompt '{}': dependency '{}' not found, skipping", from, id);
                    Vec::new()
                }
            }
            DependencyRef::Any { any } => {
                match any.iter().find(|id| self.catalog.contains(id)) {
                    Some(id) => vec![id.clone()],
                    None => {
                        warn!(
                            "prompt '{}': no alternative of [{}] found, skipping",
                            from,
                            any.join(", ")
                        );
                        Vec::new()
                    }
                }
            }
            DependencyRef::All { all } => all
                .iter()
                .filter(|id| {
                    let found = self.catalog.contains(id);
                    if !found {
                        warn!("prompt '{}': dependency '{}' not found, skipping", from, id);
                    }
                    found
                })
                .cloned()
                .collect(),
        }
    }

    /// Collect the union of required tools across the ordered prompt list.
    /// An entry with no '/' or '.' that names a registered module expands to
    /// that module's public tools; everything else is a literal tool name.
    /// The literal-vs-module ambiguity is inherent to the reference format
    /// and intentionally left as-is.
    fn collect_tools(&self, prompts: &[&PromptSpec]) -> Vec<ToolSpec> {
        let mut seen = HashSet::new();
        let mut tools = Vec::new();

        for prompt in prompts {
            for entry in &prompt.tools {
                let looks_like_module = !entry.contains('/') && !entry.contains('.');
                if looks_like_module && self.registry.catalog().has_module(entry) {
                    for spec in self.registry.public_tools_in_module(entry) {
                        if seen.insert(spec.name.clone()) {
                            tools.push(spec.clone());
                        }
                    }
                } else if let Some(spec) = self.registry.catalog().spec(entry) {
                    if seen.insert(spec.name.clone()) {
                        tools.push(spec.clone());
                    }
                } else {
                    warn!(
                        "prompt '{}': required tool '{}' not registered, skipping",
                        prompt.id, entry
                    );
                }
            }
        }

        tools
    }
}

/// One prompt's contribution to the concatenated text
fn render_block(prompt: &PromptSpec) -> String {
    match &prompt.title {
        Some(title) => format!("## {}\n\n{}", title, prompt.content),
        None => prompt.content.clone(),
    }
}
