//! Prompt system
//!
//! Prompt descriptors, the catalog they live in, and the builder that
//! resolves dependency graphs into composed instruction blocks.

pub mod builder;
pub mod catalog;

pub use builder::{ComposedPrompt, PromptBuilder};
pub use catalog::{DependencyRef, PromptCatalog, PromptSpec};
