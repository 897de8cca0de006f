//! Tool system
//!
//! Descriptors, catalog, validation, command-path derivation, and the
//! registry that exposes tools to the AI and CLI surfaces.

pub mod catalog;
pub mod command;
pub mod descriptor;
pub mod param;
pub mod registry;
pub mod validate;

pub use catalog::{CatalogEntry, ToolCatalog, ToolHandler, handler_fn};
pub use command::{CommandSpec, derive_command_path};
pub use descriptor::{ReturnSpec, ToolSpec, Visibility};
pub use param::{ParamKind, ParamSpec};
pub use registry::ToolRegistry;
