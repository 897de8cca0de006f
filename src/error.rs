//! Error types for sitekit
//!
//! Centralized error handling using thiserror. Validation and execution
//! failures carry the tool name and the caller's parameters so both surfaces
//! can report them without re-deriving context.

use serde_json::Value;
use thiserror::Error;

/// All error types that can occur in sitekit
#[derive(Debug, Error)]
pub enum SitekitError {
    /// Requested tool name is not registered
    #[error("Unknown tool: {tool}")]
    UnknownTool { tool: String, parameters: Value },

    /// Caller input did not satisfy the tool's parameter list.
    /// `violations` is the complete set found in one pass, never just the first.
    #[error("Parameter validation failed for '{tool}': {}", violations.join("; "))]
    ParameterValidation {
        tool: String,
        parameters: Value,
        violations: Vec<String>,
    },

    /// The wrapped handler returned or threw an error
    #[error("Tool '{tool}' failed: {message}")]
    ToolExecution {
        tool: String,
        parameters: Value,
        message: String,
        cause: eyre::Report,
    },

    /// Requested root prompt id is absent from the catalog
    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    /// A prompt is reachable from itself along one resolution path
    #[error("Circular prompt dependency detected at '{0}'")]
    CircularDependency(String),

    /// Catalog/config load or parse error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SitekitError {
    /// Stable machine-readable code for external callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool { .. } => "UNKNOWN_TOOL",
            Self::ParameterValidation { .. } => "PARAMETER_VALIDATION_FAILED",
            Self::ToolExecution { .. } => "TOOL_EXECUTION_FAILED",
            Self::PromptNotFound(_) => "PROMPT_NOT_FOUND",
            Self::CircularDependency(_) => "CIRCULAR_DEPENDENCY",
            Self::Catalog(_) => "CATALOG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }

    /// True for errors raised before the handler ran
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownTool { .. } | Self::ParameterValidation { .. }
        )
    }
}

/// Result type alias for sitekit operations
pub type Result<T> = std::result::Result<T, SitekitError>;
