//! Tool registry
//!
//! Owns the tool catalog and exposes the three registry operations: AI
//! function-calling schema generation, CLI command-tree derivation, and
//! validated tool invocation. The registry itself is side-effect-free apart
//! from dispatching to the wrapped handler.

use log::debug;
use serde_json::{Map, Value, json};

use crate::error::{Result, SitekitError};

use super::catalog::ToolCatalog;
use super::command::CommandSpec;
use super::descriptor::{ToolSpec, Visibility};
use super::param::ParamKind;
use super::validate::{build_args, validate};

/// Registry over a read-only tool catalog
#[derive(Clone, Default)]
pub struct ToolRegistry {
    catalog: ToolCatalog,
}

impl ToolRegistry {
    /// Create a registry over the given catalog
    pub fn new(catalog: ToolCatalog) -> Self {
        Self { catalog }
    }

    /// Access the underlying catalog
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// AI function-calling schemas for every public tool
    pub fn tool_definitions(&self) -> Vec<Value> {
        self.catalog
            .specs()
            .into_iter()
            .filter(|s| s.visibility == Visibility::Public)
            .map(definition_schema)
            .collect()
    }

    /// CLI command descriptors for every non-private tool. Paths are derived
    /// fresh on every call, never cached across catalog changes.
    pub fn cli_commands(&self) -> Vec<CommandSpec> {
        self.catalog
            .specs()
            .into_iter()
            .filter(|s| s.visibility != Visibility::Private)
            .map(CommandSpec::from_spec)
            .collect()
    }

    /// Public tool descriptors belonging to a module
    pub fn public_tools_in_module(&self, module: &str) -> Vec<&ToolSpec> {
        self.catalog
            .specs_in_module(module)
            .into_iter()
            .filter(|s| s.visibility == Visibility::Public)
            .collect()
    }

    /// Invoke a tool by name with an untyped name->value parameter record.
    ///
    /// Validation collects every violation before failing; on success the
    /// handler receives positional arguments in declared parameter order.
    /// Handler errors are wrapped, preserving the original message.
    pub async fn invoke(&self, name: &str, parameters: Value) -> Result<Value> {
        let entry = self.catalog.get(name).ok_or_else(|| SitekitError::UnknownTool {
            tool: name.to_string(),
            parameters: parameters.clone(),
        })?;

        let input = match &parameters {
            Value::Null => Map::new(),
            Value::Object(map) => map.clone(),
            other => {
                return Err(SitekitError::ParameterValidation {
                    tool: name.to_string(),
                    parameters: parameters.clone(),
                    violations: vec![format!(
                        "parameters must be an object, got {}",
                        match other {
                            Value::Array(_) => "array",
                            Value::String(_) => "string",
                            Value::Number(_) => "number",
                            Value::Bool(_) => "boolean",
                            _ => "null",
                        }
                    )],
                });
            }
        };

        let violations = validate(&entry.spec.params, &input);
        if !violations.is_empty() {
            return Err(SitekitError::ParameterValidation {
                tool: name.to_string(),
                parameters,
                violations,
            });
        }

        let args = build_args(&entry.spec.params, &input);
        debug!("invoking tool '{}' with {} args", name, args.len());

        entry
            .handler
            .invoke(args)
            .await
            .map_err(|cause| SitekitError::ToolExecution {
                tool: name.to_string(),
                parameters,
                message: cause.to_string(),
                cause,
            })
    }
}

/// Build the AI schema object for one tool descriptor
fn definition_schema(spec: &ToolSpec) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in &spec.params {
        let mut prop = Map::new();
        prop.insert("type".to_string(), json!(param.kind.json_type()));
        prop.insert("description".to_string(), json!(param.description));
        if param.kind == ParamKind::Enum {
            prop.insert("enum".to_string(), json!(param.values));
        }
        if let Some(default) = &param.default {
            prop.insert("default".to_string(), default.clone());
        }
        properties.insert(param.name.clone(), Value::Object(prop));

        if !param.optional {
            required.push(param.name.clone());
        }
    }

    json!({
        "name": spec.name,
        "description": spec.description_or_fallback(),
        "parameters": {
            "type": "object",
            "properties": properties,
            "required": required,
        }
    })
}
