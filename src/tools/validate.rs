//! Parameter validation and coercion
//!
//! Checks an untyped name->value input record against a tool's declared
//! parameter list. All violations are collected in one pass so callers see
//! the full set at once, and the positional argument list is built in
//! declared order with the documented string coercions applied.

use serde_json::{Map, Value};

use super::param::{ParamKind, ParamSpec};

/// Boolean spellings accepted from untyped callers
const TRUE_WORDS: [&str; 3] = ["true", "1", "yes"];
const FALSE_WORDS: [&str; 3] = ["false", "0", "no"];

/// Validate an input record against a parameter list, collecting every
/// violation: missing required params, unknown keys, kind mismatches, and
/// enum values outside the allowed set.
pub fn validate(params: &[ParamSpec], input: &Map<String, Value>) -> Vec<String> {
    let mut violations = Vec::new();

    for param in params {
        match input.get(&param.name) {
            None => {
                if !param.optional {
                    violations.push(format!("missing required parameter '{}'", param.name));
                }
            }
            Some(value) => {
                if let Some(violation) = check_kind(param, value) {
                    violations.push(violation);
                }
            }
        }
    }

    for key in input.keys() {
        if !params.iter().any(|p| &p.name == key) {
            violations.push(format!("unknown parameter '{}'", key));
        }
    }

    violations
}

/// Check a single value against its declared kind. Returns the violation
/// message, or None when the value is acceptable (possibly via coercion).
fn check_kind(param: &ParamSpec, value: &Value) -> Option<String> {
    match &param.kind {
        ParamKind::String => match value {
            Value::String(_) => None,
            other => Some(mismatch(&param.name, "string", other)),
        },
        ParamKind::Number => match value {
            Value::Number(_) => None,
            Value::String(s) if s.trim().parse::<f64>().is_ok() => None,
            other => Some(mismatch(&param.name, "number", other)),
        },
        ParamKind::Boolean => match value {
            Value::Bool(_) => None,
            Value::String(s) if parse_boolean_word(s).is_some() => None,
            other => Some(mismatch(&param.name, "boolean", other)),
        },
        ParamKind::Object => match value {
            Value::Object(_) => None,
            other => Some(mismatch(&param.name, "object", other)),
        },
        ParamKind::Array => match value {
            Value::Array(_) => None,
            other => Some(mismatch(&param.name, "array", other)),
        },
        ParamKind::Null => match value {
            Value::Null => None,
            other => Some(mismatch(&param.name, "null", other)),
        },
        ParamKind::Enum => match value {
            Value::String(s) if param.values.iter().any(|v| v == s) => None,
            Value::String(s) => Some(format!(
                "parameter '{}' must be one of [{}], got '{}'",
                param.name,
                param.values.join(", "),
                s
            )),
            other => Some(mismatch(&param.name, "enum", other)),
        },
        // Unrecognized declared kinds cannot be checked; accept anything
        ParamKind::Any | ParamKind::Other(_) => None,
    }
}

/// Build the positional argument list in declared parameter order.
/// Absent optional parameters become Null; boolean-typed parameters received
/// as recognized truthy/falsy strings are coerced to real booleans; all other
/// values pass through unchanged. Call only after `validate` returned empty.
pub fn build_args(params: &[ParamSpec], input: &Map<String, Value>) -> Vec<Value> {
    params
        .iter()
        .map(|param| match input.get(&param.name) {
            None => Value::Null,
            Some(value) => coerce(param, value),
        })
        .collect()
}

fn coerce(param: &ParamSpec, value: &Value) -> Value {
    if param.kind == ParamKind::Boolean
        && let Value::String(s) = value
        && let Some(b) = parse_boolean_word(s)
    {
        return Value::Bool(b);
    }
    value.clone()
}

/// Recognize the accepted boolean spellings, case-insensitively
fn parse_boolean_word(s: &str) -> Option<bool> {
    let lowered = s.trim().to_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> String {
    format!(
        "parameter '{}' expects {}, got {}",
        name,
        expected,
        json_type_name(got)
    )
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
