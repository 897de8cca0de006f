//! Command-path derivation
//!
//! Turns a camelCase tool name into a hierarchical CLI command path
//! (`getSiteConfig` -> `site config get`). The classification is a
//! best-effort heuristic kept in one place so its behavior can be pinned by
//! tests; ambiguous >=3-word names are not "corrected" beyond what the rules
//! below state.

use serde::{Deserialize, Serialize};

use super::descriptor::ToolSpec;

/// CLI-facing view of a tool: the derived command path plus the full
/// descriptor. Derived on every query, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Hierarchical path; everything before the last element is the nested
    /// subcommand path, the last element is the leaf command name
    pub command: Vec<String>,
    #[serde(flatten)]
    pub spec: ToolSpec,
}

impl CommandSpec {
    /// Derive the command path for a tool spec
    pub fn from_spec(spec: &ToolSpec) -> Self {
        Self {
            command: derive_command_path(&spec.name, &spec.module),
            spec: spec.clone(),
        }
    }

    /// Nested subcommand path (everything but the leaf)
    pub fn group_path(&self) -> &[String] {
        &self.command[..self.command.len().saturating_sub(1)]
    }

    /// Leaf command name
    pub fn leaf(&self) -> &str {
        self.command.last().map(String::as_str).unwrap_or_default()
    }
}

/// Derive a command path from a tool name and its module label.
///
/// Rules:
/// 1. Split the name into a leading lowercase verb and a PascalCase rest.
///    No split -> the whole name, lowercased, as a single segment.
/// 2. Split the rest into words at lowercase->uppercase boundaries.
/// 3. One word -> [word, verb]. Two words -> [w1, w2, verb].
/// 4. Three or more words -> if the module matches the first word, or the
///    first two words joined by a hyphen, collapse that prefix into one
///    segment; otherwise the first word is the resource and the remaining
///    words nest under it. Verb always last.
pub fn derive_command_path(name: &str, module: &str) -> Vec<String> {
    let verb_len = name.chars().take_while(|c| c.is_ascii_lowercase()).count();
    let (verb, rest) = name.split_at(verb_len);

    if verb.is_empty() || rest.is_empty() {
        return vec![name.to_lowercase()];
    }

    let words = split_words(rest);
    let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

    match lowered.len() {
        0 => vec![name.to_lowercase()],
        1 => vec![lowered[0].clone(), verb.to_string()],
        2 => vec![lowered[0].clone(), lowered[1].clone(), verb.to_string()],
        _ => {
            let module = module.to_lowercase();
            let two_word_prefix = format!("{}-{}", lowered[0], lowered[1]);

            let (collapsed, remaining) = if module == lowered[0] {
                (module, &lowered[1..])
            } else if module == two_word_prefix {
                (module, &lowered[2..])
            } else {
                // Unrecognized prefix: first word is the resource, the
                // remaining words are nested sub-resources
                (lowered[0].clone(), &lowered[1..])
            };

            let mut path = vec![collapsed];
            path.extend(remaining.iter().cloned());
            path.push(verb.to_string());
            path
        }
    }
}

/// Split a PascalCase string into words at lowercase->uppercase boundaries
fn split_words(rest: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in rest.chars() {
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
