//! Dynamic tool command tree
//!
//! Turns the registry's derived CommandSpecs into a nested clap command
//! tree: everything before the last path element is a subcommand group, the
//! last element is the leaf. Every parameter becomes a named flag; the first
//! required string parameter is promoted to a positional argument. Flag
//! values stay strings on the wire - the registry's validation layer owns
//! number/boolean coercion.

use std::collections::HashMap;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgMatches, Command};
use serde_json::{Map, Value};

use crate::handler::Toolkit;
use crate::tools::{CommandSpec, ParamKind, ParamSpec};

/// Build the clap command tree for a set of derived command specs
pub fn build_tool_tree(commands: &[CommandSpec]) -> Command {
    let mut root = Command::new("tool")
        .no_binary_name(true)
        .subcommand_required(true);

    let specs: Vec<(&[String], &CommandSpec)> = commands
        .iter()
        .map(|c| (c.command.as_slice(), c))
        .collect();
    for sub in subtrees(specs) {
        root = root.subcommand(sub);
    }
    root
}

/// Group specs by their leading path segment, recursing into the remainder
fn subtrees<'a>(specs: Vec<(&'a [String], &'a CommandSpec)>) -> Vec<Command> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<(&'a [String], &'a CommandSpec)>> = HashMap::new();

    for (path, spec) in specs {
        let head = path[0].clone();
        if !groups.contains_key(&head) {
            order.push(head.clone());
        }
        groups.entry(head).or_default().push((&path[1..], spec));
    }

    order
        .into_iter()
        .map(|head| {
            let members = groups.remove(&head).unwrap_or_default();
            let mut cmd = Command::new(head);
            let mut children = Vec::new();

            for (rest, spec) in members {
                if rest.is_empty() {
                    cmd = leaf_command(cmd, spec);
                } else {
                    children.push((rest, spec));
                }
            }
            for sub in subtrees(children) {
                cmd = cmd.subcommand(sub);
            }
            cmd
        })
        .collect()
}

/// Attach a leaf tool's about text and parameter flags
fn leaf_command(mut cmd: Command, spec: &CommandSpec) -> Command {
    cmd = cmd.about(spec.spec.description_or_fallback());
    let mut positional_taken = false;
    for param in &spec.spec.params {
        cmd = cmd.arg(param_arg(param, &mut positional_taken));
    }
    cmd
}

fn param_arg(param: &ParamSpec, positional_taken: &mut bool) -> Arg {
    let mut arg = Arg::new(param.name.clone()).help(param.description.clone());

    let promote = !*positional_taken && !param.optional && param.kind == ParamKind::String;
    if promote {
        *positional_taken = true;
        arg = arg.required(true);
    } else {
        arg = arg
            .long(param.name.clone())
            .value_name(param.name.to_uppercase())
            .required(!param.optional);
    }

    if param.kind == ParamKind::Enum && !param.values.is_empty() {
        arg = arg.value_parser(PossibleValuesParser::new(param.values.clone()));
    }
    if let Some(default) = &param.default {
        arg = arg.default_value(default_string(default)).required(false);
    }
    arg
}

/// CLI rendering of a declared default value
fn default_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Walk the matched subcommand chain down to the leaf and find its spec
pub fn find_invocation<'a>(
    commands: &'a [CommandSpec],
    matches: &ArgMatches,
) -> Option<(&'a CommandSpec, ArgMatches)> {
    let mut path: Vec<String> = Vec::new();
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        path.push(name.to_string());
        current = sub;
    }
    let spec = commands.iter().find(|c| c.command == path)?;
    Some((spec, current.clone()))
}

/// Turn leaf matches back into the name->value record the registry expects
pub fn collect_parameters(spec: &CommandSpec, matches: &ArgMatches) -> Value {
    let mut map = Map::new();
    for param in &spec.spec.params {
        if let Some(raw) = matches.get_one::<String>(&param.name) {
            map.insert(param.name.clone(), parse_cli_value(&param.kind, raw));
        }
    }
    Value::Object(map)
}

/// String and enum values stay strings; structured kinds are parsed as JSON
/// when possible and fall back to the raw string (the validation layer
/// reports what it cannot accept).
fn parse_cli_value(kind: &ParamKind, raw: &str) -> Value {
    match kind {
        ParamKind::String | ParamKind::Enum => Value::String(raw.to_string()),
        _ => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

/// Parse tool argv against the derived tree and invoke through the facade
pub async fn run_tool_args(toolkit: &Toolkit, argv: &[String]) -> eyre::Result<Value> {
    let commands = toolkit.cli_commands();
    let matches = build_tool_tree(&commands).try_get_matches_from(argv)?;
    let (spec, leaf) = find_invocation(&commands, &matches)
        .ok_or_else(|| eyre::eyre!("no tool matches this command"))?;
    let parameters = collect_parameters(spec, &leaf);
    Ok(toolkit.use_tool(&spec.spec.name, parameters).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ParamSpec, ToolSpec};
    use serde_json::json;

    fn sample_commands() -> Vec<CommandSpec> {
        vec![
            CommandSpec::from_spec(
                &ToolSpec::new("addSite", "site")
                    .with_description("Create a new site")
                    .with_param(ParamSpec::string("name").with_description("Site name"))
                    .with_param(ParamSpec::string("description").optional()),
            ),
            CommandSpec::from_spec(
                &ToolSpec::new("getSiteConfig", "site")
                    .with_param(ParamSpec::string("site"))
                    .with_param(
                        ParamSpec::new("format", ParamKind::Enum)
                            .optional()
                            .with_default(json!("yaml"))
                            .with_values(["yaml", "json"]),
                    ),
            ),
            CommandSpec::from_spec(
                &ToolSpec::new("addPage", "page")
                    .with_param(ParamSpec::string("site"))
                    .with_param(ParamSpec::string("path"))
                    .with_param(ParamSpec::new("weight", ParamKind::Number).optional()),
            ),
        ]
    }

    fn parse(argv: &[&str]) -> (Vec<CommandSpec>, ArgMatches) {
        let commands = sample_commands();
        let matches = build_tool_tree(&commands)
            .try_get_matches_from(argv)
            .unwrap();
        (commands, matches)
    }

    #[test]
    fn test_first_required_string_is_positional() {
        let (commands, matches) = parse(&["site", "add", "blog"]);
        let (spec, leaf) = find_invocation(&commands, &matches).unwrap();

        assert_eq!(spec.spec.name, "addSite");
        let params = collect_parameters(spec, &leaf);
        assert_eq!(params, json!({"name": "blog"}));
    }

    #[test]
    fn test_optional_flag_collected() {
        let (commands, matches) = parse(&["site", "add", "blog", "--description", "My blog"]);
        let (spec, leaf) = find_invocation(&commands, &matches).unwrap();

        let params = collect_parameters(spec, &leaf);
        assert_eq!(params, json!({"name": "blog", "description": "My blog"}));
    }

    #[test]
    fn test_nested_subcommand_path() {
        let (commands, matches) = parse(&["site", "config", "get", "blog"]);
        let (spec, leaf) = find_invocation(&commands, &matches).unwrap();

        assert_eq!(spec.spec.name, "getSiteConfig");
        let params = collect_parameters(spec, &leaf);
        // Enum default applies even when the flag is omitted
        assert_eq!(params, json!({"site": "blog", "format": "yaml"}));
    }

    #[test]
    fn test_enum_flag_accepts_allowed_value() {
        let (commands, matches) = parse(&["site", "config", "get", "blog", "--format", "json"]);
        let (spec, leaf) = find_invocation(&commands, &matches).unwrap();

        let params = collect_parameters(spec, &leaf);
        assert_eq!(params["format"], "json");
    }

    #[test]
    fn test_enum_flag_rejects_unknown_value() {
        let commands = sample_commands();
        let result = build_tool_tree(&commands)
            .try_get_matches_from(["site", "config", "get", "blog", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_positional_fails() {
        let commands = sample_commands();
        let result = build_tool_tree(&commands).try_get_matches_from(["site", "add"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_second_required_string_is_a_flag() {
        // Only the first required string param is promoted; the rest stay flags
        let (commands, matches) = parse(&["page", "add", "blog", "--path", "about"]);
        let (spec, leaf) = find_invocation(&commands, &matches).unwrap();

        assert_eq!(spec.spec.name, "addPage");
        let params = collect_parameters(spec, &leaf);
        assert_eq!(params, json!({"site": "blog", "path": "about"}));
    }

    #[test]
    fn test_number_flag_parsed_as_json() {
        let (commands, matches) =
            parse(&["page", "add", "blog", "--path", "about", "--weight", "42"]);
        let (spec, leaf) = find_invocation(&commands, &matches).unwrap();

        let params = collect_parameters(spec, &leaf);
        assert_eq!(params["weight"], json!(42));
    }

    #[test]
    fn test_unknown_group_fails() {
        let commands = sample_commands();
        let result = build_tool_tree(&commands).try_get_matches_from(["theme", "add"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_tool_args_end_to_end() {
        use crate::handler::Toolkit;
        use crate::prompt::PromptCatalog;
        use crate::tools::catalog::handler_fn;
        use crate::tools::{ToolCatalog, ToolRegistry};

        let mut catalog = ToolCatalog::new();
        catalog.add(
            ToolSpec::new("addSite", "site").with_param(ParamSpec::string("name")),
            handler_fn(|args| async move { Ok(json!({"created": args[0]})) }),
        );
        let toolkit = Toolkit::new(ToolRegistry::new(catalog), PromptCatalog::new());

        let result = run_tool_args(&toolkit, &["site".to_string(), "add".to_string(), "blog".to_string()])
            .await
            .unwrap();
        assert_eq!(result, json!({"created": "blog"}));
    }

    #[tokio::test]
    async fn test_run_tool_args_bad_argv_is_error() {
        use crate::handler::Toolkit;

        let toolkit = Toolkit::default();
        let err = run_tool_args(&toolkit, &["nope".to_string()]).await;
        assert!(err.is_err());
    }
}
