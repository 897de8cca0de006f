use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use sitekit::cli::commands::{Cli, Commands};
use sitekit::cli::run_tool_args;
use sitekit::config::Config;
use sitekit::content::builtin_catalog;
use sitekit::handler::Toolkit;
use sitekit::prompt::PromptCatalog;
use sitekit::tools::ToolRegistry;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sitekit")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("sitekit.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_toolkit(config: &Config) -> Result<Toolkit> {
    let catalog = builtin_catalog(config.content.dir.clone());
    let prompts = match &config.prompts.catalog {
        Some(path) => PromptCatalog::from_file(path)?,
        None => PromptCatalog::default_pack(),
    };
    Ok(Toolkit::new(ToolRegistry::new(catalog), prompts))
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let toolkit = build_toolkit(config)?;

    match &cli.command {
        None | Some(Commands::Tools) => print_tools(&toolkit),
        Some(Commands::Schema) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&toolkit.tool_definitions())?
            );
            Ok(())
        }
        Some(Commands::Prompts) => print_prompts(&toolkit),
        Some(Commands::Prompt { id, tools }) => print_prompt(&toolkit, id, *tools),
        Some(Commands::Tool(argv)) => {
            let result = run_tool_args(&toolkit, argv).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

fn print_tools(toolkit: &Toolkit) -> Result<()> {
    for command in toolkit.cli_commands() {
        println!(
            "{:<28} {}",
            command.command.join(" ").cyan(),
            command.spec.description_or_fallback()
        );
    }
    Ok(())
}

fn print_prompts(toolkit: &Toolkit) -> Result<()> {
    for id in toolkit.prompts().ids() {
        match toolkit.prompts().get(id).and_then(|p| p.title.as_deref()) {
            Some(title) => println!("{:<20} {}", id.cyan(), title),
            None => println!("{}", id.cyan()),
        }
    }
    Ok(())
}

fn print_prompt(toolkit: &Toolkit, id: &str, with_tools: bool) -> Result<()> {
    let composed = toolkit.build_prompt(id)?;
    println!("{}", composed.system_prompt);

    if with_tools {
        println!();
        println!("{}", "Required tools:".bold());
        for tool in &composed.tools {
            println!("  {} ({})", tool.name.cyan(), tool.module);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    run_application(&cli, &config).await
}
