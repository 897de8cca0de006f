//! CLI command definitions using clap.
//!
//! The static surface covers maintenance commands (schema, tools, prompts);
//! everything else falls through to the dynamic tool tree derived from the
//! registry (see build.rs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sitekit - site tools for AI agents and the command line
#[derive(Parser, Debug)]
#[command(name = "sitekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the AI tool-definition schemas as JSON
    Schema,

    /// List registered tools and their command paths
    Tools,

    /// List available prompts
    Prompts,

    /// Compose a prompt and print it
    Prompt {
        /// Prompt id to compose
        id: String,

        /// Also print the resolved tool list
        #[arg(short, long)]
        tools: bool,
    },

    /// Anything else is routed through the derived tool command tree
    #[command(external_subcommand)]
    Tool(Vec<String>),
}
