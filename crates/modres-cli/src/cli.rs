//! CLI argument definitions for modres.
//!
//! Each command corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use modres_core::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "modres",
    version,
    about = "Resolve module load order from declared dependencies",
    long_about = "modres reads a Modules.toml, validates version constraints and conflicts, \
                  and prints the order in which modules must be loaded so that every module \
                  comes after its dependencies."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the module manifest (defaults to searching upward for Modules.toml)
    #[arg(short, long, global = true, env = "MODRES_MANIFEST", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the module load order
    Resolve {
        /// Output format: text or json
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<OutputFormat>,
    },

    /// Report every missing dependency, version problem, conflict and cycle
    Check,

    /// Display the module dependency tree
    Tree {
        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,
        /// Show dependents instead of dependencies
        #[arg(short, long)]
        inverted: bool,
        /// Show which modules pull in the given module
        #[arg(long, value_name = "MODULE")]
        why: Option<String>,
    },

    /// List modules, optionally filtered by tag or interface
    List {
        /// Only modules carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Only modules implementing this interface
        #[arg(long)]
        interface: Option<String>,
        /// Output format: text or json
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<OutputFormat>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
