//! Command dispatch and handler modules.

mod check;
mod list;
mod resolve;
mod tree;

use miette::Result;
use modres_core::config::GlobalConfig;
use modres_util::errors::ModresError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    apply_color_config();

    let cwd = std::env::current_dir().map_err(ModresError::Io)?;
    let manifest = cli.manifest;
    match cli.command {
        Command::Resolve { format } => resolve::exec(&cwd, manifest, format),
        Command::Check => check::exec(&cwd, manifest),
        Command::Tree {
            depth,
            inverted,
            why,
        } => tree::exec(&cwd, manifest, depth, inverted, why),
        Command::List {
            tag,
            interface,
            format,
        } => list::exec(&cwd, manifest, tag, interface, format),
    }
}

/// Honour `[output] color = false`. A broken config file is reported by the
/// command itself when it loads the config.
fn apply_color_config() {
    if let Ok(config) = GlobalConfig::load() {
        if !config.output.color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
    }
}
