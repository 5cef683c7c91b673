//! Command-line interface definition using the clap derive macros. The
//! `--root` and `--verbose` flags are global and may appear before or after
//! the subcommand; `--root` sets where project-root discovery starts, not
//! the root itself.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modkit")]
#[command(author, version, about = "Metadata manager for Minecraft Forge mod projects")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory to start project-root discovery from (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get or set mod metadata fields
    Info(InfoArgs),

    /// Manage the coremod declaration in build.gradle
    Coremod(CoremodArgs),
}

#[derive(Args, Default)]
pub struct InfoArgs {
    /// Field to set: name, description (or desc), credits, url, version.
    /// Omit to print all fields.
    #[arg(value_name = "FIELD")]
    pub field: Option<String>,

    /// New value for the field
    #[arg(value_name = "VALUE")]
    pub value: Option<String>,
}

#[derive(Args, Default)]
pub struct CoremodArgs {
    /// Omit to print the currently configured coremod class
    #[command(subcommand)]
    pub action: Option<CoremodAction>,
}

#[derive(Subcommand)]
pub enum CoremodAction {
    /// Set the coremod class (short name; the package is derived from the mod group)
    Set {
        /// Class name without the package, e.g. LoadingPlugin
        class: String,
    },

    /// Remove the coremod declaration entirely
    Clear,
}
