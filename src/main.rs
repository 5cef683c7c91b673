//! CLI entry point for modkit. Parses command-line arguments with clap,
//! discovers the mod project root by walking upward from the working
//! directory (or `--root`) until a `build.gradle` is found, and dispatches
//! to the matching command handler.
//!
//! All errors are printed to stderr and exit with code 1; business logic
//! lives in the command modules, never here.

use anyhow::Context;
use clap::Parser;
use modkit::cli::{Cli, Commands};
use modkit::commands::{run_coremod, run_info};
use modkit::project;
use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Root discovery starts from --root if given, else the current directory
    let start = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let root = project::find_root(&start)?;

    if cli.verbose {
        println!("mod root is {}", root.display());
    }

    match cli.command {
        Commands::Info(args) => run_info(&args, &root, cli.verbose),
        Commands::Coremod(args) => run_coremod(&args, &root, cli.verbose),
    }
}
