//! modkit manages the identity metadata of a Minecraft Forge mod repository.
//!
//! A mod project stores its identity in two coupled artifacts: the
//! `mcmod.info` JSON document (name, description, credits, url) and
//! `build.gradle` (version, group, archive base name, optional coremod
//! declaration). The [`descriptor`] module reads and writes both as a single
//! logical record; the [`rename`] module handles the directory-tree rename
//! and package-statement rewrite that a module-id change requires.
//!
//! The crate is usable as a library, but the primary consumer is the
//! `modkit` binary in `main.rs`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod descriptor;
pub mod project;
pub mod rename;

// Re-export main types for convenience
pub use cli::{Cli, Commands, CoremodAction, CoremodArgs, InfoArgs};
pub use commands::{run_coremod, run_info};
pub use config::Config;
pub use descriptor::{DescriptorError, DescriptorStore, Field, ModDescriptor};
pub use project::{find_root, ProjectError};
pub use rename::{RenameError, RenamePlan, RenameTask};
