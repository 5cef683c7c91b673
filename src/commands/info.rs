//! The info command: query or set mod metadata fields.
//!
//! Query mode prints every stored and derived field. Set mode changes
//! exactly one field, writes both artifacts back, and — when the change
//! renames the module id — runs the tree rename before reporting success.
//! The artifacts are written before the rename starts; a failure in the
//! rename leaves them updated and the tree stale, which mirrors how this
//! tool has always behaved (see DESIGN.md).

use crate::cli::InfoArgs;
use crate::config::Config;
use crate::descriptor::{self, DescriptorStore, Field, ModDescriptor};
use crate::project;
use crate::rename::RenamePlan;
use anyhow::{bail, Result};
use std::path::Path;

pub fn run_info(args: &InfoArgs, root: &Path, verbose: bool) -> Result<()> {
    let config = Config::load(root);
    let mut store = DescriptorStore::open(root, &config)?;

    let (field, value) = match (&args.field, &args.value) {
        (None, None) => {
            print_fields(store.descriptor());
            return Ok(());
        }
        (Some(field), Some(value)) => (field.as_str(), value.as_str()),
        _ => bail!("usage: modkit info [<field> <value>]"),
    };

    let field = Field::parse(field)?;
    let outcome = store.set(field, value)?;

    let descriptor = store.descriptor();
    let new_modid = descriptor.modid();
    if new_modid != outcome.old_modid {
        if verbose {
            println!(
                "module id changed ({} -> {}), renaming trees",
                outcome.old_modid, new_modid
            );
        }
        let prefix = descriptor.group_prefix();
        let plan = RenamePlan {
            source_from: root.join(descriptor::source_root(prefix, &outcome.old_modid)),
            source_to: root.join(descriptor.source_root()),
            assets_from: root.join(descriptor::asset_root(&outcome.old_modid)),
            assets_to: root.join(descriptor.asset_root()),
            java_base: root.join(project::JAVA_ROOT),
            modid: new_modid,
            group: descriptor.group(),
            version: descriptor.version.clone(),
        };
        plan.execute()?;
    }

    Ok(())
}

fn print_fields(d: &ModDescriptor) {
    println!("name:        {}", d.name);
    println!("description: {}", d.description);
    println!("credits:     {}", d.credits);
    println!("url:         {}", d.url);
    println!("version:     {}", d.version);
    println!("[modid]:     {}", d.modid());
    println!("[archive]:   {}", d.archive_base_name());
    println!("[group]:     {}", d.group());
}
