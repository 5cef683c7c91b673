//! The coremod command: show, set or clear the FMLCorePlugin declaration
//! in build.gradle. The fully qualified class is derived from the current
//! mod group, so `set LoadingPlugin` on a mod with group
//! `com.piston.mc.mymod` declares `com.piston.mc.mymod.coremod.LoadingPlugin`.

use crate::cli::{CoremodAction, CoremodArgs};
use crate::config::Config;
use crate::descriptor::DescriptorStore;
use anyhow::Result;
use std::path::Path;

pub fn run_coremod(args: &CoremodArgs, root: &Path, verbose: bool) -> Result<()> {
    let config = Config::load(root);
    let mut store = DescriptorStore::open(root, &config)?;

    match &args.action {
        None => {
            match store.coremod_class() {
                Some(class) => println!("{}", class),
                None => println!("(none)"),
            }
            Ok(())
        }
        Some(CoremodAction::Set { class }) => {
            let full_class = format!("{}.coremod.{}", store.descriptor().group(), class);
            store.set_coremod(Some(&full_class))?;
            if verbose {
                println!("coremod class set to {}", full_class);
            }
            Ok(())
        }
        Some(CoremodAction::Clear) => {
            if store.coremod_class().is_none() {
                println!("no coremod declaration present");
                return Ok(());
            }
            store.set_coremod(None)?;
            if verbose {
                println!("coremod declaration removed");
            }
            Ok(())
        }
    }
}
