//! The rename cascade that a module-id change triggers: rename the source
//! and asset directory trees, regenerate the ModInfo marker file, then
//! rewrite the package declaration of every Java file under the renamed
//! source tree.
//!
//! The two directory renames are strictly sequential and happen before the
//! file rewrites fan out. The rewrites run on a rayon pool (sized to host
//! parallelism) with no shared mutable state: each task owns exactly one
//! file end to end, so no locking is needed. Each file is rewritten through
//! a sibling `.tmp` file followed by an atomic rename, so a task that fails
//! partway never leaves its file corrupted. There is no rollback across
//! tasks or across the directory renames; the first task error fails the
//! whole invocation and already-completed tasks stay applied.

use rayon::prelude::*;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("destination already exists: {0}")]
    PathConflict(PathBuf),
    #[error("failed to rewrite {path}: {source}")]
    Rewrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Unit of concurrent work: one file, one target package string. Tasks are
/// mutually independent; task-to-file assignment is a bijection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTask {
    pub path: PathBuf,
    pub package: String,
}

/// Everything the cascade needs, with all paths absolute
pub struct RenamePlan {
    pub source_from: PathBuf,
    pub source_to: PathBuf,
    pub assets_from: PathBuf,
    pub assets_to: PathBuf,
    /// Base of the Java tree; package statements are derived from paths
    /// relative to this directory
    pub java_base: PathBuf,
    pub modid: String,
    pub group: String,
    pub version: String,
}

impl RenamePlan {
    /// Run the full cascade. Both destinations are conflict-checked before
    /// either rename happens, so a conflict aborts with nothing moved.
    pub fn execute(&self) -> Result<(), RenameError> {
        for dest in [&self.source_to, &self.assets_to] {
            if dest.exists() {
                return Err(RenameError::PathConflict(dest.clone()));
            }
        }

        fs::rename(&self.source_from, &self.source_to)?;
        fs::rename(&self.assets_from, &self.assets_to)?;

        self.write_mod_info()?;

        let tasks = self.collect_tasks();
        tasks.par_iter().try_for_each(|task| {
            rewrite_package_line(&task.path, &task.package).map_err(|source| {
                RenameError::Rewrite {
                    path: task.path.clone(),
                    source,
                }
            })?;
            // Completion order, not walk order; unordered across runs
            println!("edited {}", task.path.display());
            Ok(())
        })
    }

    /// Overwrite the ModInfo marker file in the renamed source tree. Always
    /// fully regenerated, never merged.
    fn write_mod_info(&self) -> Result<(), RenameError> {
        let mut content = String::new();
        content.push_str(&format!("package {};\n", self.group));
        content.push_str("// This file is automatically generated by modkit\n");
        content.push_str("// Do not edit this file directly\n");
        content.push_str("public interface ModInfo {\n");
        content.push_str(&format!("    String Id = \"{}\";\n", self.modid));
        content.push_str(&format!("    String Version = \"{}\";\n", self.version));
        content.push_str("}\n");
        fs::write(self.source_to.join("ModInfo.java"), content)?;
        Ok(())
    }

    /// Walk the renamed source tree and pair every Java file with its
    /// intended package string.
    pub fn collect_tasks(&self) -> Vec<RenameTask> {
        let mut tasks = Vec::new();
        for entry in WalkDir::new(&self.source_to)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "java") {
                continue;
            }
            let Some(parent) = path.parent() else {
                continue;
            };
            let Ok(relative) = parent.strip_prefix(&self.java_base) else {
                // Should never happen: the walk is rooted inside java_base
                continue;
            };
            let package = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(".");
            tasks.push(RenameTask {
                path: path.to_path_buf(),
                package,
            });
        }
        tasks
    }
}

/// Replace the first line of `path` with `package <package>;` and keep the
/// rest of the file byte-identical. The first line is dropped blindly: it
/// is assumed to be the old package declaration, and no check is made.
///
/// The new content goes to a sibling `.tmp` file which then atomically
/// replaces the original, so the original is never left half-written.
fn rewrite_package_line(path: &Path, package: &str) -> io::Result<()> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut old_first_line = String::new();
    reader.read_line(&mut old_first_line)?;

    let tmp = tmp_path(path);
    let mut writer = BufWriter::new(File::create(&tmp)?);
    writeln!(writer, "package {};", package)?;
    io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn plan(root: &Path, old: &str, new: &str) -> RenamePlan {
        let java_base = root.join("src/main/java");
        RenamePlan {
            source_from: java_base.join("com/piston/mc").join(old),
            source_to: java_base.join("com/piston/mc").join(new),
            assets_from: root.join("src/main/resources/assets").join(old),
            assets_to: root.join("src/main/resources/assets").join(new),
            java_base,
            modid: new.to_string(),
            group: format!("com.piston.mc.{}", new),
            version: "1.0".to_string(),
        }
    }

    fn fixture(root: &Path) {
        let source = root.join("src/main/java/com/piston/mc/oldmod");
        fs::create_dir_all(source.join("block")).unwrap();
        fs::create_dir_all(source.join("item/tool")).unwrap();
        fs::create_dir_all(root.join("src/main/resources/assets/oldmod/textures")).unwrap();

        fs::write(
            source.join("Mod.java"),
            "package com.piston.mc.oldmod;\n\npublic class Mod {}\n",
        )
        .unwrap();
        fs::write(
            source.join("block/Ore.java"),
            "package com.piston.mc.oldmod.block;\n\npublic class Ore {}\n",
        )
        .unwrap();
        fs::write(
            source.join("item/tool/Pick.java"),
            "package com.piston.mc.oldmod.item.tool;\n\npublic class Pick {}\n",
        )
        .unwrap();
        fs::write(source.join("notes.txt"), "first line\nsecond line\n").unwrap();
        fs::write(
            root.join("src/main/resources/assets/oldmod/textures/a.png"),
            [0u8, 1, 2],
        )
        .unwrap();
    }

    #[test]
    fn test_execute_renames_both_trees() {
        let temp_dir = TempDir::new().unwrap();
        fixture(temp_dir.path());

        plan(temp_dir.path(), "oldmod", "newmod").execute().unwrap();

        assert!(!temp_dir
            .path()
            .join("src/main/java/com/piston/mc/oldmod")
            .exists());
        assert!(temp_dir
            .path()
            .join("src/main/java/com/piston/mc/newmod")
            .exists());
        assert!(!temp_dir
            .path()
            .join("src/main/resources/assets/oldmod")
            .exists());
        assert!(temp_dir
            .path()
            .join("src/main/resources/assets/newmod/textures/a.png")
            .exists());
    }

    #[test]
    fn test_execute_regenerates_mod_info() {
        let temp_dir = TempDir::new().unwrap();
        fixture(temp_dir.path());

        plan(temp_dir.path(), "oldmod", "newmod").execute().unwrap();

        let mod_info = fs::read_to_string(
            temp_dir
                .path()
                .join("src/main/java/com/piston/mc/newmod/ModInfo.java"),
        )
        .unwrap();
        assert!(mod_info.starts_with("package com.piston.mc.newmod;\n"));
        assert!(mod_info.contains("String Id = \"newmod\";"));
        assert!(mod_info.contains("String Version = \"1.0\";"));
    }

    #[test]
    fn test_execute_rewrites_package_lines_per_directory() {
        let temp_dir = TempDir::new().unwrap();
        fixture(temp_dir.path());

        plan(temp_dir.path(), "oldmod", "newmod").execute().unwrap();

        let source = temp_dir.path().join("src/main/java/com/piston/mc/newmod");
        assert_eq!(
            fs::read_to_string(source.join("Mod.java")).unwrap(),
            "package com.piston.mc.newmod;\n\npublic class Mod {}\n"
        );
        assert_eq!(
            fs::read_to_string(source.join("block/Ore.java")).unwrap(),
            "package com.piston.mc.newmod.block;\n\npublic class Ore {}\n"
        );
        assert_eq!(
            fs::read_to_string(source.join("item/tool/Pick.java")).unwrap(),
            "package com.piston.mc.newmod.item.tool;\n\npublic class Pick {}\n"
        );
        // Non-Java files are not touched
        assert_eq!(
            fs::read_to_string(source.join("notes.txt")).unwrap(),
            "first line\nsecond line\n"
        );
    }

    #[test]
    fn test_execute_conflict_aborts_before_any_rename() {
        let temp_dir = TempDir::new().unwrap();
        fixture(temp_dir.path());
        // Destination asset tree already exists
        fs::create_dir_all(temp_dir.path().join("src/main/resources/assets/newmod")).unwrap();

        let result = plan(temp_dir.path(), "oldmod", "newmod").execute();
        assert!(matches!(result, Err(RenameError::PathConflict(_))));

        // Nothing was moved, source tree included
        assert!(temp_dir
            .path()
            .join("src/main/java/com/piston/mc/oldmod/Mod.java")
            .exists());
    }

    #[test]
    fn test_collect_tasks_is_a_bijection_over_java_files() {
        let temp_dir = TempDir::new().unwrap();
        fixture(temp_dir.path());

        // Collect against the existing tree without renaming
        let plan = plan(temp_dir.path(), "whatever", "oldmod");
        let mut tasks = plan.collect_tasks();
        tasks.sort_by(|a, b| a.path.cmp(&b.path));

        let packages: Vec<&str> = tasks.iter().map(|t| t.package.as_str()).collect();
        assert_eq!(
            packages,
            [
                "com.piston.mc.oldmod",
                "com.piston.mc.oldmod.block",
                "com.piston.mc.oldmod.item.tool",
            ]
        );
        let mut paths: Vec<_> = tasks.iter().map(|t| &t.path).collect();
        paths.dedup();
        assert_eq!(paths.len(), 3);
    }

    #[test]
    fn test_rewrite_drops_first_line_blindly() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("NoPackage.java");
        // First line is not a package declaration; it gets replaced anyway
        fs::write(&path, "public class NoPackage {\n}\n").unwrap();

        rewrite_package_line(&path, "com.piston.mc.x").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "package com.piston.mc.x;\n}\n"
        );
    }

    #[test]
    fn test_rewrite_preserves_remainder_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Weird.java");
        let body = "\nclass Weird {\n    // tab\there and trailing spaces   \n}\nno trailing newline";
        fs::write(&path, format!("package old.pkg;{}", body)).unwrap();

        rewrite_package_line(&path, "new.pkg").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("package new.pkg;{}", body)
        );
        // No stray tmp file left behind
        assert!(!temp_dir.path().join("Weird.java.tmp").exists());
    }

    #[test]
    fn test_rewrite_empty_file_gets_package_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Empty.java");
        fs::write(&path, "").unwrap();

        rewrite_package_line(&path, "p.q").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "package p.q;\n");
    }
}
