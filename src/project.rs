//! Project layout conventions and root discovery. A mod repository is
//! identified by the presence of a `build.gradle` at its root; every other
//! artifact path is fixed relative to that root.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Build configuration artifact, relative to the project root
pub const BUILD_GRADLE: &str = "build.gradle";
/// Metadata document artifact, relative to the project root
pub const MCMOD_INFO: &str = "src/main/resources/mcmod.info";
/// Base of the Java source tree; package statements are derived relative to this
pub const JAVA_ROOT: &str = "src/main/java";
/// Base of the per-mod asset trees
pub const ASSETS_ROOT: &str = "src/main/resources/assets";

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("could not detect the mod root directory above {0} (no build.gradle found); make sure you are inside a mod repo")]
    RootNotFound(PathBuf),
}

/// Walk upward from `start` until a directory containing `build.gradle` is
/// found, and return that directory.
pub fn find_root(start: &Path) -> Result<PathBuf, ProjectError> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    let mut current = start.clone();
    loop {
        if current.join(BUILD_GRADLE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ProjectError::RootNotFound(start));
        }
    }
}

pub fn build_gradle_path(root: &Path) -> PathBuf {
    root.join(BUILD_GRADLE)
}

pub fn mcmod_info_path(root: &Path) -> PathBuf {
    root.join(MCMOD_INFO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_root_at_start() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("build.gradle"), "version = '1.0'\n").unwrap();

        let root = find_root(temp_dir.path()).unwrap();
        assert_eq!(root, temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_root_from_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("build.gradle"), "version = '1.0'\n").unwrap();
        let nested = temp_dir.path().join("src/main/java/com/piston/mc/mymod");
        fs::create_dir_all(&nested).unwrap();

        let root = find_root(&nested).unwrap();
        assert_eq!(root, temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_root_not_a_project() {
        let temp_dir = TempDir::new().unwrap();
        let result = find_root(temp_dir.path());
        assert!(matches!(result, Err(ProjectError::RootNotFound(_))));
    }

    #[test]
    fn test_artifact_paths() {
        let root = Path::new("/work/mymod");
        assert_eq!(
            build_gradle_path(root),
            PathBuf::from("/work/mymod/build.gradle")
        );
        assert_eq!(
            mcmod_info_path(root),
            PathBuf::from("/work/mymod/src/main/resources/mcmod.info")
        );
    }
}
