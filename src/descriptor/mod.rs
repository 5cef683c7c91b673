//! The mod descriptor: a single logical record spanning the `mcmod.info`
//! metadata document and the `build.gradle` build configuration.
//!
//! Stored fields are `name`, `description`, `credits`, `url` (metadata
//! document) and `version` (build config). `modid`, the archive base name
//! and the group are never trusted from disk; they are recomputed from
//! `name` on every read. The metadata document does carry a redundant
//! `modid` key for discoverability, which every write refreshes.
//!
//! [`DescriptorStore`] owns both artifacts for a read-modify-write cycle:
//! open reads everything, a single field is changed, and both artifacts are
//! written back. Whether the change requires a tree rename is the caller's
//! decision (compare the module id before and after).

mod gradle;
mod info_file;

pub use gradle::{AssignKey, CoremodEdit, GradleFile, GradleLine, Updates};
pub use info_file::InfoFile;

use crate::config::Config;
use crate::project;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("missing file: {0}")]
    MissingFile(PathBuf),
    #[error("malformed document {path}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },
    #[error("not a valid field: {0}")]
    InvalidField(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn malformed(path: &Path, reason: impl Into<String>) -> DescriptorError {
    DescriptorError::MalformedDocument {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Settable descriptor fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Credits,
    Url,
    Version,
}

impl Field {
    /// Match a CLI field name. Case-sensitive; `desc` is the only alias.
    pub fn parse(s: &str) -> Result<Field, DescriptorError> {
        match s {
            "name" => Ok(Field::Name),
            "description" | "desc" => Ok(Field::Description),
            "credits" => Ok(Field::Credits),
            "url" => Ok(Field::Url),
            "version" => Ok(Field::Version),
            other => Err(DescriptorError::InvalidField(other.to_string())),
        }
    }
}

/// Lowercase name with spaces removed
pub fn modid_from_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// Lowercase name with spaces replaced by hyphens
pub fn archive_base_name_from_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Java source tree for a mod, relative to the project root
pub fn source_root(group_prefix: &str, modid: &str) -> PathBuf {
    let mut path = PathBuf::from(project::JAVA_ROOT);
    for segment in group_prefix.split('.') {
        path.push(segment);
    }
    path.push(modid);
    path
}

/// Asset tree for a mod, relative to the project root
pub fn asset_root(modid: &str) -> PathBuf {
    Path::new(project::ASSETS_ROOT).join(modid)
}

/// In-memory snapshot of the mod identity record
#[derive(Debug, Clone)]
pub struct ModDescriptor {
    pub name: String,
    pub description: String,
    pub credits: String,
    pub url: String,
    pub version: String,
    group_prefix: String,
}

impl ModDescriptor {
    pub fn group_prefix(&self) -> &str {
        &self.group_prefix
    }

    pub fn modid(&self) -> String {
        modid_from_name(&self.name)
    }

    pub fn archive_base_name(&self) -> String {
        archive_base_name_from_name(&self.name)
    }

    pub fn group(&self) -> String {
        format!("{}.{}", self.group_prefix, self.modid())
    }

    pub fn source_root(&self) -> PathBuf {
        source_root(&self.group_prefix, &self.modid())
    }

    pub fn asset_root(&self) -> PathBuf {
        asset_root(&self.modid())
    }
}

/// Result of a successful field change
pub struct SetOutcome {
    /// Module id computed from the name before the change
    pub old_modid: String,
}

/// Read-modify-write access to the two descriptor artifacts
pub struct DescriptorStore {
    info: InfoFile,
    gradle: GradleFile,
    descriptor: ModDescriptor,
}

impl DescriptorStore {
    /// Read both artifacts under `root` and build the descriptor snapshot.
    pub fn open(root: &Path, config: &Config) -> Result<Self, DescriptorError> {
        let info = InfoFile::read(&project::mcmod_info_path(root))?;
        let gradle = GradleFile::read(&project::build_gradle_path(root))?;

        let name = match info.get_str("name") {
            Some(name) => name.to_string(),
            None => return Err(malformed(info.path(), "missing or non-string key `name`")),
        };
        let descriptor = ModDescriptor {
            name,
            description: info.get_str("description").unwrap_or_default().to_string(),
            credits: info.get_str("credits").unwrap_or_default().to_string(),
            url: info.get_str("url").unwrap_or_default().to_string(),
            version: gradle.version()?,
            group_prefix: config.group_prefix.clone(),
        };

        Ok(Self {
            info,
            gradle,
            descriptor,
        })
    }

    pub fn descriptor(&self) -> &ModDescriptor {
        &self.descriptor
    }

    /// Coremod class currently declared in build.gradle, if any
    pub fn coremod_class(&self) -> Option<String> {
        self.gradle.coremod_class()
    }

    /// Apply a single field change and write both artifacts back.
    ///
    /// The metadata document is written first with the refreshed `modid`,
    /// then build.gradle gets fresh `version`, `group` and
    /// `archivesBaseName` assignments; everything else in both artifacts,
    /// the coremod block included, passes through untouched. The caller is
    /// responsible for running the tree rename when the returned old module
    /// id differs from the current one.
    pub fn set(&mut self, field: Field, value: &str) -> Result<SetOutcome, DescriptorError> {
        let old_modid = self.descriptor.modid();

        match field {
            Field::Name => self.descriptor.name = value.to_string(),
            Field::Description => self.descriptor.description = value.to_string(),
            Field::Credits => self.descriptor.credits = value.to_string(),
            Field::Url => self.descriptor.url = value.to_string(),
            Field::Version => self.descriptor.version = value.to_string(),
        }

        let d = &self.descriptor;
        let modid = d.modid();
        let group = d.group();
        let archive_base_name = d.archive_base_name();

        self.info.set_str("name", &d.name);
        self.info.set_str("description", &d.description);
        self.info.set_str("credits", &d.credits);
        self.info.set_str("url", &d.url);
        self.info.set_str("modid", &modid);
        self.info.write()?;

        self.gradle.write(&Updates {
            version: Some(d.version.as_str()),
            group: Some(group.as_str()),
            archives_base_name: Some(archive_base_name.as_str()),
            coremod: CoremodEdit::Keep,
        })?;

        Ok(SetOutcome { old_modid })
    }

    /// Set or clear the coremod declaration; nothing else changes.
    pub fn set_coremod(&mut self, class: Option<&str>) -> Result<(), DescriptorError> {
        let edit = match class {
            Some(class) => {
                if !self.gradle.has_dependencies_anchor() {
                    return Err(malformed(
                        self.gradle.path(),
                        "no `dependencies {` line to anchor the coremod block",
                    ));
                }
                CoremodEdit::Set(class)
            }
            None => CoremodEdit::Clear,
        };
        self.gradle.write(&Updates {
            version: None,
            group: None,
            archives_base_name: None,
            coremod: edit,
        })
    }
}
