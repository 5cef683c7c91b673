//! Line-oriented build.gradle rewriter. The file is never treated as a
//! structured format: each line is classified once into a typed line
//! (recognized assignment, coremod marker, dependencies opener, or plain),
//! the sequence is transformed, and the result is re-serialized. Anything
//! not explicitly recognized passes through byte-for-byte, which is the
//! whole preservation contract in one pass.
//!
//! Classification is by line prefix, matching how the file has always been
//! edited: an assignment counts as such when the line starts with its key,
//! the coremod delimiter is any line starting with `// coremod`, and the
//! insertion anchor is a line starting with `dependencies {`.

use super::{malformed, DescriptorError};
use std::fs;
use std::path::{Path, PathBuf};

/// Recognized assignment keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignKey {
    Version,
    Group,
    ArchivesBaseName,
}

impl AssignKey {
    fn as_str(self) -> &'static str {
        match self {
            AssignKey::Version => "version",
            AssignKey::Group => "group",
            AssignKey::ArchivesBaseName => "archivesBaseName",
        }
    }
}

/// One classified line; every variant keeps the raw text so that an
/// untouched line re-serializes exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradleLine {
    Assignment(AssignKey, String),
    CoremodMarker(String),
    DependenciesOpen(String),
    Plain(String),
}

impl GradleLine {
    fn classify(raw: &str) -> GradleLine {
        if raw.starts_with("version") {
            GradleLine::Assignment(AssignKey::Version, raw.to_string())
        } else if raw.starts_with("group") {
            GradleLine::Assignment(AssignKey::Group, raw.to_string())
        } else if raw.starts_with("archivesBaseName") {
            GradleLine::Assignment(AssignKey::ArchivesBaseName, raw.to_string())
        } else if raw.starts_with("// coremod") {
            GradleLine::CoremodMarker(raw.to_string())
        } else if raw.starts_with("dependencies {") {
            GradleLine::DependenciesOpen(raw.to_string())
        } else {
            GradleLine::Plain(raw.to_string())
        }
    }

    fn raw(&self) -> &str {
        match self {
            GradleLine::Assignment(_, raw)
            | GradleLine::CoremodMarker(raw)
            | GradleLine::DependenciesOpen(raw)
            | GradleLine::Plain(raw) => raw,
        }
    }
}

/// What a rewrite should change. `None` / `Keep` means the corresponding
/// lines pass through untouched.
pub struct Updates<'a> {
    pub version: Option<&'a str>,
    pub group: Option<&'a str>,
    pub archives_base_name: Option<&'a str>,
    pub coremod: CoremodEdit<'a>,
}

#[derive(Clone, Copy)]
pub enum CoremodEdit<'a> {
    /// Leave any existing block exactly as it is
    Keep,
    /// Replace/insert the block with this fully qualified class
    Set(&'a str),
    /// Remove the block, markers included
    Clear,
}

pub struct GradleFile {
    path: PathBuf,
    lines: Vec<GradleLine>,
}

impl GradleFile {
    pub fn read(path: &Path) -> Result<Self, DescriptorError> {
        if !path.exists() {
            return Err(DescriptorError::MissingFile(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: parse(&text),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value of the `version` assignment. The value is whatever follows the
    /// first `=`, trimmed of whitespace and surrounding quotes of either
    /// kind (historical writers used both).
    pub fn version(&self) -> Result<String, DescriptorError> {
        for line in &self.lines {
            if let GradleLine::Assignment(AssignKey::Version, raw) = line {
                if let Some((_, value)) = raw.split_once('=') {
                    let value = value.trim().trim_matches(|c| c == '\'' || c == '"');
                    return Ok(value.to_string());
                }
            }
        }
        Err(malformed(&self.path, "no version assignment found"))
    }

    /// Fully qualified coremod class from inside the marker block, if any
    pub fn coremod_class(&self) -> Option<String> {
        let mut in_block = false;
        for line in &self.lines {
            match line {
                GradleLine::CoremodMarker(_) => {
                    if in_block {
                        return None;
                    }
                    in_block = true;
                }
                other if in_block => {
                    let trimmed = other.raw().trim();
                    if let Some(rest) = trimmed.strip_prefix("attributes 'FMLCorePlugin'") {
                        if let Some((_, value)) = rest.split_once(':') {
                            return Some(value.trim().trim_matches('\'').to_string());
                        }
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Whether a `dependencies {` line exists to anchor a coremod block
    pub fn has_dependencies_anchor(&self) -> bool {
        self.lines
            .iter()
            .any(|line| matches!(line, GradleLine::DependenciesOpen(_)))
    }

    /// Apply `updates` and return the new file content
    pub fn render(&self, updates: &Updates) -> String {
        let mut out: Vec<String> = Vec::with_capacity(self.lines.len());
        let mut in_block = false;
        let mut inserted = false;

        for line in &self.lines {
            match line {
                GradleLine::CoremodMarker(raw) => match updates.coremod {
                    CoremodEdit::Keep => out.push(raw.clone()),
                    // Block being replaced or removed: drop the markers
                    CoremodEdit::Set(_) | CoremodEdit::Clear => in_block = !in_block,
                },
                _ if in_block => {}
                GradleLine::DependenciesOpen(raw) => {
                    if let CoremodEdit::Set(class) = updates.coremod {
                        if !inserted {
                            push_coremod_block(&mut out, class);
                            inserted = true;
                        }
                    }
                    out.push(raw.clone());
                }
                GradleLine::Assignment(key, raw) => {
                    let new_value = match key {
                        AssignKey::Version => updates.version,
                        AssignKey::Group => updates.group,
                        AssignKey::ArchivesBaseName => updates.archives_base_name,
                    };
                    out.push(match new_value {
                        Some(value) => format!("{} = '{}'", key.as_str(), value),
                        None => raw.clone(),
                    });
                }
                GradleLine::Plain(raw) => out.push(raw.clone()),
            }
        }

        out.join("\n")
    }

    /// Apply `updates` and write the file back, keeping the in-memory
    /// line sequence in sync with what is now on disk.
    pub fn write(&mut self, updates: &Updates) -> Result<(), DescriptorError> {
        let text = self.render(updates);
        fs::write(&self.path, &text)?;
        self.lines = parse(&text);
        Ok(())
    }
}

fn parse(text: &str) -> Vec<GradleLine> {
    // split('\n') rather than lines(): the trailing empty piece is what
    // round-trips a final newline through join("\n")
    text.split('\n').map(GradleLine::classify).collect()
}

fn push_coremod_block(out: &mut Vec<String>, class: &str) {
    out.push("// coremod".to_string());
    out.push("jar {".to_string());
    out.push("    manifest {".to_string());
    out.push(format!("        attributes 'FMLCorePlugin': '{}'", class));
    out.push("        attributes 'FMLCorePluginContainsFMLMod': 'true'".to_string());
    out.push("    }".to_string());
    out.push("}".to_string());
    out.push("// coremod".to_string());
}
