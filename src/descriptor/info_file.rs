//! The mcmod.info metadata document: a JSON array with exactly one object
//! element. Only a handful of keys are ever touched; everything else in the
//! object is carried through read-modify-write untouched and in its
//! original order (serde_json's `preserve_order` feature). Writes use
//! 4-space indentation, matching the established on-disk format.

use super::{malformed, DescriptorError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub struct InfoFile {
    path: PathBuf,
    entry: Map<String, Value>,
}

impl InfoFile {
    pub fn read(path: &Path) -> Result<Self, DescriptorError> {
        if !path.exists() {
            return Err(DescriptorError::MissingFile(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        let doc: Value =
            serde_json::from_str(&text).map_err(|e| malformed(path, e.to_string()))?;

        let entry = match doc {
            Value::Array(mut items) if items.len() == 1 => match items.remove(0) {
                Value::Object(map) => map,
                _ => return Err(malformed(path, "array element is not an object")),
            },
            Value::Array(items) => {
                return Err(malformed(
                    path,
                    format!("expected a one-element array, found {} elements", items.len()),
                ));
            }
            _ => return Err(malformed(path, "expected a one-element array")),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entry,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// String value for `key`, if present and actually a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entry.get(key).and_then(Value::as_str)
    }

    /// Set `key` to a string value. An existing key keeps its position;
    /// a new key is appended.
    pub fn set_str(&mut self, key: &str, value: &str) {
        self.entry
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    pub fn write(&self) -> Result<(), DescriptorError> {
        let doc = Value::Array(vec![Value::Object(self.entry.clone())]);

        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        doc.serialize(&mut ser)?;
        buf.push(b'\n');

        fs::write(&self.path, buf)?;
        Ok(())
    }
}
