use crate::utils::error::{Result, ScaffoldError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "package.json";

/// A `package.json` held as a raw JSON object so unknown fields and key order
/// survive a read-modify-write cycle.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ScaffoldError::ManifestError {
            path: path.display().to_string(),
            message: format!("cannot read file: {}", e),
        })?;
        Self::from_json_str(path, &content)
    }

    pub fn from_json_str(path: &Path, content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ScaffoldError::ManifestError {
                path: path.display().to_string(),
                message: format!("invalid JSON: {}", e),
            })?;

        match value {
            Value::Object(document) => Ok(Self {
                path: path.to_path_buf(),
                document,
            }),
            other => Err(ScaffoldError::ManifestError {
                path: path.display().to_string(),
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Version requirement of `name` under `dependencies`.
    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.section_entry("dependencies", name)
    }

    pub fn dev_dependency(&self, name: &str) -> Option<&str> {
        self.section_entry("devDependencies", name)
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.section_entry("scripts", name)
    }

    fn section_entry(&self, section: &str, name: &str) -> Option<&str> {
        self.document.get(section)?.get(name)?.as_str()
    }

    /// Adds `scripts`, replacing same-named entries and keeping the rest.
    pub fn merge_scripts<I>(&mut self, scripts: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entry = self
            .document
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));

        if !entry.is_object() {
            tracing::warn!("⚠️ \"scripts\" in package.json is not an object, replacing it");
            *entry = Value::Object(Map::new());
        }

        if let Value::Object(table) = entry {
            for (name, command) in scripts {
                table.insert(name, Value::String(command));
            }
        }
    }

    pub fn to_pretty_string(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.document)?;
        content.push('\n');
        Ok(content)
    }

    pub fn save(&self) -> Result<()> {
        let content = self.to_pretty_string()?;
        fs::write(&self.path, content).map_err(|e| ScaffoldError::ManifestError {
            path: self.path.display().to_string(),
            message: format!("cannot write file: {}", e),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
