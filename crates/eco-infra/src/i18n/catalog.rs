use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eco_core::ports::TranslatorPort;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog root must be a JSON object")]
    NotAnObject,
}

/// Translation catalog backed by nested JSON objects.
///
/// Nested keys are flattened with dots: `{"signup": {"next": "Next"}}`
/// resolves `signup.next`. Unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(source)?;
        if !value.is_object() {
            return Err(CatalogError::NotAnObject);
        }
        let mut entries = HashMap::new();
        flatten(&value, String::new(), &mut entries);
        Ok(Self { entries })
    }

    pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&source)?;
        debug!(path = %path.display(), keys = catalog.len(), "loaded translation catalog");
        Ok(catalog)
    }

    /// Loads `<dir>/<language>.json`.
    pub fn load_language(dir: &Path, language: &str) -> Result<Self, CatalogError> {
        Self::load_file(&dir.join(format!("{language}.json")))
    }

    /// Entries of `self` win; `fallback` fills the gaps.
    pub fn with_fallback(mut self, fallback: CatalogTranslator) -> Self {
        for (key, value) in fallback.entries {
            self.entries.entry(key).or_insert(value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TranslatorPort for CatalogTranslator {
    fn translate(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }
}

fn flatten(value: &Value, prefix: String, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(child, path, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix, text.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix, other.to_string());
        }
    }
}
