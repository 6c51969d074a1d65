//! Brand → model → variant lookups backing the "add a car" picker.

use crate::error::{CarTableError, CtResult};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogEntry {
    pub brand: String,
    /// A single model name or a list of them.
    #[serde(deserialize_with = "one_or_many")]
    pub model: Vec<String>,
    pub variant: Vec<ModelVariants>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelVariants {
    pub model: String,
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CtResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CarTableError::Config(format!("Failed to read catalog '{}': {}", path.display(), e))
        })?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&content)?;
        debug!("Catalog holds {} entries", entries.len());
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Distinct brands, first-seen order.
    pub fn brands(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| seen.insert(e.brand.as_str()))
            .map(|e| e.brand.clone())
            .collect()
    }

    /// Distinct models of `brand`, first-seen order. Brand match is exact.
    pub fn lookup_models(&self, brand: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| e.brand == brand)
            .flat_map(|e| e.model.iter())
            .filter(|m| seen.insert(m.as_str()))
            .cloned()
            .collect()
    }

    /// Variants listed for `model` under `brand`; empty when either is unknown.
    pub fn lookup_variants(&self, brand: &str, model: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.brand == brand)
            .flat_map(|e| e.variant.iter())
            .find(|v| v.model == model)
            .map(|v| v.versions.clone())
            .unwrap_or_default()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
