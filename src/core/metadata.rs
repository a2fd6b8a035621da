//! Static currency reference data

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const BUNDLED_CURRENCIES: &str = include_str!("../../data/currencies.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyMetadata {
    pub code: String,
    pub display_name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
}

/// Immutable lookup table keyed by currency code. Built once at startup
/// and shared read-only between presenters.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: HashMap<String, CurrencyMetadata>,
}

impl MetadataTable {
    pub fn new(records: Vec<CurrencyMetadata>) -> Self {
        let entries = records
            .into_iter()
            .map(|m| (m.code.clone(), m))
            .collect();
        Self { entries }
    }

    /// The table compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CURRENCIES).context("Failed to parse bundled currency table")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<CurrencyMetadata> = serde_json::from_str(json)?;
        debug!(count = records.len(), "Loaded currency metadata");
        Ok(Self::new(records))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read currency table: {}", path.as_ref().display())
        })?;
        Self::from_json(&json).with_context(|| {
            format!("Failed to parse currency table: {}", path.as_ref().display())
        })
    }

    pub fn get(&self, code: &str) -> Option<&CurrencyMetadata> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
