//! Flat-file lookup tables.
//!
//! Every table file is line oriented: `original=translation`, split on the
//! first `=`. Blank lines and `#` comments are skipped. The general-value
//! table scopes each entry to a description key by writing the original
//! side as `Key: Value`.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::TextConfig;
use crate::error::FillError;

/// Separator between a description key and its value.
pub const KEY_VALUE_SEPARATOR: &str = ": ";

/// A single original → translation mapping.
pub type Table = HashMap<String, String>;

/// The four lookup tables a replacer needs. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    keys: Table,
    effects: Table,
    manufacturers: Table,
    general_values: HashMap<String, Table>,
}

impl LookupTables {
    /// Load all four tables from the configured text directory.
    ///
    /// Any missing or unreadable file aborts the load.
    pub fn load(text: &TextConfig) -> Result<Self, FillError> {
        let keys = read_table_file(&text.path(&text.keys_file))?;
        let effects = read_table_file(&text.path(&text.effects_file))?;
        let manufacturers = read_table_file(&text.path(&text.manufacturers_file))?;
        let general = read_table_file(&text.path(&text.general_values_file))?;
        Ok(Self::from_sources(&keys, &effects, &manufacturers, &general))
    }

    /// Build tables from already-read file contents.
    pub fn from_sources(keys: &str, effects: &str, manufacturers: &str, general: &str) -> Self {
        let tables = Self {
            keys: parse_table(keys),
            effects: parse_table(effects),
            manufacturers: parse_table(manufacturers),
            general_values: parse_scoped_table(general),
        };
        debug!(
            "lookup tables: {} keys, {} effects, {} manufacturers, {} scoped value keys",
            tables.keys.len(),
            tables.effects.len(),
            tables.manufacturers.len(),
            tables.general_values.len()
        );
        tables
    }

    /// Whether `key` belongs to the recognized key set.
    pub fn is_recognized(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Translated key name, or the key itself when untranslated.
    pub fn translate_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.keys.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn effect(&self, name: &str) -> Option<&str> {
        self.effects.get(name).map(String::as_str)
    }

    pub fn manufacturer(&self, name: &str) -> Option<&str> {
        self.manufacturers.get(name).map(String::as_str)
    }

    /// Exact translation of `value` scoped to description key `key`.
    pub fn general_value(&self, key: &str, value: &str) -> Option<&str> {
        self.general_values
            .get(key)
            .and_then(|values| values.get(value))
            .map(String::as_str)
    }
}

/// Read a UTF-8 text file, dropping a leading byte-order mark.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(strip_bom(&content).to_string())
}

pub(crate) fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

fn read_table_file(path: &Path) -> Result<String, FillError> {
    read_text(path).map_err(|e| FillError::Table {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Iterate the `(original, translation)` pairs of a table source.
fn entries(content: &str) -> impl Iterator<Item = (&str, &str)> {
    strip_bom(content).lines().filter_map(|line| {
        if line.trim().is_empty() || line.starts_with('#') {
            return None;
        }
        match line.split_once('=') {
            Some(pair) => Some(pair),
            None => {
                warn!("lookup table: skipping line without '=': {line}");
                None
            }
        }
    })
}

/// Parse a flat `original=translation` table.
pub fn parse_table(content: &str) -> Table {
    entries(content)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Parse a `Key: Value=translation` table into per-key value tables.
pub fn parse_scoped_table(content: &str) -> HashMap<String, Table> {
    let mut scoped: HashMap<String, Table> = HashMap::new();
    for (original, translation) in entries(content) {
        let Some((key, value)) = original.split_once(KEY_VALUE_SEPARATOR) else {
            warn!("general values: skipping entry without a key scope: {original}");
            continue;
        };
        scoped
            .entry(key.trim().to_string())
            .or_default()
            .insert(value.trim().to_string(), translation.to_string());
    }
    scoped
}
