//! Paratranz API (de)serialization types.

use serde::{Deserialize, Serialize};

/// One page of `GET /projects/{id}/strings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub results: Vec<StringEntry>,
}

/// A single translatable string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StringEntry {
    pub id: u64,
    pub key: String,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub stage: i64,
}

/// Body of `PUT /projects/{id}/strings/{stringId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationUpdate {
    pub stage: i64,
    pub translation: String,
}
