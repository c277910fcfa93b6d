mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::FillError;
use defaults::*;

/// Environment variable that overrides `paratranz.token`.
pub const TOKEN_ENV: &str = "PARATRANZ_TOKEN";

/// Top-level descfill configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub paratranz: ParatranzConfig,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Paratranz project access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParatranzConfig {
    #[serde(default)]
    pub project_id: u64,
    /// API token sent verbatim in the `Authorization` header.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Regex matched against the lowercased entry key to select descriptions.
    #[serde(default = "default_key_pattern")]
    pub key_pattern: String,
}

impl Default for ParatranzConfig {
    fn default() -> Self {
        Self {
            project_id: 0,
            token: String::new(),
            base_url: default_base_url(),
            page_size: default_page_size(),
            key_pattern: default_key_pattern(),
        }
    }
}

/// Lookup table and template file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default = "default_text_dir")]
    pub dir: String,
    #[serde(default = "default_keys_file")]
    pub keys_file: String,
    #[serde(default = "default_effects_file")]
    pub effects_file: String,
    #[serde(default = "default_manufacturers_file")]
    pub manufacturers_file: String,
    #[serde(default = "default_general_values_file")]
    pub general_values_file: String,
    #[serde(default = "default_templates_file")]
    pub templates_file: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            dir: default_text_dir(),
            keys_file: default_keys_file(),
            effects_file: default_effects_file(),
            manufacturers_file: default_manufacturers_file(),
            general_values_file: default_general_values_file(),
            templates_file: default_templates_file(),
        }
    }
}

impl TextConfig {
    /// Resolve a file name against the text directory.
    pub fn path(&self, file: &str) -> PathBuf {
        Path::new(&shellexpand(&self.dir)).join(file)
    }
}

/// Source text corpora (original, full translation, bilingual reference).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_en_file")]
    pub en_file: String,
    #[serde(default = "default_cn_file")]
    pub cn_file: String,
    #[serde(default = "default_ref_file")]
    pub ref_file: String,
    #[serde(default = "default_en_url")]
    pub en_url: String,
    #[serde(default = "default_cn_url")]
    pub cn_url: String,
    #[serde(default = "default_ref_url")]
    pub ref_url: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            en_file: default_en_file(),
            cn_file: default_cn_file(),
            ref_file: default_ref_file(),
            en_url: default_en_url(),
            cn_url: default_cn_url(),
            ref_url: default_ref_url(),
        }
    }
}

impl CorpusConfig {
    /// `(url, file name)` pairs for every corpus file.
    pub fn downloads(&self) -> [(&str, &str); 3] {
        [
            (self.en_url.as_str(), self.en_file.as_str()),
            (self.cn_url.as_str(), self.cn_file.as_str()),
            (self.ref_url.as_str(), self.ref_file.as_str()),
        ]
    }
}

/// ntfy push notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_ntfy_url")]
    pub url: String,
    #[serde(default = "default_ntfy_topic")]
    pub topic: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_ntfy_url(),
            topic: default_ntfy_topic(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Apply environment overrides on top of file values.
fn apply_env(mut config: Config) -> Config {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.is_empty() {
            config.paratranz.token = token;
        }
    }
    config
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, FillError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(apply_env(Config::default()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| FillError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| FillError::Config(format!("failed to parse config: {}", e)))?;

    Ok(apply_env(config))
}
