//! Numeric templates.
//!
//! A template line reads `pattern=replacement`, where both sides carry the
//! `[NUM]` placeholder. Pattern text outside the placeholder matches
//! literally; the placeholder matches a decimal number or `NA` / `N/A`.
//! Compilation and application are separate steps: [`NumericTemplate::compile`]
//! builds the matcher once, [`NumericTemplate::apply`] substitutes a capture.

use std::path::Path;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::FillError;
use crate::tables::read_text;

/// Placeholder token marking the numeric slot.
pub const PLACEHOLDER: &str = "[NUM]";

/// Capture group that replaces the placeholder in a compiled pattern.
const NUMBER_GROUP: &str = r"([+-]?\d+(?:\.\d+)?|NA|N/A)";

/// One compiled `pattern=replacement` rule.
#[derive(Debug, Clone)]
pub struct NumericTemplate {
    pattern: Regex,
    replacement: String,
}

impl NumericTemplate {
    /// Compile a single template line.
    pub fn compile(line: &str) -> Result<Self, FillError> {
        let (pattern_text, replacement) = line
            .split_once('=')
            .ok_or_else(|| FillError::Template(format!("missing '=' in {line:?}")))?;

        let slots = pattern_text.matches(PLACEHOLDER).count();
        if slots != 1 {
            return Err(FillError::Template(format!(
                "pattern {pattern_text:?} must contain exactly one {PLACEHOLDER}, found {slots}"
            )));
        }

        let escaped: Vec<String> = pattern_text
            .split(PLACEHOLDER)
            .map(regex::escape)
            .collect();
        let source = format!("^{}$", escaped.join(NUMBER_GROUP));
        let pattern = Regex::new(&source)
            .map_err(|e| FillError::Template(format!("invalid pattern {source:?}: {e}")))?;

        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    /// Substitute the captured number into the replacement, if `value`
    /// matches the whole pattern.
    pub fn apply(&self, value: &str) -> Option<String> {
        let captures = self.pattern.captures(value)?;
        let number = captures.get(1)?.as_str();
        Some(self.replacement.replacen(PLACEHOLDER, number, 1))
    }
}

/// Ordered template list. The first matching template wins.
#[derive(Debug, Clone, Default)]
pub struct NumericTemplates {
    templates: Vec<NumericTemplate>,
}

impl NumericTemplates {
    /// Compile every template line in `source`.
    ///
    /// Blank lines and `#` comments are ignored. Lines that fail to compile
    /// are logged and skipped.
    pub fn parse(source: &str) -> Self {
        let mut templates = Vec::new();
        for line in source.lines() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match NumericTemplate::compile(line) {
                Ok(t) => templates.push(t),
                Err(e) => warn!("skipping numeric template {line:?}: {e}"),
            }
        }
        debug!("compiled {} numeric templates", templates.len());
        Self { templates }
    }

    /// Load templates from a file. A missing or unreadable file yields an
    /// empty list.
    pub fn load(path: &Path) -> Self {
        match read_text(path) {
            Ok(source) => {
                let templates = Self::parse(&source);
                info!(
                    "loaded {} numeric templates from {}",
                    templates.len(),
                    path.display()
                );
                templates
            }
            Err(e) => {
                warn!(
                    "numeric templates unavailable at {}: {e}; continuing without",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Result of the first template that matches `value`.
    pub fn find(&self, value: &str) -> Option<String> {
        self.templates.iter().find_map(|t| t.apply(value))
    }

    /// Localize `value`, returning it unchanged when no template matches.
    pub fn replace(&self, value: &str) -> String {
        self.find(value).unwrap_or_else(|| value.to_string())
    }
}
