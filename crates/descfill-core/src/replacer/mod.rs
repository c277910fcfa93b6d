//! Description template replacer.
//!
//! Rewrites recognized `Key: Value` lines of an item description and, when
//! anything was rewritten, prefixes the result with a review disclaimer.
//! Description lines are separated by the literal two-character sequence
//! `\n` because descriptions arrive with their newlines escaped.

mod rules;


pub use rules::{EFFECT_JOINER, KEY_DELIMITER, UNTRANSLATED_MARKER};

use tracing::debug;

use crate::config::TextConfig;
use crate::error::FillError;
use crate::tables::{LookupTables, KEY_VALUE_SEPARATOR};
use crate::template::NumericTemplates;
use rules::{normalize, translate_value, RuleContext};

/// Escaped line separator used inside descriptions.
pub const LINE_SEPARATOR: &str = "\\n";

/// Banner prepended to every auto-filled translation.
pub const DISCLAIMER: &str = "【\\n编辑后请删除中括号以及中括号以内的内容\\n注意：此为自动填充的模板翻译，文本没有完全翻译且已填充部分可能存在错误，请仔细核对！\\n】";

/// Result of rewriting a single description line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRewrite {
    /// The output line.
    pub text: String,
    /// Whether the line's key was recognized and rewritten.
    pub was_rewritten: bool,
}

impl LineRewrite {
    fn unchanged(line: &str) -> Self {
        Self {
            text: line.to_string(),
            was_rewritten: false,
        }
    }
}

/// Whether `line` has exactly one `": "` and is eligible for rewriting.
pub fn is_candidate(line: &str) -> bool {
    line.matches(KEY_VALUE_SEPARATOR).count() == 1
}

/// Template replacer owning its lookup tables and numeric templates.
#[derive(Debug, Clone)]
pub struct Replacer {
    tables: LookupTables,
    templates: NumericTemplates,
}

impl Replacer {
    pub fn new(tables: LookupTables, templates: NumericTemplates) -> Self {
        Self { tables, templates }
    }

    /// Load tables and templates from the configured text directory.
    ///
    /// Missing lookup tables are fatal; a missing template file is not.
    pub fn load(text: &TextConfig) -> Result<Self, FillError> {
        let tables = LookupTables::load(text)?;
        let templates = NumericTemplates::load(&text.path(&text.templates_file));
        Ok(Self::new(tables, templates))
    }

    pub fn tables(&self) -> &LookupTables {
        &self.tables
    }

    pub fn templates(&self) -> &NumericTemplates {
        &self.templates
    }

    /// Rewrite one `Key: Value` line.
    pub fn rewrite_line(&self, line: &str) -> LineRewrite {
        if !is_candidate(line) {
            return LineRewrite::unchanged(line);
        }
        let Some((raw_key, raw_value)) = line.split_once(KEY_VALUE_SEPARATOR) else {
            return LineRewrite::unchanged(line);
        };

        let key = normalize(raw_key);
        if !self.tables.is_recognized(&key) {
            return LineRewrite::unchanged(line);
        }
        let value = normalize(raw_value);

        let ctx = RuleContext {
            tables: &self.tables,
            templates: &self.templates,
        };
        let translated = translate_value(&key, &value, &ctx);
        LineRewrite {
            text: format!(
                "{}{KEY_DELIMITER}{translated}",
                self.tables.translate_key(&key)
            ),
            was_rewritten: true,
        }
    }

    /// Rewrite every eligible line of `original`.
    ///
    /// When nothing was rewritten, returns `original` if
    /// `keep_original_if_unchanged`, otherwise an empty string.
    pub fn assemble(&self, original: &str, keep_original_if_unchanged: bool) -> String {
        let mut any_rewritten = false;
        let lines: Vec<String> = original
            .split(LINE_SEPARATOR)
            .map(|line| {
                if !is_candidate(line) {
                    return line.to_string();
                }
                let rewrite = self.rewrite_line(line);
                any_rewritten |= rewrite.was_rewritten;
                rewrite.text
            })
            .collect();

        if !any_rewritten {
            debug!("no recognized lines in description");
            return if keep_original_if_unchanged {
                original.to_string()
            } else {
                String::new()
            };
        }

        format!("{DISCLAIMER}{}", lines.join(LINE_SEPARATOR))
    }

    /// Translation payload for `original`, or empty when nothing matched.
    pub fn replace(&self, original: &str) -> String {
        self.assemble(original, false)
    }
}
