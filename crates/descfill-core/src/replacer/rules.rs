//! Per-key substitution rules, evaluated in a fixed priority order.

use tracing::{trace, warn};

use crate::tables::LookupTables;
use crate::template::NumericTemplates;

/// Output delimiter between the translated key and its value.
pub const KEY_DELIMITER: char = '：';
/// Brackets around the original manufacturer name.
pub const ORIGINAL_OPEN: char = '（';
pub const ORIGINAL_CLOSE: char = '）';
/// Joiner between translated effects.
pub const EFFECT_JOINER: &str = "，";
/// Prefix for a recognized key whose value has no translation.
pub const UNTRANSLATED_MARKER: &str = "[未翻译]";

/// Escaped and literal non-breaking space forms found in source text.
const NBSP_ARTIFACTS: [&str; 5] = ["/u00a0", "/xa0", "\\u00a0", "\\xa0", "\u{a0}"];

/// Replace non-breaking space artifacts with a space and trim spaces.
pub(crate) fn normalize(s: &str) -> String {
    let mut out = s.to_string();
    for artifact in NBSP_ARTIFACTS {
        if out.contains(artifact) {
            out = out.replace(artifact, " ");
        }
    }
    out.trim_matches(' ').to_string()
}

/// Read-only state every rule may consult.
pub(crate) struct RuleContext<'a> {
    pub tables: &'a LookupTables,
    pub templates: &'a NumericTemplates,
}

/// A substitution strategy for one normalized `key`/`value` pair.
///
/// Returns the translated value part, or `None` to defer to the next rule.
pub(crate) trait LineRule: Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, key: &str, value: &str, ctx: &RuleContext<'_>) -> Option<String>;
}

/// Manufacturer names, always keeping the original in brackets.
struct ManufacturerRule;

impl LineRule for ManufacturerRule {
    fn name(&self) -> &'static str {
        "manufacturer"
    }

    fn apply(&self, key: &str, value: &str, ctx: &RuleContext<'_>) -> Option<String> {
        if key != "Manufacturer" {
            return None;
        }
        let name = ctx.tables.manufacturer(value).unwrap_or(value);
        Some(format!("{name}{ORIGINAL_OPEN}{value}{ORIGINAL_CLOSE}"))
    }
}

/// Comma-separated effect lists, translated item by item.
struct EffectListRule;

impl LineRule for EffectListRule {
    fn name(&self) -> &'static str {
        "effects"
    }

    fn apply(&self, key: &str, value: &str, ctx: &RuleContext<'_>) -> Option<String> {
        if key != "Effect" && key != "Effects" {
            return None;
        }
        let effects: Vec<String> = value
            .split(',')
            .map(normalize)
            .map(|e| match ctx.tables.effect(&e) {
                Some(t) => t.to_string(),
                None => e,
            })
            .collect();
        Some(effects.join(EFFECT_JOINER))
    }
}

/// Curated exact translations scoped to the key.
struct ExactValueRule;

impl LineRule for ExactValueRule {
    fn name(&self) -> &'static str {
        "exact-value"
    }

    fn apply(&self, key: &str, value: &str, ctx: &RuleContext<'_>) -> Option<String> {
        ctx.tables.general_value(key, value).map(str::to_string)
    }
}

/// Numeric templates such as `3.5 kg` → `3.5 千克`.
struct NumericRule;

impl LineRule for NumericRule {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn apply(&self, _key: &str, value: &str, ctx: &RuleContext<'_>) -> Option<String> {
        ctx.templates.find(value).filter(|r| r != value)
    }
}

/// Rules in priority order. The first `Some` wins.
pub(crate) static RULES: &[&dyn LineRule] = &[
    &ManufacturerRule,
    &EffectListRule,
    &ExactValueRule,
    &NumericRule,
];

/// Translate `value` for a recognized `key`, falling back to the
/// untranslated marker.
pub(crate) fn translate_value(key: &str, value: &str, ctx: &RuleContext<'_>) -> String {
    for rule in RULES {
        if let Some(translated) = rule.apply(key, value, ctx) {
            trace!("rule {} matched {key}: {value}", rule.name());
            return translated;
        }
    }
    if value.is_empty() || value == "None" {
        warn!("{key}: {value:?} has no usable value; marking untranslated");
    }
    format!("{UNTRANSLATED_MARKER}{value}")
}
