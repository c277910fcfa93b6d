//! Offline preview against the local corpus.

use descfill_core::corpus::Corpus;
use descfill_core::Replacer;
use regex::Regex;

/// Replace every untranslated description in the corpus whose ID matches
/// `pattern`. A description counts as untranslated when the Chinese text is
/// missing or identical to the English one.
pub(crate) fn preview(
    replacer: &Replacer,
    corpus: &Corpus,
    pattern: &Regex,
    limit: Option<usize>,
) -> Vec<(String, String)> {
    corpus
        .find_ids(pattern, true)
        .into_iter()
        .filter_map(|id| {
            let entry = corpus.get(id)?;
            let en = entry.en?;
            if entry.cn.is_some_and(|cn| cn != en) {
                return None;
            }
            let output = replacer.replace(en);
            (!output.is_empty()).then(|| (id.to_string(), output))
        })
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}
