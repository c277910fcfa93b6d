//! Local text corpora (`id=text` ini files).

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::error::FillError;
use crate::tables::strip_bom;

/// Replacement character left by lossy decoding upstream.
const UNKNOWN_CHAR: char = '\u{fffd}';

/// Normalizes corpus text as it is read.
pub trait TextProcessor {
    fn process(&self, text: &str) -> String;
}

/// Collapses spaces after a full-width colon and replaces U+00A0.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralProcessor;

impl TextProcessor for GeneralProcessor {
    fn process(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut after_colon = false;
        for c in text.chars() {
            if after_colon && c == ' ' {
                continue;
            }
            after_colon = c == '：';
            out.push(if c == '\u{a0}' { ' ' } else { c });
        }
        out
    }
}

/// Original and translated text for one ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry<'a> {
    pub en: Option<&'a str>,
    pub cn: Option<&'a str>,
}

/// Parallel English and Chinese corpora keyed by text ID.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    ids: BTreeSet<String>,
    en: HashMap<String, String>,
    cn: HashMap<String, String>,
}

impl Corpus {
    /// Read both corpus files from `dir`.
    pub fn load(
        dir: &Path,
        en_file: &str,
        cn_file: &str,
        processor: Option<&dyn TextProcessor>,
    ) -> Result<Self, FillError> {
        let en = read_corpus_file(&dir.join(en_file))?;
        let cn = read_corpus_file(&dir.join(cn_file))?;
        Ok(Self::from_sources(&en, &cn, processor))
    }

    /// Build a corpus from already-read file contents.
    pub fn from_sources(en: &str, cn: &str, processor: Option<&dyn TextProcessor>) -> Self {
        let mut corpus = Self::default();
        corpus.en = parse_corpus(en, processor, &mut corpus.ids);
        corpus.cn = parse_corpus(cn, processor, &mut corpus.ids);
        corpus
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Both texts for `id`, or `None` if neither corpus knows it.
    pub fn get(&self, id: &str) -> Option<CorpusEntry<'_>> {
        if !self.ids.contains(id) {
            return None;
        }
        Some(CorpusEntry {
            en: self.en.get(id).map(String::as_str),
            cn: self.cn.get(id).map(String::as_str),
        })
    }

    /// IDs matching `pattern` at their start, in sorted order.
    pub fn find_ids(&self, pattern: &Regex, ignore_case: bool) -> Vec<&str> {
        self.ids
            .iter()
            .filter(|id| {
                let candidate = if ignore_case {
                    id.to_lowercase()
                } else {
                    id.to_string()
                };
                pattern.find(&candidate).is_some_and(|m| m.start() == 0)
            })
            .map(String::as_str)
            .collect()
    }
}

fn read_corpus_file(path: &Path) -> Result<String, FillError> {
    info!("Reading {}", path.display());
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn parse_corpus(
    content: &str,
    processor: Option<&dyn TextProcessor>,
    ids: &mut BTreeSet<String>,
) -> HashMap<String, String> {
    let content = strip_bom(content).replace(UNKNOWN_CHAR, " ");
    let mut map = HashMap::new();
    for line in content.lines() {
        if line.is_empty() {
            continue;
        }
        let (id, text) = line.split_once('=').unwrap_or((line, ""));
        ids.insert(id.to_string());
        let text = match processor {
            Some(p) => p.process(text),
            None => text.to_string(),
        };
        map.insert(id.to_string(), text);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_processor() {
        let p = GeneralProcessor;
        assert_eq!(p.process("重量：   12\u{a0}kg"), "重量：12 kg");
    }

    #[test]
    fn test_get_merges_both_corpora() {
        let corpus = Corpus::from_sources(
            "item_desc_knife=Weight: 1\nitem_name_knife=Knife\n",
            "item_name_knife=刀\nui_only=界面\n",
            None,
        );
        assert_eq!(corpus.len(), 3);
        assert_eq!(
            corpus.get("item_desc_knife"),
            Some(CorpusEntry {
                en: Some("Weight: 1"),
                cn: None
            })
        );
        assert_eq!(
            corpus.get("item_name_knife"),
            Some(CorpusEntry {
                en: Some("Knife"),
                cn: Some("刀")
            })
        );
        assert_eq!(corpus.get("missing"), None);
    }

    #[test]
    fn test_unknown_chars_become_spaces() {
        let corpus = Corpus::from_sources("\u{feff}a=x\u{fffd}y\n", "", None);
        assert_eq!(corpus.get("a").and_then(|e| e.en), Some("x y"));
    }

    #[test]
    fn test_find_ids_anchors_at_start() {
        let corpus = Corpus::from_sources(
            "Item_Desc_A=1\nitem_desc_b=2\nshop_item_desc_c=3\n",
            "",
            None,
        );
        let re = Regex::new("item_desc").unwrap();
        assert_eq!(corpus.find_ids(&re, false), vec!["item_desc_b"]);
        assert_eq!(corpus.find_ids(&re, true), vec!["Item_Desc_A", "item_desc_b"]);
    }

    #[test]
    fn test_load_reads_files() {
        let tmp = std::env::temp_dir().join("__descfill_test_corpus__");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(&tmp).unwrap();
        std::fs::write(tmp.join("en.ini"), "k=Mass:  3\n").unwrap();
        std::fs::write(tmp.join("cn.ini"), "k=质量：  3\n").unwrap();

        let processor = GeneralProcessor;
        let corpus = Corpus::load(&tmp, "en.ini", "cn.ini", Some(&processor)).unwrap();
        let entry = corpus.get("k").unwrap();
        assert_eq!(entry.en, Some("Mass:  3"));
        assert_eq!(entry.cn, Some("质量：3"));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
