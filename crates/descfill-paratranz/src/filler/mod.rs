//! Fill untranslated item descriptions with template translations.
//!
//! Pages through untranslated strings, keeps those whose key looks like an
//! item description, runs each through the [`Replacer`], and writes the
//! result back as a stage-0 translation.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use descfill_core::{FillError, Replacer};
use regex::Regex;
use tracing::{debug, info};

use crate::client::{StringEntry, TranslationApi, TranslationUpdate, STAGE_UNTRANSLATED};

/// What happened to a single target string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// A translation was produced (and submitted, unless dry-run).
    Filled,
    /// Someone changed the string since it was listed.
    StageChanged,
    /// No line of the description was recognized.
    NoMatch,
}

/// Drives the fetch → replace → submit loop against a translation API.
pub struct Filler<A> {
    api: A,
    replacer: Replacer,
    key_pattern: Regex,
    targets: BTreeMap<u64, StringEntry>,
}

impl<A: TranslationApi> Filler<A> {
    /// `key_pattern` is matched at the start of each lowercased key.
    pub fn new(api: A, replacer: Replacer, key_pattern: &str) -> Result<Self, FillError> {
        let key_pattern = Regex::new(key_pattern)
            .map_err(|e| FillError::Config(format!("invalid key_pattern {key_pattern:?}: {e}")))?;
        Ok(Self {
            api,
            replacer,
            key_pattern,
            targets: BTreeMap::new(),
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Whether an entry key names an item description.
    pub fn is_target_key(&self, key: &str) -> bool {
        self.key_pattern
            .find(&key.to_lowercase())
            .is_some_and(|m| m.start() == 0)
    }

    /// Target IDs collected so far, ascending.
    pub fn target_ids(&self) -> Vec<u64> {
        self.targets.keys().copied().collect()
    }

    fn keep_targets(&mut self, results: Vec<StringEntry>) {
        for entry in results {
            if self.is_target_key(&entry.key) {
                self.targets.insert(entry.id, entry);
            }
        }
    }

    /// Page through every untranslated string and keep the descriptions.
    pub async fn collect_todo(&mut self) -> Result<usize, FillError> {
        self.targets.clear();

        let first = self.api.list_untranslated(1).await?;
        let page_count = first.page_count;
        info!(
            "about {} untranslated strings, filtering descriptions",
            u64::from(self.api.page_size()) * u64::from(page_count)
        );
        self.keep_targets(first.results);

        for page in 2..=page_count {
            let next = self.api.list_untranslated(page).await?;
            self.keep_targets(next.results);
        }

        info!("{} untranslated descriptions", self.targets.len());
        Ok(self.targets.len())
    }

    /// Process one target. Submits only when `write` is set.
    pub async fn fill_one(&self, id: u64, write: bool) -> Result<FillOutcome, FillError> {
        let entry = self.api.get_string(id).await?;
        if entry.stage != STAGE_UNTRANSLATED {
            info!("ID {id} was updated (stage {}), skipping", entry.stage);
            return Ok(FillOutcome::StageChanged);
        }

        let translation = self.replacer.replace(&entry.original);
        if translation.is_empty() {
            info!("ID {id} has no match, skipping");
            return Ok(FillOutcome::NoMatch);
        }

        if write {
            let update = TranslationUpdate {
                stage: STAGE_UNTRANSLATED,
                translation,
            };
            let saved = self.api.put_translation(id, &update).await?;
            info!("ID {id} filled: {}", saved.translation);
        } else {
            debug!("ID {id} would be filled: {translation}");
        }
        Ok(FillOutcome::Filled)
    }

    async fn process(&mut self, write: bool) -> Result<usize, FillError> {
        if self.targets.is_empty() {
            self.collect_todo().await?;
        }

        let mut count = 0;
        for (id, entry) in &self.targets {
            info!("processing id: {id}, key: {}", entry.key);
            if self.fill_one(*id, write).await? == FillOutcome::Filled {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Fill every target description. Returns how many were submitted.
    pub async fn run(&mut self) -> Result<usize, FillError> {
        self.process(true).await
    }

    /// Count the targets that would be filled, without submitting.
    pub async fn check(&mut self) -> Result<usize, FillError> {
        self.process(false).await
    }
}
