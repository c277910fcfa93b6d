use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use descfill_core::replacer::DISCLAIMER;
use descfill_core::tables::LookupTables;
use descfill_core::template::NumericTemplates;

use super::*;
use crate::client::StringPage;

/// In-memory translation project.
struct FakeApi {
    page_size: u32,
    pages: Vec<Vec<StringEntry>>,
    strings: Mutex<HashMap<u64, StringEntry>>,
    puts: Mutex<Vec<(u64, TranslationUpdate)>>,
    listed: Mutex<Vec<u32>>,
}

impl FakeApi {
    fn new(page_size: u32, entries: Vec<StringEntry>) -> Self {
        let strings = entries.iter().map(|e| (e.id, e.clone())).collect();
        let pages = entries
            .chunks(page_size as usize)
            .map(|c| c.to_vec())
            .collect();
        Self {
            page_size,
            pages,
            strings: Mutex::new(strings),
            puts: Mutex::new(Vec::new()),
            listed: Mutex::new(Vec::new()),
        }
    }

    fn set_stage(&self, id: u64, stage: i64) {
        if let Some(e) = self.strings.lock().unwrap().get_mut(&id) {
            e.stage = stage;
        }
    }
}

#[async_trait]
impl TranslationApi for FakeApi {
    async fn list_untranslated(&self, page: u32) -> Result<StringPage, FillError> {
        self.listed.lock().unwrap().push(page);
        Ok(StringPage {
            page,
            page_count: self.pages.len() as u32,
            results: self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default(),
        })
    }

    async fn get_string(&self, id: u64) -> Result<StringEntry, FillError> {
        self.strings
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| FillError::Api(format!("paratranz returned 404 Not Found: {id}")))
    }

    async fn put_translation(
        &self,
        id: u64,
        update: &TranslationUpdate,
    ) -> Result<StringEntry, FillError> {
        self.puts.lock().unwrap().push((id, update.clone()));
        let mut strings = self.strings.lock().unwrap();
        let entry = strings
            .get_mut(&id)
            .ok_or_else(|| FillError::Api(format!("unknown id {id}")))?;
        entry.translation = update.translation.clone();
        Ok(entry.clone())
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}

fn entry(id: u64, key: &str, original: &str) -> StringEntry {
    StringEntry {
        id,
        key: key.to_string(),
        original: original.to_string(),
        translation: String::new(),
        stage: 0,
    }
}

fn replacer() -> Replacer {
    Replacer::new(
        LookupTables::from_sources("Weight=重量\nManufacturer=制造商\n", "", "Acme=阿克米\n", ""),
        NumericTemplates::parse("[NUM] kg=[NUM] 千克\n"),
    )
}

fn project() -> Vec<StringEntry> {
    vec![
        entry(3, "item_desc_knife", "Weight: 2 kg\\nA sharp knife."),
        entry(1, "Item_Desc_Helmet", "Manufacturer: Acme"),
        entry(2, "item_name_knife", "Weight: 2 kg"),
        entry(4, "item_desc_rock", "Just a rock."),
        entry(5, "ui_item_desc_label", "Weight: 1 kg"),
    ]
}

#[test]
fn test_target_key_is_case_insensitive_and_anchored() {
    let filler = Filler::new(FakeApi::new(10, Vec::new()), replacer(), "^item_desc").unwrap();
    assert!(filler.is_target_key("item_desc_knife"));
    assert!(filler.is_target_key("ITEM_DESC_KNIFE"));
    assert!(!filler.is_target_key("item_name_knife"));
    assert!(!filler.is_target_key("ui_item_desc_label"));

    let unanchored = Filler::new(FakeApi::new(10, Vec::new()), replacer(), "item_desc").unwrap();
    assert!(
        !unanchored.is_target_key("ui_item_desc_label"),
        "keys must match from their first character"
    );
}

#[test]
fn test_invalid_key_pattern_is_config_error() {
    let err = Filler::new(FakeApi::new(10, Vec::new()), replacer(), "(").err();
    assert!(matches!(err, Some(FillError::Config(_))));
}

#[tokio::test]
async fn test_collect_todo_pages_and_filters() {
    let mut filler = Filler::new(FakeApi::new(2, project()), replacer(), "^item_desc").unwrap();
    let n = filler.collect_todo().await.unwrap();
    assert_eq!(n, 3);
    assert_eq!(filler.target_ids(), vec![1, 3, 4]);
    assert_eq!(
        *filler.api().listed.lock().unwrap(),
        vec![1, 2, 3],
        "first page is fetched once"
    );
}

#[tokio::test]
async fn test_run_fills_matching_descriptions() {
    let mut filler = Filler::new(FakeApi::new(2, project()), replacer(), "^item_desc").unwrap();
    let count = filler.run().await.unwrap();
    assert_eq!(count, 2);

    let puts = filler.api().puts.lock().unwrap().clone();
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[0].0, 1);
    assert_eq!(
        puts[0].1,
        TranslationUpdate {
            stage: 0,
            translation: format!("{DISCLAIMER}制造商：阿克米（Acme）"),
        }
    );
    assert_eq!(puts[1].0, 3);
    assert_eq!(
        puts[1].1.translation,
        format!("{DISCLAIMER}重量：2 千克\\nA sharp knife.")
    );
}

#[tokio::test]
async fn test_run_skips_strings_whose_stage_changed() {
    let api = FakeApi::new(10, project());
    api.set_stage(1, 1);
    let mut filler = Filler::new(api, replacer(), "^item_desc").unwrap();
    assert_eq!(filler.run().await.unwrap(), 1);
    assert_eq!(filler.fill_one(1, true).await.unwrap(), FillOutcome::StageChanged);
    assert_eq!(filler.fill_one(4, true).await.unwrap(), FillOutcome::NoMatch);

    let puts = filler.api().puts.lock().unwrap();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].0, 3);
}

#[tokio::test]
async fn test_check_counts_without_writing() {
    let mut filler = Filler::new(FakeApi::new(10, project()), replacer(), "^item_desc").unwrap();
    assert_eq!(filler.check().await.unwrap(), 2);
    assert!(filler.api().puts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_project() {
    let mut filler = Filler::new(FakeApi::new(10, Vec::new()), replacer(), "^item_desc").unwrap();
    assert_eq!(filler.run().await.unwrap(), 0);
    assert_eq!(*filler.api().listed.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn test_api_error_propagates() {
    let mut filler = Filler::new(FakeApi::new(10, project()), replacer(), "^item_desc").unwrap();
    filler.collect_todo().await.unwrap();
    let err = filler.fill_one(99, false).await.unwrap_err();
    assert!(matches!(err, FillError::Api(_)));
}
