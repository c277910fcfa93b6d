//! Paratranz HTTP API.
//!
//! Docs: <https://paratranz.cn/docs>

pub mod types;


use async_trait::async_trait;
use descfill_core::config::ParatranzConfig;
use descfill_core::FillError;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use types::{StringEntry, StringPage, TranslationUpdate};

/// Stage of a string nobody has translated yet.
pub const STAGE_UNTRANSLATED: i64 = 0;

/// Remote operations the filler needs from a translation project.
#[async_trait]
pub trait TranslationApi: Send + Sync {
    /// One page of untranslated strings (pages start at 1).
    async fn list_untranslated(&self, page: u32) -> Result<StringPage, FillError>;

    /// Fetch a single string with its current stage.
    async fn get_string(&self, id: u64) -> Result<StringEntry, FillError>;

    /// Submit a translation for a string.
    async fn put_translation(
        &self,
        id: u64,
        update: &TranslationUpdate,
    ) -> Result<StringEntry, FillError>;

    /// Page size used when listing.
    fn page_size(&self) -> u32;
}

/// Paratranz project client using the token auth header.
pub struct ParatranzClient {
    client: reqwest::Client,
    base_url: String,
    project_id: u64,
    token: String,
    page_size: u32,
}

impl ParatranzClient {
    /// Create a client from config.
    pub fn new(config: &ParatranzConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id,
            token: config.token.clone(),
            page_size: config.page_size,
        }
    }

    pub(crate) fn strings_url(&self) -> String {
        format!("{}/projects/{}/strings", self.base_url, self.project_id)
    }

    pub(crate) fn string_url(&self, id: u64) -> String {
        format!("{}/{id}", self.strings_url())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, FillError> {
        let resp = request
            .header("Authorization", &self.token)
            .send()
            .await
            .map_err(|e| FillError::Api(format!("paratranz request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(FillError::Api(format!("paratranz returned {status}: {text}")));
        }

        resp.json()
            .await
            .map_err(|e| FillError::Api(format!("paratranz: failed to parse response: {e}")))
    }
}

#[async_trait]
impl TranslationApi for ParatranzClient {
    async fn list_untranslated(&self, page: u32) -> Result<StringPage, FillError> {
        let url = self.strings_url();
        debug!("paratranz: GET {url} page={page}");
        let request = self.client.get(&url).query(&[
            ("stage", STAGE_UNTRANSLATED.to_string()),
            ("page", page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ]);
        self.send(request).await
    }

    async fn get_string(&self, id: u64) -> Result<StringEntry, FillError> {
        let url = self.string_url(id);
        debug!("paratranz: GET {url}");
        self.send(self.client.get(&url)).await
    }

    async fn put_translation(
        &self,
        id: u64,
        update: &TranslationUpdate,
    ) -> Result<StringEntry, FillError> {
        let url = self.string_url(id);
        debug!("paratranz: PUT {url} {}", serde_json::to_string(update)?);
        self.send(self.client.put(&url).json(update)).await
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }
}
