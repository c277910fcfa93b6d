//! ntfy push notifications.

use descfill_core::config::NotifyConfig;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct NtfyMessage<'a> {
    pub topic: &'a str,
    pub title: &'a str,
    pub message: &'a str,
}

/// Publish a message to the configured ntfy topic.
pub(crate) async fn send(
    client: &reqwest::Client,
    cfg: &NotifyConfig,
    title: &str,
    message: &str,
) -> anyhow::Result<()> {
    let body = NtfyMessage {
        topic: &cfg.topic,
        title,
        message,
    };
    let resp = client.post(&cfg.url).json(&body).send().await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        anyhow::bail!("ntfy returned {status}: {text}");
    }
    info!("notified ntfy topic {}", cfg.topic);
    Ok(())
}
