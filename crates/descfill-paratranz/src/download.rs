//! Download the source text corpora into the text directory.

use std::path::{Path, PathBuf};

use descfill_core::config::CorpusConfig;
use descfill_core::FillError;
use tracing::info;

/// `(url, destination)` for every corpus file.
pub fn corpus_targets(corpus: &CorpusConfig, dir: &Path) -> Vec<(String, PathBuf)> {
    corpus
        .downloads()
        .iter()
        .map(|(url, file)| (url.to_string(), dir.join(file)))
        .collect()
}

/// Fetch one file and write it to `dest`.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> Result<(), FillError> {
    info!("Downloading {} from {url}...", dest.display());
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| FillError::Api(format!("download {url} failed: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status();
        return Err(FillError::Api(format!("download {url} returned {status}")));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| FillError::Api(format!("download {url}: failed to read body: {e}")))?;
    tokio::fs::write(dest, &bytes).await?;
    info!("Download {} complete ({} bytes).", dest.display(), bytes.len());
    Ok(())
}

/// Download every corpus file into `dir`, creating it if needed.
pub async fn download_corpus(
    client: &reqwest::Client,
    corpus: &CorpusConfig,
    dir: &Path,
) -> Result<Vec<PathBuf>, FillError> {
    tokio::fs::create_dir_all(dir).await?;
    let mut written = Vec::new();
    for (url, dest) in corpus_targets(corpus, dir) {
        download_file(client, &url, &dest).await?;
        written.push(dest);
    }
    Ok(written)
}
