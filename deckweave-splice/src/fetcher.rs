use crate::error::{Result, SpliceError};
use crate::extract::{self, ExtractRule};
use crate::fragment::Fragment;
use reqwest::Client;
use scraper::Html;
use tracing::{debug, info};
use url::Url;

/// Fetches the fragment document over HTTP. One GET per load, no retries;
/// the only backstop is the client timeout.
pub struct FragmentFetcher {
    client: Client,
}

impl FragmentFetcher {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Deckweave/0.1 (https://github.com/deckweave/deckweave)")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch the fragment document body. A non-success status is an error,
    /// matching the terminal error state of the splice.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let parsed =
            Url::parse(url).map_err(|e| SpliceError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("Fetching fragment from {}", parsed);
        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpliceError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Fetch, parse, and extract in one pass.
    pub async fn load(&self, url: &str, rules: &[ExtractRule]) -> Result<Fragment> {
        let body = self.fetch(url).await?;
        let doc = Html::parse_document(&body);
        let fragment = extract::extract(&doc, url, rules)?;
        info!(
            "Fragment loaded from {}: {} blocks, {} styles, {} missing",
            url,
            fragment.blocks.len(),
            fragment.styles.len(),
            fragment.missing.len()
        );
        Ok(fragment)
    }
}

impl Default for FragmentFetcher {
    fn default() -> Self {
        Self::new()
    }
}
