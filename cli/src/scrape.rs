//! Web page fetching for scraping search results.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokio::runtime::Handle;

use studypdf::crew::PageFetcher;
use studypdf::Error;

/// Upper bound on a downloaded page body.
const MAX_BODY_BYTES: usize = 512 * 1024;

/// HTTP fetcher exposing the synchronous [`PageFetcher`] interface.
pub struct WebFetcher {
    client: Client,
    runtime: Handle,
}

impl WebFetcher {
    /// Create a fetcher that blocks on the given runtime.
    pub fn new(runtime: Handle) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(20))
                .user_agent(concat!("studypdf/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            runtime,
        }
    }

    async fn get(&self, url: &str) -> Result<String, Error> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned {}", url, status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("text/html")
            .to_string();
        if !is_text(&content_type) {
            return Err(Error::Fetch(format!(
                "{} is not a text page ({})",
                url, content_type
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("failed to read {}: {}", url, e)))?;
        Ok(truncate_body(body))
    }
}

impl PageFetcher for WebFetcher {
    fn fetch(&self, url: &str) -> studypdf::Result<String> {
        self.runtime.block_on(self.get(url))
    }
}

fn is_text(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.starts_with("text/") || mime == "application/xhtml+xml"
}

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_BODY_BYTES {
        let mut cut = MAX_BODY_BYTES;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_text() {
        assert!(is_text("text/html; charset=utf-8"));
        assert!(is_text("Text/Plain"));
        assert!(is_text("application/xhtml+xml"));
        assert!(!is_text("application/pdf"));
        assert!(!is_text("image/png"));
    }

    #[test]
    fn test_truncate_body_keeps_char_boundary() {
        let body = "é".repeat(MAX_BODY_BYTES);
        let truncated = truncate_body(body);
        assert!(truncated.len() <= MAX_BODY_BYTES);
        assert!(truncated.chars().all(|c| c == 'é'));

        assert_eq!(truncate_body("short".to_string()), "short");
    }

    #[test]
    fn test_fetchers_share_one_runtime() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let first = WebFetcher::new(runtime.handle().clone());
        let second = WebFetcher::new(runtime.handle().clone());

        for fetcher in [&first, &second] {
            let err = fetcher.fetch("not a url").unwrap_err();
            assert!(matches!(err, Error::Fetch(_)));
        }
    }
}
