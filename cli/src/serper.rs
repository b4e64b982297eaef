//! Serper web search.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;

use studypdf::crew::{SearchHit, SearchTool};
use studypdf::Error;

const SEARCH_URL: &str = "https://google.serper.dev/search";

/// Serper client exposing the synchronous [`SearchTool`] interface.
pub struct SerperSearch {
    client: Client,
    runtime: Handle,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<SearchHit>,
}

impl SerperSearch {
    /// Create a client for an API key that blocks on the given runtime.
    pub fn new(api_key: impl Into<String>, runtime: Handle) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            runtime,
            api_key: api_key.into(),
        }
    }

    async fn query(&self, query: &str) -> Result<Vec<SearchHit>, Error> {
        let response = self
            .client
            .post(SEARCH_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&SearchRequest { q: query })
            .send()
            .await
            .map_err(|e| Error::Search(format!("failed to reach Serper: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());
            return Err(Error::Search(format!("Serper API error ({}): {}", status, body)));
        }

        let parsed = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| Error::Search(format!("invalid Serper response: {}", e)))?;
        Ok(parsed.organic)
    }
}

impl SearchTool for SerperSearch {
    fn search(&self, query: &str) -> studypdf::Result<Vec<SearchHit>> {
        self.runtime.block_on(self.query(query))
    }
}
