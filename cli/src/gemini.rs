//! Gemini text generation over the public REST API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;

use studypdf::crew::LanguageModel;
use studypdf::Error;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini client exposing the synchronous [`LanguageModel`] interface.
pub struct GeminiModel {
    client: Client,
    runtime: Handle,
    api_key: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GeminiModel {
    /// Create a client for an API key that blocks on the given runtime.
    pub fn new(api_key: impl Into<String>, runtime: Handle) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(300))
                .build()
                .unwrap_or_default(),
            runtime,
            api_key: api_key.into(),
            temperature: 0.7,
        }
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String, Error> {
        let url = format!(
            "{}/models/{}:generateContent",
            API_BASE,
            model_name(model)
        );
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("failed to reach Gemini: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());
            log::error!("Gemini API error ({}): {}", status, body);
            return Err(Error::Provider(format!("Gemini API error ({}): {}", status, body)));
        }

        let parsed = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| Error::Provider(format!("invalid Gemini response: {}", e)))?;
        Ok(response_text(&parsed))
    }
}

impl LanguageModel for GeminiModel {
    fn generate(&self, model: &str, prompt: &str) -> studypdf::Result<String> {
        self.runtime.block_on(self.complete(model, prompt))
    }
}

/// Strip a `gemini/` provider prefix from a model id.
fn model_name(model: &str) -> &str {
    model.strip_prefix("gemini/").unwrap_or(model)
}

/// Concatenate the text parts of the first candidate.
fn response_text(response: &GenerateResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}
