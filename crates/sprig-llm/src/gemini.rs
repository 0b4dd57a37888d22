//! Client for the Google Generative Language (Gemini) REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, LlmResult};
use crate::{Generation, TextGenerator};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `generateContent` client. One attempt per call, no retries.
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> LlmResult<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::Config("missing API key".to_string()));
        }
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Config(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    total_token_count: u32,
}

fn extract_generation(response: GenerateContentResponse) -> LlmResult<Generation> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| LlmError::MalformedResponse("no candidate text".to_string()))?;

    let tokens_used = response
        .usage_metadata
        .map(|u| u.total_token_count)
        .unwrap_or(0);

    Ok(Generation { text, tokens_used })
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> LlmResult<Generation> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let generation = extract_generation(response)?;
        tracing::debug!(tokens = generation.tokens_used, "generation complete");
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_and_token_count() {
        let raw = serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "Reset via the sign-in page."}]}}
            ],
            "usageMetadata": {"promptTokenCount": 40, "totalTokenCount": 52}
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let generation = extract_generation(response).unwrap();
        assert_eq!(generation.text, "Reset via the sign-in page.");
        assert_eq!(generation.tokens_used, 52);
    }

    #[test]
    fn missing_candidates_is_malformed() {
        let raw = serde_json::json!({"candidates": []});
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert!(matches!(
            extract_generation(response),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_usage_metadata_defaults_to_zero() {
        let raw = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        });
        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(extract_generation(response).unwrap().tokens_used, 0);
    }

    #[test]
    fn empty_api_key_is_a_config_error() {
        let result = GeminiClient::new(GeminiConfig::new(""));
        assert!(matches!(result, Err(LlmError::Config(_))));
    }
}
