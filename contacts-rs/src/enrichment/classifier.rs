//! Text classification backend seam
//!
//! The batcher talks to whatever stands behind [`TextClassifier`]; the
//! production implementation drives Ollama's HTTP chat API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ContactError, Result};

/// External text-classification dependency.
///
/// Request is a system instruction plus a user payload; the response is raw
/// text the caller parses positionally.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    fn model_name(&self) -> &str;
}

/// Ollama-backed classifier.
pub struct OllamaClassifier {
    model_name: String,
    base_url: String,
    client: reqwest::Client,
}

impl OllamaClassifier {
    pub fn new(model_name: String) -> Self {
        Self {
            model_name,
            base_url: "http://localhost:11434".to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[async_trait]
impl TextClassifier for OllamaClassifier {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = OllamaChatRequest {
            model: self.model_name.clone(),
            messages: vec![
                OllamaMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                OllamaMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            stream: false,
        };

        debug!("OllamaClassifier: sending request to {}/api/chat", self.base_url);

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("OllamaClassifier: request failed with status {}: {}", status, error_text);
            return Err(match status.as_u16() {
                401 | 403 => ContactError::UpstreamAuth(error_text),
                429 => ContactError::RateLimited(error_text),
                _ => ContactError::Classification(format!("{} - {}", status, error_text)),
            });
        }

        let body: OllamaChatResponse = response.json().await?;
        Ok(body.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
