use crate::error::{DashboardError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "gemma3:1b";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Builds the prompt sent to the model, seeding it with documentation when
/// some was supplied.
pub fn compose_prompt(prompt: &str, context: Option<&str>) -> String {
    match context {
        Some(context) if !context.is_empty() => {
            format!("Context:\n{context}\n\nQuestion:\n{prompt}\n\nAnswer:")
        }
        _ => prompt.to_string(),
    }
}

/// Locally hosted text-generation service (Ollama `generate` API)
#[derive(Debug, Clone)]
pub struct ChatModel {
    client: Client,
    base_url: Url,
    model: String,
}

impl ChatModel {
    pub fn new(base_url: Url, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn chat(&self, prompt: &str, context: Option<&str>) -> Result<String> {
        let full_prompt = compose_prompt(prompt, context);
        let url = self
            .base_url
            .join("api/generate")
            .map_err(|e| DashboardError::ConfigError(format!("Invalid model URL: {}", e)))?;

        debug!(model = %self.model, prompt_len = full_prompt.len(), "Sending chat prompt");

        let response = self
            .client
            .post(url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt: &full_prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::TransportError(format!(
                "Ollama API error: {}",
                status.canonical_reason().unwrap_or("unknown status")
            )));
        }

        let body: GenerateResponse = response.json().await?;
        info!(model = %self.model, response_len = body.response.len(), "Model responded");
        Ok(body.response)
    }
}
