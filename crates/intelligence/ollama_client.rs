use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::intelligence::AnalysisEngine;

/// Minimal Ollama `/api/generate` client built on reqwest.
pub struct OllamaClient {
    http: reqwest::Client,
    generate_url: String,
    model: String,
}

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

impl OllamaClient {
    pub fn new(generate_url: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            generate_url,
            model,
        }
    }
}

#[async_trait]
impl AnalysisEngine for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "ollama: generate requested");

        let resp = self
            .http
            .post(&self.generate_url)
            .header(CONTENT_TYPE, "application/json")
            // The backend is often exposed through an ngrok tunnel in dev.
            .header("ngrok-skip-browser-warning", "true")
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = match resp.text().await {
                Ok(text) if !text.is_empty() => text,
                Ok(_) => "<empty response body>".to_string(),
                Err(err) => format!("<failed to read response body: {err}>"),
            };
            error!(
                status = status.as_u16(),
                model = %self.model,
                response_body = %body,
                "ollama: generate request failed"
            );
            anyhow::bail!("Ollama generate failed: status {}", status);
        }

        let parsed: GenerateResponse = resp.json().await?;
        Ok(parsed.response)
    }
}
