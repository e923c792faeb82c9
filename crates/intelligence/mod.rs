pub mod ollama_client;
pub mod page_fetcher;

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

/// Outbound page fetch + text extraction, the first stage of every analysis
/// pipeline (demo and worker). Returns cleaned text capped at `max_chars`.
#[async_trait]
#[automock]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page_text(&self, url: &str, max_chars: usize) -> Result<String>;
}

/// Text-generation backend. The prompt is fully assembled by the caller;
/// streaming is never used.
#[async_trait]
#[automock]
pub trait AnalysisEngine: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
