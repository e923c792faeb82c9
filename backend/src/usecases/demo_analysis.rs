use chrono::Utc;
use crates::domain::value_objects::demo_analysis::DemoAnalysisDto;
use crates::intelligence::{AnalysisEngine, PageFetcher};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use url::Url;

/// Extraction cap for the demo; bounds prompt cost regardless of how large
/// the target page is.
pub const DEMO_TEXT_LIMIT: usize = 2000;

#[derive(Debug, Error)]
pub enum DemoAnalysisError {
    #[error("URL is required")]
    MissingUrl,
    #[error("Invalid URL format")]
    InvalidUrl,
    #[error("Failed to scrape the website. Some sites block automated access.")]
    ScrapeFailed(#[source] anyhow::Error),
    #[error("AI Analysis engine is currently busy or unavailable.")]
    AnalysisUnavailable(#[source] anyhow::Error),
}

impl DemoAnalysisError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            DemoAnalysisError::MissingUrl | DemoAnalysisError::InvalidUrl => {
                StatusCode::BAD_REQUEST
            }
            DemoAnalysisError::ScrapeFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DemoAnalysisError::AnalysisUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, DemoAnalysisError>;

/// Unauthenticated lead-magnet pipeline: fetch a page, summarize it. Two
/// stages, two failure domains, no retries, no persistence.
pub struct DemoAnalysisUseCase<F, G>
where
    F: PageFetcher + 'static,
    G: AnalysisEngine + 'static,
{
    page_fetcher: Arc<F>,
    analysis_engine: Arc<G>,
}

impl<F, G> DemoAnalysisUseCase<F, G>
where
    F: PageFetcher + 'static,
    G: AnalysisEngine + 'static,
{
    pub fn new(page_fetcher: Arc<F>, analysis_engine: Arc<G>) -> Self {
        Self {
            page_fetcher,
            analysis_engine,
        }
    }

    pub async fn analyze(&self, raw_url: String) -> UseCaseResult<DemoAnalysisDto> {
        let raw_url = raw_url.trim().to_string();
        if raw_url.is_empty() {
            return Err(DemoAnalysisError::MissingUrl);
        }
        // Absolute-URL syntax check only; no network touched on failure.
        let url = Url::parse(&raw_url).map_err(|_| DemoAnalysisError::InvalidUrl)?;

        info!(url = %url, "demo_analysis: demo check requested");

        let text = self
            .page_fetcher
            .fetch_page_text(url.as_str(), DEMO_TEXT_LIMIT)
            .await
            .map_err(|err| {
                error!(url = %url, scrape_error = ?err, "demo_analysis: scrape stage failed");
                DemoAnalysisError::ScrapeFailed(err)
            })?;

        let prompt = build_demo_prompt(&text);
        let analysis = self
            .analysis_engine
            .generate(&prompt)
            .await
            .map_err(|err| {
                error!(url = %url, engine_error = ?err, "demo_analysis: generation stage failed");
                DemoAnalysisError::AnalysisUnavailable(err)
            })?;

        Ok(DemoAnalysisDto {
            analysis,
            url: raw_url,
            timestamp: Utc::now(),
        })
    }
}

fn build_demo_prompt(website_text: &str) -> String {
    format!(
        "You are a competitive intelligence analyst. Below is text from a competitor's website. \n\
Provide a \"Quick Competitive Summary\" focusing on their core value proposition and pricing (if visible). \n\
Keep it under 150 words.\n\nWEBSITE TEXT:\n{website_text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use crates::intelligence::{MockAnalysisEngine, MockPageFetcher};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn invalid_url_is_rejected_before_any_network_call() {
        // No expectations: a fetch or generate call would panic.
        let page_fetcher = MockPageFetcher::new();
        let analysis_engine = MockAnalysisEngine::new();

        let usecase =
            DemoAnalysisUseCase::new(Arc::new(page_fetcher), Arc::new(analysis_engine));
        let err = usecase.analyze("not-a-url".to_string()).await.unwrap_err();

        assert!(matches!(err, DemoAnalysisError::InvalidUrl));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_url_is_rejected() {
        let usecase = DemoAnalysisUseCase::new(
            Arc::new(MockPageFetcher::new()),
            Arc::new(MockAnalysisEngine::new()),
        );
        let err = usecase.analyze("  ".to_string()).await.unwrap_err();
        assert!(matches!(err, DemoAnalysisError::MissingUrl));
    }

    #[tokio::test]
    async fn scrape_failure_is_terminal_and_skips_generation() {
        let mut page_fetcher = MockPageFetcher::new();
        page_fetcher
            .expect_fetch_page_text()
            .returning(|_, _| Box::pin(async { Err(anyhow!("HTTP 404")) }));
        // Generation engine must never be invoked.
        let analysis_engine = MockAnalysisEngine::new();

        let usecase =
            DemoAnalysisUseCase::new(Arc::new(page_fetcher), Arc::new(analysis_engine));
        let err = usecase
            .analyze("https://gone.example.com".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, DemoAnalysisError::ScrapeFailed(_)));
        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn engine_failure_maps_to_service_unavailable() {
        let mut page_fetcher = MockPageFetcher::new();
        page_fetcher
            .expect_fetch_page_text()
            .returning(|_, _| Box::pin(async { Ok("some page text".to_string()) }));
        let mut analysis_engine = MockAnalysisEngine::new();
        analysis_engine
            .expect_generate()
            .returning(|_| Box::pin(async { Err(anyhow!("connection refused")) }));

        let usecase =
            DemoAnalysisUseCase::new(Arc::new(page_fetcher), Arc::new(analysis_engine));
        let err = usecase
            .analyze("https://x.com".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, DemoAnalysisError::AnalysisUnavailable(_)));
        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn success_returns_analysis_with_original_url() {
        let mut page_fetcher = MockPageFetcher::new();
        page_fetcher
            .expect_fetch_page_text()
            .with(eq("https://x.com/"), eq(DEMO_TEXT_LIMIT))
            .returning(|_, _| Box::pin(async { Ok("Pricing starts at $49.".to_string()) }));
        let mut analysis_engine = MockAnalysisEngine::new();
        analysis_engine
            .expect_generate()
            .withf(|prompt| prompt.contains("Pricing starts at $49."))
            .returning(|_| Box::pin(async { Ok("They sell things for $49.".to_string()) }));

        let usecase =
            DemoAnalysisUseCase::new(Arc::new(page_fetcher), Arc::new(analysis_engine));
        let dto = usecase.analyze("https://x.com".to_string()).await.unwrap();

        assert_eq!(dto.analysis, "They sell things for $49.");
        assert_eq!(dto.url, "https://x.com");
    }
}
