use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{DateTime, Utc};
use crates::{
    domain::value_objects::demo_analysis::DemoAnalysisRequest,
    intelligence::{AnalysisEngine, PageFetcher, ollama_client::OllamaClient,
        page_fetcher::PageTextClient},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::axum_http::error_responses::{ErrorBody, error_response};
use crate::config::config_model::DotEnvyConfig;
use crate::usecases::demo_analysis::DemoAnalysisUseCase;

pub fn routes(config: Arc<DotEnvyConfig>) -> Result<Router> {
    let page_fetcher = PageTextClient::new(
        config.demo.user_agent.clone(),
        config.demo.fetch_timeout,
    )?;
    let analysis_engine = OllamaClient::new(
        config.ollama.generate_url.clone(),
        config.ollama.model.clone(),
    );
    let demo_analysis_usecase =
        DemoAnalysisUseCase::new(Arc::new(page_fetcher), Arc::new(analysis_engine));

    Ok(Router::new()
        .route("/", post(analyze))
        .with_state(Arc::new(demo_analysis_usecase)))
}

#[derive(Debug, Serialize)]
struct DemoAnalysisResponse {
    success: bool,
    analysis: String,
    url: String,
    timestamp: DateTime<Utc>,
}

pub async fn analyze<F, G>(
    State(demo_analysis_usecase): State<Arc<DemoAnalysisUseCase<F, G>>>,
    Json(payload): Json<DemoAnalysisRequest>,
) -> Response
where
    F: PageFetcher + 'static,
    G: AnalysisEngine + 'static,
{
    match demo_analysis_usecase.analyze(payload.url).await {
        Ok(dto) => (
            StatusCode::OK,
            Json(DemoAnalysisResponse {
                success: true,
                analysis: dto.analysis,
                url: dto.url,
                timestamp: dto.timestamp,
            }),
        )
            .into_response(),
        Err(err) => {
            let status = err.status_code();
            warn!(status = status.as_u16(), error = %err, "demo_analysis: request failed");
            error_response(status, ErrorBody::new(err.to_string()))
        }
    }
}
