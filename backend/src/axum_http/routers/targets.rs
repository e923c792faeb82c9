use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{
            monitoring_jobs::MonitoringJobRepository, subscriptions::SubscriptionRepository,
        },
        value_objects::monitoring::{TargetConfigDto, UpdateTargetsModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            monitoring_jobs::MonitoringJobPostgres, subscriptions::SubscriptionPostgres,
        },
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::axum_http::error_responses::{ErrorBody, error_response};
use crate::usecases::{
    subscription_gate::SubscriptionGate,
    targets::{TargetsError, TargetsUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let monitoring_job_repository = MonitoringJobPostgres::new(Arc::clone(&db_pool));
    let targets_usecase = TargetsUseCase::new(
        Arc::new(SubscriptionGate::new(Arc::new(subscription_repository))),
        Arc::new(monitoring_job_repository),
    );

    Router::new()
        .route("/", get(get_targets))
        .route("/", post(update_targets))
        .with_state(Arc::new(targets_usecase))
}

#[derive(Debug, Deserialize)]
pub struct TargetsQuery {
    #[serde(default)]
    pub user_email: String,
}

#[derive(Debug, Serialize)]
struct TargetsResponse {
    success: bool,
    data: Option<TargetConfigDto>,
}

pub async fn update_targets<S, M>(
    State(targets_usecase): State<Arc<TargetsUseCase<S, M>>>,
    Json(payload): Json<UpdateTargetsModel>,
) -> Response
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MonitoringJobRepository + Send + Sync + 'static,
{
    match targets_usecase.update_targets(payload).await {
        Ok(row) => (
            StatusCode::OK,
            Json(TargetsResponse {
                success: true,
                data: Some(row),
            }),
        )
            .into_response(),
        Err(err) => map_error("update", err),
    }
}

pub async fn get_targets<S, M>(
    State(targets_usecase): State<Arc<TargetsUseCase<S, M>>>,
    Query(query): Query<TargetsQuery>,
) -> Response
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MonitoringJobRepository + Send + Sync + 'static,
{
    match targets_usecase.get_targets(query.user_email).await {
        // `data: null` is the defined "not yet configured" shape.
        Ok(row) => (
            StatusCode::OK,
            Json(TargetsResponse {
                success: true,
                data: row,
            }),
        )
            .into_response(),
        Err(err) => map_error("get", err),
    }
}

fn map_error(label: &str, err: TargetsError) -> Response {
    let status = err.status_code();
    warn!(status = status.as_u16(), error = %err, "targets: {} failed", label);

    let body = match &err {
        TargetsError::SubscriptionRequired => ErrorBody::new(err.to_string())
            .with_details("Please complete your payment to activate the agent."),
        _ => ErrorBody::new(err.to_string()),
    };
    error_response(status, body)
}
