use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use crates::{
    domain::{
        repositories::{
            monitoring_jobs::MonitoringJobRepository, subscriptions::SubscriptionRepository,
        },
        value_objects::monitoring::ReportDto,
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
    reports::{ReportsError, ReportsUseCase},
    subscription_gate::SubscriptionGate,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let monitoring_job_repository = MonitoringJobPostgres::new(Arc::clone(&db_pool));
    let reports_usecase = ReportsUseCase::new(
        Arc::new(SubscriptionGate::new(Arc::new(subscription_repository))),
        Arc::new(monitoring_job_repository),
    );

    Router::new()
        .route("/", get(latest_report))
        .with_state(Arc::new(reports_usecase))
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub user_email: String,
}

#[derive(Debug, Serialize)]
struct ReportResponse {
    success: bool,
    data: ReportDto,
}

pub async fn latest_report<S, M>(
    State(reports_usecase): State<Arc<ReportsUseCase<S, M>>>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MonitoringJobRepository + Send + Sync + 'static,
{
    match reports_usecase.latest_report(query.user_email).await {
        Ok(data) => (
            StatusCode::OK,
            Json(ReportResponse {
                success: true,
                data,
            }),
        )
            .into_response(),
        Err(err) => {
            let status = err.status_code();
            warn!(status = status.as_u16(), error = %err, "reports: retrieval failed");

            let body = match &err {
                // Machine-readable flag so the client can route straight to
                // the payment flow.
                ReportsError::SubscriptionRequired => {
                    ErrorBody::new(err.to_string()).with_unsubscribed_flag()
                }
                _ => ErrorBody::new(err.to_string()),
            };
            error_response(status, body)
        }
    }
}
