use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use crates::{
    domain::{
        repositories::{
            monitoring_jobs::MonitoringJobRepository, subscriptions::SubscriptionRepository,
        },
        value_objects::payment_webhook::PaymentNotification,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            monitoring_jobs::MonitoringJobPostgres, subscriptions::SubscriptionPostgres,
        },
    },
};
use std::sync::Arc;
use tracing::{error, info};

use crate::axum_http::error_responses::{ErrorBody, error_response};
use crate::usecases::activation::{ActivationError, ActivationUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let monitoring_job_repository = MonitoringJobPostgres::new(Arc::clone(&db_pool));
    let activation_usecase = ActivationUseCase::new(
        Arc::new(subscription_repository),
        Arc::new(monitoring_job_repository),
    );

    Router::new()
        .route("/nowpayments", post(nowpayments))
        .with_state(Arc::new(activation_usecase))
}

/// IPN endpoint. The provider's shared-secret header is not verified here;
/// the handler only attributes the notification via `order_id`.
pub async fn nowpayments<S, M>(
    State(activation_usecase): State<Arc<ActivationUseCase<S, M>>>,
    Json(payload): Json<PaymentNotification>,
) -> Response
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MonitoringJobRepository + Send + Sync + 'static,
{
    info!(payload = ?payload, "payment_webhook: notification received");

    match activation_usecase.activate(payload).await {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(err) => {
            let status = err.status_code();
            error!(
                status = status.as_u16(),
                error = %err,
                "payment_webhook: activation failed"
            );
            match err {
                ActivationError::MissingOrderId => {
                    error_response(status, ErrorBody::new("No order_id found"))
                }
                ActivationError::Internal(_) => {
                    error_response(status, ErrorBody::new("Failed to update subscription"))
                }
            }
        }
    }
}
