use chrono::Utc;
use crates::domain::{
    entities::subscriptions::UpsertSubscriptionEntity,
    repositories::{
        monitoring_jobs::MonitoringJobRepository, subscriptions::SubscriptionRepository,
    },
    value_objects::{
        enums::{payment_statuses::PaymentStatus, subscription_statuses::SubscriptionStatus},
        payment_webhook::{PaymentNotification, WebhookAck},
        plans::plan_for_amount,
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("No order_id found")]
    MissingOrderId,
    #[error("Failed to update subscription")]
    Internal(#[from] anyhow::Error),
}

impl ActivationError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ActivationError::MissingOrderId => StatusCode::BAD_REQUEST,
            ActivationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ActivationError>;

/// Handles payment-provider IPN notifications. The invoice `order_id` is the
/// subscriber email, so activation is an idempotent per-email upsert.
pub struct ActivationUseCase<S, M>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MonitoringJobRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    monitoring_job_repo: Arc<M>,
}

impl<S, M> ActivationUseCase<S, M>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MonitoringJobRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>, monitoring_job_repo: Arc<M>) -> Self {
        Self {
            subscription_repo,
            monitoring_job_repo,
        }
    }

    pub async fn activate(&self, notification: PaymentNotification) -> UseCaseResult<WebhookAck> {
        let user_email = notification.order_id.trim().to_string();
        if user_email.is_empty() {
            warn!("activation: notification has no order_id, cannot attribute payment");
            return Err(ActivationError::MissingOrderId);
        }

        let payment_status = PaymentStatus::from_str(&notification.payment_status);
        if !payment_status.is_paid() {
            // Acknowledge statuses we intentionally ignore (waiting, expired,
            // ...) so the provider stops retrying.
            info!(
                %user_email,
                payment_status = %notification.payment_status,
                "activation: non-paid status received, no writes"
            );
            return Ok(WebhookAck {
                success: true,
                message: format!("Status received: {}", notification.payment_status),
            });
        }

        info!(
            %user_email,
            payment_status = %payment_status,
            price_amount = ?notification.price_amount,
            "activation: payment confirmed"
        );

        let now = Utc::now();
        self.subscription_repo
            .upsert(UpsertSubscriptionEntity {
                user_email: user_email.clone(),
                status: SubscriptionStatus::Active.to_string(),
                plan: plan_for_amount(notification.price_amount),
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(%user_email, db_error = ?err, "activation: failed to upsert subscription");
                ActivationError::Internal(err)
            })?;

        // The job row exists from day one so the dashboard reads configuration
        // state instead of an error. Failure here must not fail activation.
        if let Err(err) = self
            .monitoring_job_repo
            .ensure_job(user_email.clone(), now)
            .await
        {
            warn!(
                %user_email,
                db_error = ?err,
                "activation: could not create default monitoring job"
            );
        }

        Ok(WebhookAck {
            success: true,
            message: "Subscription activated".to_string(),
        })
    }
}
