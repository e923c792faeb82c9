use chrono::Utc;
use crates::domain::{
    entities::monitoring_jobs::UpsertMonitoringJobEntity,
    repositories::{
        monitoring_jobs::MonitoringJobRepository, subscriptions::SubscriptionRepository,
    },
    value_objects::monitoring::{TargetConfigDto, UpdateTargetsModel},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::usecases::subscription_gate::SubscriptionGate;

#[derive(Debug, Error)]
pub enum TargetsError {
    #[error("user_email is required")]
    MissingEmail,
    #[error("Active subscription required")]
    SubscriptionRequired,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl TargetsError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            TargetsError::MissingEmail => StatusCode::BAD_REQUEST,
            TargetsError::SubscriptionRequired => StatusCode::FORBIDDEN,
            TargetsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, TargetsError>;

/// Reads and writes the up-to-three monitored URLs for a subscriber.
/// Writes are gated on an active subscription; reads only need the email.
pub struct TargetsUseCase<S, M>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MonitoringJobRepository + Send + Sync + 'static,
{
    subscription_gate: Arc<SubscriptionGate<S>>,
    monitoring_job_repo: Arc<M>,
}

impl<S, M> TargetsUseCase<S, M>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MonitoringJobRepository + Send + Sync + 'static,
{
    pub fn new(subscription_gate: Arc<SubscriptionGate<S>>, monitoring_job_repo: Arc<M>) -> Self {
        Self {
            subscription_gate,
            monitoring_job_repo,
        }
    }

    pub async fn update_targets(&self, model: UpdateTargetsModel) -> UseCaseResult<TargetConfigDto> {
        let user_email = model.user_email.trim().to_string();
        if user_email.is_empty() {
            return Err(TargetsError::MissingEmail);
        }

        let active = self
            .subscription_gate
            .is_active(&user_email)
            .await
            .map_err(|err| {
                error!(%user_email, db_error = ?err, "targets: subscription lookup failed");
                TargetsError::Internal(err)
            })?;
        if !active {
            warn!(%user_email, "targets: write rejected, no active subscription");
            return Err(TargetsError::SubscriptionRequired);
        }

        // Slots are stored verbatim; well-formedness is the caller's problem.
        let (url_1, url_2, url_3) = model.normalized_slots();
        info!(
            %user_email,
            url_1 = ?url_1,
            url_2 = ?url_2,
            url_3 = ?url_3,
            "targets: updating monitored urls"
        );

        let row = self
            .monitoring_job_repo
            .upsert_targets(UpsertMonitoringJobEntity {
                user_email: user_email.clone(),
                url_1,
                url_2,
                url_3,
                is_active: true,
                updated_at: Utc::now(),
            })
            .await
            .map_err(|err| {
                error!(%user_email, db_error = ?err, "targets: upsert failed");
                TargetsError::Internal(err)
            })?;

        Ok(TargetConfigDto::from(row))
    }

    /// Absence of a row means "not yet configured", which is a valid state
    /// and not an error.
    pub async fn get_targets(&self, user_email: String) -> UseCaseResult<Option<TargetConfigDto>> {
        let user_email = user_email.trim().to_string();
        if user_email.is_empty() {
            return Err(TargetsError::MissingEmail);
        }

        let row = self
            .monitoring_job_repo
            .find_by_email(user_email.clone())
            .await
            .map_err(|err| {
                error!(%user_email, db_error = ?err, "targets: lookup failed");
                TargetsError::Internal(err)
            })?;

        Ok(row.map(TargetConfigDto::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::{
        entities::{monitoring_jobs::MonitoringJobEntity, subscriptions::SubscriptionEntity},
        repositories::{
            monitoring_jobs::MockMonitoringJobRepository,
            subscriptions::MockSubscriptionRepository,
        },
    };

    fn active_subscription(user_email: &str) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            user_email: user_email.to_string(),
            status: "active".to_string(),
            plan: "premium_50".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn job_row(entity: &UpsertMonitoringJobEntity) -> MonitoringJobEntity {
        MonitoringJobEntity {
            user_email: entity.user_email.clone(),
            url_1: entity.url_1.clone(),
            url_2: entity.url_2.clone(),
            url_3: entity.url_3.clone(),
            is_active: entity.is_active,
            latest_report: None,
            last_content_hash: None,
            last_check_at: None,
            updated_at: entity.updated_at,
        }
    }

    fn model(user_email: &str, slots: [Option<&str>; 3]) -> UpdateTargetsModel {
        UpdateTargetsModel {
            user_email: user_email.to_string(),
            url_1: slots[0].map(str::to_string),
            url_2: slots[1].map(str::to_string),
            url_3: slots[2].map(str::to_string),
        }
    }

    fn usecase_with(
        subscription_repo: MockSubscriptionRepository,
        monitoring_job_repo: MockMonitoringJobRepository,
    ) -> TargetsUseCase<MockSubscriptionRepository, MockMonitoringJobRepository> {
        TargetsUseCase::new(
            Arc::new(SubscriptionGate::new(Arc::new(subscription_repo))),
            Arc::new(monitoring_job_repo),
        )
    }

    #[tokio::test]
    async fn write_without_subscription_is_rejected_and_job_untouched() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(None) }));

        // No expectations set: any call to the job repository panics.
        let monitoring_job_repo = MockMonitoringJobRepository::new();

        let usecase = usecase_with(subscription_repo, monitoring_job_repo);
        let err = usecase
            .update_targets(model("a@b.com", [Some("https://x.com"), None, None]))
            .await
            .unwrap_err();

        assert!(matches!(err, TargetsError::SubscriptionRequired));
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn write_persists_slots_verbatim_with_nulls_for_empty() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let subscription = active_subscription("a@b.com");
        subscription_repo.expect_find_by_email().returning(move |_| {
            let subscription = subscription.clone();
            Box::pin(async move { Ok(Some(subscription)) })
        });

        let mut monitoring_job_repo = MockMonitoringJobRepository::new();
        monitoring_job_repo
            .expect_upsert_targets()
            .withf(|entity| {
                entity.user_email == "a@b.com"
                    && entity.url_1.as_deref() == Some("https://x.com")
                    && entity.url_2.is_none()
                    && entity.url_3.is_none()
                    && entity.is_active
            })
            .times(1)
            .returning(|entity| {
                let row = job_row(&entity);
                Box::pin(async move { Ok(row) })
            });

        let usecase = usecase_with(subscription_repo, monitoring_job_repo);
        let dto = usecase
            .update_targets(model("a@b.com", [Some("https://x.com"), Some(""), None]))
            .await
            .unwrap();

        assert_eq!(dto.url_1.as_deref(), Some("https://x.com"));
        assert!(dto.url_2.is_none());
        assert!(dto.url_3.is_none());
        assert!(dto.is_active);
    }

    #[tokio::test]
    async fn repeated_write_of_same_urls_persists_the_same_row() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let subscription = active_subscription("a@b.com");
        subscription_repo.expect_find_by_email().returning(move |_| {
            let subscription = subscription.clone();
            Box::pin(async move { Ok(Some(subscription)) })
        });

        let mut monitoring_job_repo = MockMonitoringJobRepository::new();
        monitoring_job_repo
            .expect_upsert_targets()
            .times(2)
            .returning(|entity| {
                let row = job_row(&entity);
                Box::pin(async move { Ok(row) })
            });

        let usecase = usecase_with(subscription_repo, monitoring_job_repo);
        let slots = [Some("https://x.com"), Some("https://y.com"), None];
        let first = usecase
            .update_targets(model("a@b.com", slots))
            .await
            .unwrap();
        let second = usecase
            .update_targets(model("a@b.com", slots))
            .await
            .unwrap();

        // Same row apart from the write timestamp.
        assert_eq!(first.user_email, second.user_email);
        assert_eq!(first.url_1, second.url_1);
        assert_eq!(first.url_2, second.url_2);
        assert_eq!(first.url_3, second.url_3);
        assert_eq!(first.is_active, second.is_active);
        assert_eq!(first.last_check_at, second.last_check_at);
    }

    #[tokio::test]
    async fn write_without_email_is_invalid() {
        let subscription_repo = MockSubscriptionRepository::new();
        let monitoring_job_repo = MockMonitoringJobRepository::new();

        let usecase = usecase_with(subscription_repo, monitoring_job_repo);
        let err = usecase
            .update_targets(model("", [None, None, None]))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn read_of_unconfigured_subscriber_returns_none_not_error() {
        let subscription_repo = MockSubscriptionRepository::new();
        let mut monitoring_job_repo = MockMonitoringJobRepository::new();
        monitoring_job_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = usecase_with(subscription_repo, monitoring_job_repo);
        let result = usecase.get_targets("new@b.com".to_string()).await.unwrap();
        assert!(result.is_none());
    }
}
