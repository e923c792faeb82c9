use crates::domain::{
    repositories::{
        monitoring_jobs::MonitoringJobRepository, subscriptions::SubscriptionRepository,
    },
    value_objects::monitoring::ReportDto,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::usecases::subscription_gate::SubscriptionGate;

#[derive(Debug, Error)]
pub enum ReportsError {
    #[error("user_email is required")]
    MissingEmail,
    // Distinguished from generic failures so the client can route the user
    // to the payment flow instead of an error page.
    #[error("Active subscription required")]
    SubscriptionRequired,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ReportsError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ReportsError::MissingEmail => StatusCode::BAD_REQUEST,
            ReportsError::SubscriptionRequired => StatusCode::FORBIDDEN,
            ReportsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ReportsError>;

/// Exposes the latest worker-produced report to the dashboard, gated the
/// same way as target configuration.
pub struct ReportsUseCase<S, M>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    M: MonitoringJobRepository + Send + Sync + 'static,
{
    subscription_gate: Arc<SubscriptionGate<S>>,
    monitoring_job_repo: Arc<M>,
}

impl<S, M> ReportsUseCase<S, M>
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

    pub async fn latest_report(&self, user_email: String) -> UseCaseResult<ReportDto> {
        let user_email = user_email.trim().to_string();
        if user_email.is_empty() {
            return Err(ReportsError::MissingEmail);
        }

        let active = self
            .subscription_gate
            .is_active(&user_email)
            .await
            .map_err(|err| {
                error!(%user_email, db_error = ?err, "reports: subscription lookup failed");
                ReportsError::Internal(err)
            })?;
        if !active {
            warn!(%user_email, "reports: read rejected, no active subscription");
            return Err(ReportsError::SubscriptionRequired);
        }

        let row = self
            .monitoring_job_repo
            .find_by_email(user_email.clone())
            .await
            .map_err(|err| {
                error!(%user_email, db_error = ?err, "reports: job lookup failed");
                ReportsError::Internal(err)
            })?;

        // No row yet means monitoring is not configured or no report has
        // been produced; the dashboard renders that, not an error.
        let dto = row.map(ReportDto::from).unwrap_or_else(ReportDto::empty);
        info!(
            %user_email,
            has_report = dto.latest_report.is_some(),
            monitored = dto.monitored_urls.len(),
            "reports: report loaded"
        );
        Ok(dto)
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

    fn active_subscription_repo(user_email: &str) -> MockSubscriptionRepository {
        let now = Utc::now();
        let subscription = SubscriptionEntity {
            user_email: user_email.to_string(),
            status: "active".to_string(),
            plan: "premium_50".to_string(),
            created_at: now,
            updated_at: now,
        };
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_find_by_email().returning(move |_| {
            let subscription = subscription.clone();
            Box::pin(async move { Ok(Some(subscription)) })
        });
        repo
    }

    fn usecase_with(
        subscription_repo: MockSubscriptionRepository,
        monitoring_job_repo: MockMonitoringJobRepository,
    ) -> ReportsUseCase<MockSubscriptionRepository, MockMonitoringJobRepository> {
        ReportsUseCase::new(
            Arc::new(SubscriptionGate::new(Arc::new(subscription_repo))),
            Arc::new(monitoring_job_repo),
        )
    }

    #[tokio::test]
    async fn active_subscriber_without_job_row_gets_empty_report() {
        let subscription_repo = active_subscription_repo("a@b.com");
        let mut monitoring_job_repo = MockMonitoringJobRepository::new();
        monitoring_job_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = usecase_with(subscription_repo, monitoring_job_repo);
        let dto = usecase.latest_report("a@b.com".to_string()).await.unwrap();

        assert!(dto.latest_report.is_none());
        assert!(dto.last_check_at.is_none());
        assert!(dto.monitored_urls.is_empty());
    }

    #[tokio::test]
    async fn monitored_urls_are_the_ordered_non_null_slots() {
        let subscription_repo = active_subscription_repo("a@b.com");
        let mut monitoring_job_repo = MockMonitoringJobRepository::new();
        let now = Utc::now();
        let row = MonitoringJobEntity {
            user_email: "a@b.com".to_string(),
            url_1: Some("https://one.com".to_string()),
            url_2: None,
            url_3: Some("https://three.com".to_string()),
            is_active: true,
            latest_report: Some("report body".to_string()),
            last_content_hash: Some("abc".to_string()),
            last_check_at: Some(now),
            updated_at: now,
        };
        monitoring_job_repo.expect_find_by_email().returning(move |_| {
            let row = row.clone();
            Box::pin(async move { Ok(Some(row)) })
        });

        let usecase = usecase_with(subscription_repo, monitoring_job_repo);
        let dto = usecase.latest_report("a@b.com".to_string()).await.unwrap();

        assert_eq!(dto.latest_report.as_deref(), Some("report body"));
        assert_eq!(
            dto.monitored_urls,
            vec!["https://one.com".to_string(), "https://three.com".to_string()]
        );
    }

    #[tokio::test]
    async fn unsubscribed_email_is_rejected_with_forbidden() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(None) }));
        let monitoring_job_repo = MockMonitoringJobRepository::new();

        let usecase = usecase_with(subscription_repo, monitoring_job_repo);
        let err = usecase
            .latest_report("a@b.com".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ReportsError::SubscriptionRequired));
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn missing_email_is_invalid() {
        let subscription_repo = MockSubscriptionRepository::new();
        let monitoring_job_repo = MockMonitoringJobRepository::new();

        let usecase = usecase_with(subscription_repo, monitoring_job_repo);
        let err = usecase.latest_report(" ".to_string()).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
