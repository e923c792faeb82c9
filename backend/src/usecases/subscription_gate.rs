use anyhow::Result;
use crates::domain::{
    repositories::subscriptions::SubscriptionRepository,
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};
use std::sync::Arc;
use tracing::debug;

/// The one piece of domain policy: paid features are reachable only with an
/// active subscription. Absent row and non-active status are equivalent.
pub struct SubscriptionGate<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
}

impl<S> SubscriptionGate<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>) -> Self {
        Self { subscription_repo }
    }

    pub async fn is_active(&self, user_email: &str) -> Result<bool> {
        let subscription = self
            .subscription_repo
            .find_by_email(user_email.to_string())
            .await?;

        let active = subscription
            .map(|sub| SubscriptionStatus::from_str(&sub.status) == SubscriptionStatus::Active)
            .unwrap_or(false);

        debug!(%user_email, active, "subscription_gate: checked");
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crates::domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::subscriptions::MockSubscriptionRepository,
    };
    use mockall::predicate::eq;

    fn sample_subscription(user_email: &str, status: &str) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            user_email: user_email.to_string(),
            status: status.to_string(),
            plan: "premium_50".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn active_subscription_passes() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let subscription = sample_subscription("a@b.com", "active");

        subscription_repo
            .expect_find_by_email()
            .with(eq("a@b.com".to_string()))
            .returning(move |_| {
                let subscription = subscription.clone();
                Box::pin(async move { Ok(Some(subscription)) })
            });

        let gate = SubscriptionGate::new(Arc::new(subscription_repo));
        assert!(gate.is_active("a@b.com").await.unwrap());
    }

    #[tokio::test]
    async fn missing_row_is_not_active() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(None) }));

        let gate = SubscriptionGate::new(Arc::new(subscription_repo));
        assert!(!gate.is_active("nobody@b.com").await.unwrap());
    }

    #[tokio::test]
    async fn non_active_status_is_not_active() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let subscription = sample_subscription("a@b.com", "inactive");

        subscription_repo.expect_find_by_email().returning(move |_| {
            let subscription = subscription.clone();
            Box::pin(async move { Ok(Some(subscription)) })
        });

        let gate = SubscriptionGate::new(Arc::new(subscription_repo));
        assert!(!gate.is_active("a@b.com").await.unwrap());
    }
}
