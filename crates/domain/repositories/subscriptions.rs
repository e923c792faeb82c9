use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::subscriptions::{SubscriptionEntity, UpsertSubscriptionEntity};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn upsert(&self, upsert_subscription_entity: UpsertSubscriptionEntity) -> Result<()>;
    async fn find_by_email(&self, user_email: String) -> Result<Option<SubscriptionEntity>>;
}
