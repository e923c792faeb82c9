use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;

use crate::{
    domain::{
        entities::subscriptions::{SubscriptionEntity, UpsertSubscriptionEntity},
        repositories::subscriptions::SubscriptionRepository,
    },
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::subscriptions},
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn upsert(&self, upsert_subscription_entity: UpsertSubscriptionEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        insert_into(subscriptions::table)
            .values(&upsert_subscription_entity)
            .on_conflict(subscriptions::user_email)
            .do_update()
            .set((
                subscriptions::status.eq(&upsert_subscription_entity.status),
                subscriptions::plan.eq(&upsert_subscription_entity.plan),
                subscriptions::updated_at.eq(upsert_subscription_entity.updated_at),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn find_by_email(&self, user_email: String) -> Result<Option<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscriptions::table
            .filter(subscriptions::user_email.eq(user_email))
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
