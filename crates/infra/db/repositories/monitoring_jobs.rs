use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;

use crate::{
    domain::{
        entities::monitoring_jobs::{MonitoringJobEntity, UpsertMonitoringJobEntity},
        repositories::monitoring_jobs::MonitoringJobRepository,
        value_objects::enums::subscription_statuses::SubscriptionStatus,
    },
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{monitoring_jobs, subscriptions},
    },
};

pub struct MonitoringJobPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl MonitoringJobPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MonitoringJobRepository for MonitoringJobPostgres {
    async fn ensure_job(&self, user_email: String, updated_at: DateTime<Utc>) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Re-activates on conflict but leaves configured URL slots alone,
        // so a re-subscribing user keeps their targets.
        insert_into(monitoring_jobs::table)
            .values((
                monitoring_jobs::user_email.eq(user_email),
                monitoring_jobs::is_active.eq(true),
                monitoring_jobs::updated_at.eq(updated_at),
            ))
            .on_conflict(monitoring_jobs::user_email)
            .do_update()
            .set((
                monitoring_jobs::is_active.eq(true),
                monitoring_jobs::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn upsert_targets(
        &self,
        upsert_monitoring_job_entity: UpsertMonitoringJobEntity,
    ) -> Result<MonitoringJobEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(monitoring_jobs::table)
            .values(&upsert_monitoring_job_entity)
            .on_conflict(monitoring_jobs::user_email)
            .do_update()
            .set((
                monitoring_jobs::url_1.eq(&upsert_monitoring_job_entity.url_1),
                monitoring_jobs::url_2.eq(&upsert_monitoring_job_entity.url_2),
                monitoring_jobs::url_3.eq(&upsert_monitoring_job_entity.url_3),
                monitoring_jobs::is_active.eq(upsert_monitoring_job_entity.is_active),
                monitoring_jobs::updated_at.eq(upsert_monitoring_job_entity.updated_at),
            ))
            .returning(MonitoringJobEntity::as_returning())
            .get_result::<MonitoringJobEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_email(&self, user_email: String) -> Result<Option<MonitoringJobEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = monitoring_jobs::table
            .filter(monitoring_jobs::user_email.eq(user_email))
            .select(MonitoringJobEntity::as_select())
            .first::<MonitoringJobEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_runnable_jobs(&self) -> Result<Vec<MonitoringJobEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = monitoring_jobs::table
            .inner_join(
                subscriptions::table
                    .on(monitoring_jobs::user_email.eq(subscriptions::user_email)),
            )
            .filter(monitoring_jobs::is_active.eq(true))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .select(MonitoringJobEntity::as_select())
            .load::<MonitoringJobEntity>(&mut conn)?;

        Ok(results)
    }

    async fn record_report(
        &self,
        user_email: String,
        latest_report: String,
        content_hash: String,
        checked_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(monitoring_jobs::table)
            .filter(monitoring_jobs::user_email.eq(user_email))
            .set((
                monitoring_jobs::latest_report.eq(Some(latest_report)),
                monitoring_jobs::last_content_hash.eq(Some(content_hash)),
                monitoring_jobs::last_check_at.eq(Some(checked_at)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn touch_last_check(
        &self,
        user_email: String,
        checked_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(monitoring_jobs::table)
            .filter(monitoring_jobs::user_email.eq(user_email))
            .set(monitoring_jobs::last_check_at.eq(Some(checked_at)))
            .execute(&mut conn)?;

        Ok(())
    }
}
