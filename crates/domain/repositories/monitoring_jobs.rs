use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;

use crate::domain::entities::monitoring_jobs::{MonitoringJobEntity, UpsertMonitoringJobEntity};

#[async_trait]
#[automock]
pub trait MonitoringJobRepository {
    /// Creates the row at activation time so the dashboard has something to
    /// query; keeps any URL slots a returning subscriber already configured.
    async fn ensure_job(&self, user_email: String, updated_at: DateTime<Utc>) -> Result<()>;
    async fn upsert_targets(
        &self,
        upsert_monitoring_job_entity: UpsertMonitoringJobEntity,
    ) -> Result<MonitoringJobEntity>;
    async fn find_by_email(&self, user_email: String) -> Result<Option<MonitoringJobEntity>>;
    /// Active jobs whose subscription is also active, for the worker cycle.
    async fn list_runnable_jobs(&self) -> Result<Vec<MonitoringJobEntity>>;
    async fn record_report(
        &self,
        user_email: String,
        latest_report: String,
        content_hash: String,
        checked_at: DateTime<Utc>,
    ) -> Result<()>;
    async fn touch_last_check(&self, user_email: String, checked_at: DateTime<Utc>)
    -> Result<()>;
}
