use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::monitoring_jobs;

/// One row per subscriber. `latest_report`, `last_content_hash` and
/// `last_check_at` are written by the worker only; the HTTP handlers
/// treat them as read-only.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = monitoring_jobs)]
#[diesel(primary_key(user_email))]
pub struct MonitoringJobEntity {
    pub user_email: String,
    pub url_1: Option<String>,
    pub url_2: Option<String>,
    pub url_3: Option<String>,
    pub is_active: bool,
    pub latest_report: Option<String>,
    pub last_content_hash: Option<String>,
    pub last_check_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl MonitoringJobEntity {
    /// Non-null URL slots in slot order.
    pub fn monitored_urls(&self) -> Vec<String> {
        [&self.url_1, &self.url_2, &self.url_3]
            .into_iter()
            .filter_map(|slot| slot.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = monitoring_jobs)]
pub struct UpsertMonitoringJobEntity {
    pub user_email: String,
    pub url_1: Option<String>,
    pub url_2: Option<String>,
    pub url_3: Option<String>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}
