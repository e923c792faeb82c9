use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::monitoring_jobs::MonitoringJobEntity;

/// POST body for target configuration. Each slot is independently optional;
/// an absent or empty slot clears the stored URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTargetsModel {
    #[serde(default)]
    pub user_email: String,
    pub url_1: Option<String>,
    pub url_2: Option<String>,
    pub url_3: Option<String>,
}

impl UpdateTargetsModel {
    /// Normalizes `Some("")` to `None` so empty form fields clear the slot.
    pub fn normalized_slots(&self) -> (Option<String>, Option<String>, Option<String>) {
        fn clean(slot: &Option<String>) -> Option<String> {
            slot.as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        }
        (clean(&self.url_1), clean(&self.url_2), clean(&self.url_3))
    }
}

/// Target configuration as the dashboard reads it. `last_check_at` and the
/// URL slots come straight from the row; a missing row is returned as `null`
/// data, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfigDto {
    pub user_email: String,
    pub url_1: Option<String>,
    pub url_2: Option<String>,
    pub url_3: Option<String>,
    pub is_active: bool,
    pub last_check_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<MonitoringJobEntity> for TargetConfigDto {
    fn from(entity: MonitoringJobEntity) -> Self {
        Self {
            user_email: entity.user_email,
            url_1: entity.url_1,
            url_2: entity.url_2,
            url_3: entity.url_3,
            is_active: entity.is_active,
            last_check_at: entity.last_check_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Latest externally-produced report plus the ordered non-null URLs.
/// All-null fields mean "not configured yet or no report produced yet".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDto {
    pub latest_report: Option<String>,
    pub last_check_at: Option<DateTime<Utc>>,
    pub monitored_urls: Vec<String>,
}

impl ReportDto {
    pub fn empty() -> Self {
        Self {
            latest_report: None,
            last_check_at: None,
            monitored_urls: Vec::new(),
        }
    }
}

impl From<MonitoringJobEntity> for ReportDto {
    fn from(entity: MonitoringJobEntity) -> Self {
        let monitored_urls = entity.monitored_urls();
        Self {
            latest_report: entity.latest_report,
            last_check_at: entity.last_check_at,
            monitored_urls,
        }
    }
}
