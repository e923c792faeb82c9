use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoAnalysisRequest {
    #[serde(default)]
    pub url: String,
}

/// Result of the single-shot fetch-and-summarize pipeline. `timestamp` is
/// server-generated at response time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoAnalysisDto {
    pub analysis: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}
