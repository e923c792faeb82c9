use anyhow::Result;
use chrono::Utc;
use crates::{
    domain::{
        entities::monitoring_jobs::MonitoringJobEntity,
        repositories::monitoring_jobs::MonitoringJobRepository,
    },
    intelligence::{AnalysisEngine, PageFetcher},
};
use sha2::{Digest, Sha256};
use std::{sync::Arc, time::Duration};
use tracing::{error, info, warn};

/// Per-page extraction cap during a monitoring pass.
pub const SCRAPE_TEXT_LIMIT: usize = 3000;
/// How much of the combined content reaches the model prompt.
pub const PROMPT_CONTENT_LIMIT: usize = 2000;

#[derive(Debug, PartialEq, Eq)]
pub enum JobOutcome {
    /// No URLs configured; nothing to do.
    Skipped,
    /// Every configured URL failed to yield text.
    ScrapeFailed,
    /// Content hash unchanged; only `last_check_at` was touched.
    NoChange,
    /// A new report was generated and stored.
    Reported,
}

/// One monitoring pass over all runnable jobs: scrape, hash-compare,
/// summarize, store. The per-job writes here (`latest_report`,
/// `last_content_hash`, `last_check_at`) are exclusively worker-owned.
pub struct MonitoringCycleUseCase<M, F, G>
where
    M: MonitoringJobRepository + Send + Sync + 'static,
    F: PageFetcher + 'static,
    G: AnalysisEngine + 'static,
{
    monitoring_job_repo: Arc<M>,
    page_fetcher: Arc<F>,
    analysis_engine: Arc<G>,
    job_delay: Duration,
}

impl<M, F, G> MonitoringCycleUseCase<M, F, G>
where
    M: MonitoringJobRepository + Send + Sync + 'static,
    F: PageFetcher + 'static,
    G: AnalysisEngine + 'static,
{
    pub fn new(
        monitoring_job_repo: Arc<M>,
        page_fetcher: Arc<F>,
        analysis_engine: Arc<G>,
        job_delay: Duration,
    ) -> Self {
        Self {
            monitoring_job_repo,
            page_fetcher,
            analysis_engine,
            job_delay,
        }
    }

    /// Runs one full cycle and returns the number of jobs processed.
    /// A failing job is logged and skipped; it never aborts the cycle.
    pub async fn run_cycle(&self) -> Result<usize> {
        let jobs = self.monitoring_job_repo.list_runnable_jobs().await?;
        if jobs.is_empty() {
            info!("monitoring_cycle: no active jobs found");
            return Ok(0);
        }

        info!(job_count = jobs.len(), "monitoring_cycle: processing jobs");
        let job_count = jobs.len();
        for job in jobs {
            let user_email = job.user_email.clone();
            match self.process_job(&job).await {
                Ok(outcome) => {
                    info!(%user_email, outcome = ?outcome, "monitoring_cycle: job finished")
                }
                Err(err) => {
                    error!(%user_email, error = ?err, "monitoring_cycle: job failed")
                }
            }

            if !self.job_delay.is_zero() {
                tokio::time::sleep(self.job_delay).await;
            }
        }

        Ok(job_count)
    }

    async fn process_job(&self, job: &MonitoringJobEntity) -> Result<JobOutcome> {
        let urls = job.monitored_urls();
        if urls.is_empty() {
            return Ok(JobOutcome::Skipped);
        }

        let mut scrapes: Vec<(String, String)> = Vec::new();
        for url in &urls {
            match self
                .page_fetcher
                .fetch_page_text(url, SCRAPE_TEXT_LIMIT)
                .await
            {
                Ok(text) if !text.is_empty() => scrapes.push((url.clone(), text)),
                Ok(_) => warn!(%url, "monitoring_cycle: target yielded no text"),
                Err(err) => {
                    warn!(%url, scrape_error = ?err, "monitoring_cycle: target fetch failed")
                }
            }
        }

        if scrapes.is_empty() {
            return Ok(JobOutcome::ScrapeFailed);
        }

        let combined = combine_scrapes(&scrapes);
        let hash = content_hash(&combined);
        let now = Utc::now();

        if job.last_content_hash.as_deref() == Some(hash.as_str()) {
            // Still bump last_check_at so the dashboard can tell the agent
            // is alive.
            self.monitoring_job_repo
                .touch_last_check(job.user_email.clone(), now)
                .await?;
            return Ok(JobOutcome::NoChange);
        }

        let prompt = build_monitoring_prompt(&combined);
        let report = self.analysis_engine.generate(&prompt).await?;

        self.monitoring_job_repo
            .record_report(job.user_email.clone(), report, hash, now)
            .await?;

        Ok(JobOutcome::Reported)
    }
}

pub fn combine_scrapes(scrapes: &[(String, String)]) -> String {
    scrapes
        .iter()
        .map(|(url, text)| format!("URL: {url}\n{text}"))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

pub fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

fn build_monitoring_prompt(combined_content: &str) -> String {
    let content: String = combined_content.chars().take(PROMPT_CONTENT_LIMIT).collect();
    format!(
        "You are an expert competitive intelligence analyst. Analyze these competitor websites:\n\
{content}\n\
Focus on pricing, new products, and marketing changes. Keep it concise."
    )
}
