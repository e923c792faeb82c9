use anyhow::Result;
use crates::{
    domain::repositories::monitoring_jobs::MonitoringJobRepository,
    intelligence::{AnalysisEngine, PageFetcher},
};
use std::{sync::Arc, time::Duration};
use tracing::{error, info};

use crate::usecases::monitoring_cycle::MonitoringCycleUseCase;

/// Drives monitoring cycles forever. Cycle failures are logged and the loop
/// keeps going; there is no in-process retry beyond the next scheduled pass.
pub async fn run_worker_loop<M, F, G>(
    usecase: Arc<MonitoringCycleUseCase<M, F, G>>,
    poll_interval: Duration,
) -> Result<()>
where
    M: MonitoringJobRepository + Send + Sync + 'static,
    F: PageFetcher + 'static,
    G: AnalysisEngine + 'static,
{
    loop {
        match usecase.run_cycle().await {
            Ok(processed) => info!(processed, "worker_loop: cycle complete"),
            Err(err) => error!(error = ?err, "worker_loop: cycle failed"),
        }

        tokio::time::sleep(poll_interval).await;
    }
}
