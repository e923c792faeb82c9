use anyhow::Result;
use crates::{
    infra::db::{
        postgres::postgres_connection, repositories::monitoring_jobs::MonitoringJobPostgres,
    },
    intelligence::{ollama_client::OllamaClient, page_fetcher::PageTextClient},
};
use std::{sync::Arc, time::Duration};
use tracing::{error, info};
use worker::{config::config_loader, services::worker_loop, usecases::monitoring_cycle::MonitoringCycleUseCase};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Worker exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    crates::observability::init_observability("worker")?;

    let config = config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&config.database.url)?;
    info!("Postgres connection has been established");

    let monitoring_job_repository = MonitoringJobPostgres::new(Arc::new(postgres_pool));
    let page_fetcher = PageTextClient::new(
        config.scrape.user_agent.clone(),
        config.scrape.fetch_timeout,
    )?;
    let analysis_engine = OllamaClient::new(
        config.ollama.generate_url.clone(),
        config.ollama.model.clone(),
    );

    let monitoring_cycle_usecase = MonitoringCycleUseCase::new(
        Arc::new(monitoring_job_repository),
        Arc::new(page_fetcher),
        Arc::new(analysis_engine),
        Duration::from_secs(config.job_delay_secs),
    );

    info!("Orchestrator started. Monitoring active jobs...");
    worker_loop::run_worker_loop(
        Arc::new(monitoring_cycle_usecase),
        Duration::from_secs(config.poll_interval_secs),
    )
    .await
}
