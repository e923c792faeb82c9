use anyhow::{Ok, Result};

use super::config_model::WorkerConfig;

pub fn load() -> Result<WorkerConfig> {
    dotenvy::dotenv().ok();

    let database = super::config_model::Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let ollama = super::config_model::Ollama {
        generate_url: std::env::var("OLLAMA_URL")
            .unwrap_or_else(|_| "http://localhost:11434/api/generate".to_string()),
        model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2:3b".to_string()),
    };

    let scrape = super::config_model::Scrape {
        user_agent: std::env::var("WORKER_USER_AGENT")
            .unwrap_or_else(|_| "Mozilla/5.0 (AgenticSpy-Agent/1.0)".to_string()),
        fetch_timeout: std::env::var("WORKER_FETCH_TIMEOUT")
            .unwrap_or_else(|_| "15".to_string())
            .parse()?,
    };

    Ok(WorkerConfig {
        database,
        ollama,
        scrape,
        poll_interval_secs: std::env::var("WORKER_POLL_INTERVAL")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()?,
        job_delay_secs: std::env::var("WORKER_JOB_DELAY")
            .unwrap_or_else(|_| "5".to_string())
            .parse()?,
    })
}
