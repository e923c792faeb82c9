#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database: Database,
    pub ollama: Ollama,
    pub scrape: Scrape,
    /// Seconds between monitoring cycles.
    pub poll_interval_secs: u64,
    /// Politeness delay between jobs within one cycle.
    pub job_delay_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Ollama {
    pub generate_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct Scrape {
    pub user_agent: String,
    pub fetch_timeout: u64,
}
