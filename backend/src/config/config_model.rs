#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub nowpayments: NowPayments,
    pub ollama: Ollama,
    pub demo: Demo,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct NowPayments {
    pub api_key: String,
    pub price_amount: f64,
    pub ipn_callback_url: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone)]
pub struct Ollama {
    pub generate_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct Demo {
    pub user_agent: String,
    pub fetch_timeout: u64,
}
