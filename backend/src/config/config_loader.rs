use anyhow::{Ok, Result};

use super::config_model::DotEnvyConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = super::config_model::BackendServer {
        port: std::env::var("SERVER_PORT_BACKEND")
            .expect("SERVER_PORT_BACKEND is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = super::config_model::Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let nowpayments = super::config_model::NowPayments {
        api_key: std::env::var("NOWPAYMENTS_API_KEY").expect("NOWPAYMENTS_API_KEY is invalid"),
        price_amount: std::env::var("NOWPAYMENTS_PRICE_AMOUNT")
            .unwrap_or_else(|_| "50".to_string())
            .parse()?,
        ipn_callback_url: std::env::var("NOWPAYMENTS_IPN_CALLBACK_URL")
            .expect("NOWPAYMENTS_IPN_CALLBACK_URL is invalid"),
        success_url: std::env::var("PAYMENT_SUCCESS_URL").expect("PAYMENT_SUCCESS_URL is invalid"),
        cancel_url: std::env::var("PAYMENT_CANCEL_URL").expect("PAYMENT_CANCEL_URL is invalid"),
    };

    let ollama = super::config_model::Ollama {
        generate_url: std::env::var("OLLAMA_URL")
            .unwrap_or_else(|_| "http://localhost:11434/api/generate".to_string()),
        model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2:3b".to_string()),
    };

    let demo = super::config_model::Demo {
        user_agent: std::env::var("DEMO_USER_AGENT")
            .unwrap_or_else(|_| "Mozilla/5.0 (AgenticSpy-Demo/1.0)".to_string()),
        fetch_timeout: std::env::var("DEMO_FETCH_TIMEOUT")
            .unwrap_or_else(|_| "15".to_string())
            .parse()?,
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        nowpayments,
        ollama,
        demo,
    })
}
