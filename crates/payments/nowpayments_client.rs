use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::error;

const INVOICE_URL: &str = "https://api.nowpayments.io/v1/invoice";
const ORDER_DESCRIPTION: &str = "Agentic Competitor Spy Subscription";

/// Minimal NOWPayments client built on reqwest. The subscriber email is used
/// as the invoice `order_id`, which is how the IPN webhook attributes a
/// payment back to a subscription.
pub struct NowPaymentsClient {
    http: reqwest::Client,
    api_key: String,
    price_amount: f64,
    ipn_callback_url: String,
    success_url: String,
    cancel_url: String,
}

#[derive(Debug, Serialize)]
struct InvoiceRequest<'a> {
    price_amount: f64,
    price_currency: &'a str,
    order_id: &'a str,
    order_description: &'a str,
    ipn_callback_url: &'a str,
    success_url: &'a str,
    cancel_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvoiceResponse {
    invoice_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
    code: Option<String>,
}

impl NowPaymentsClient {
    pub fn new(
        api_key: String,
        price_amount: f64,
        ipn_callback_url: String,
        success_url: String,
        cancel_url: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            price_amount,
            ipn_callback_url,
            success_url,
            cancel_url,
        }
    }

    /// Creates a USD invoice for the subscription and returns the hosted
    /// payment page URL.
    pub async fn create_invoice(&self, user_email: &str) -> Result<String> {
        // https://documenter.getpostman.com/view/7907941/S1a32n38 (create invoice)
        let resp = self
            .http
            .post(INVOICE_URL)
            .header("x-api-key", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&InvoiceRequest {
                price_amount: self.price_amount,
                price_currency: "usd",
                order_id: user_email,
                order_description: ORDER_DESCRIPTION,
                ipn_callback_url: &self.ipn_callback_url,
                success_url: &self.success_url,
                cancel_url: &self.cancel_url,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = match resp.text().await {
                Ok(text) if !text.is_empty() => text,
                Ok(_) => "<empty response body>".to_string(),
                Err(err) => format!("<failed to read response body: {err}>"),
            };

            let (provider_message, provider_code) =
                match serde_json::from_str::<ErrorEnvelope>(&body) {
                    Ok(envelope) => (envelope.message, envelope.code),
                    Err(_) => (None, None),
                };

            error!(
                status = status.as_u16(),
                provider_message = ?provider_message,
                provider_code = ?provider_code,
                response_body = %body,
                "nowpayments: invoice creation failed"
            );
            anyhow::bail!("NOWPayments invoice creation failed: status {}", status);
        }

        let parsed: InvoiceResponse = resp.json().await?;
        Ok(parsed.invoice_url)
    }
}
