use serde::{Deserialize, Serialize};

/// NOWPayments IPN payload. `order_id` carries the subscriber email because
/// the invoice is created with the email as order id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentNotification {
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub order_id: String,
    pub price_amount: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub success: bool,
    pub message: String,
}
