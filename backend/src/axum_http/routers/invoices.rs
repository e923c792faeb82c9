use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use crates::payments::nowpayments_client::NowPaymentsClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::axum_http::error_responses::{ErrorBody, error_response};
use crate::config::config_model::DotEnvyConfig;
use crate::usecases::invoices::{InvoiceUseCase, PaymentGateway};

pub fn routes(config: Arc<DotEnvyConfig>) -> Router {
    let nowpayments_client = NowPaymentsClient::new(
        config.nowpayments.api_key.clone(),
        config.nowpayments.price_amount,
        config.nowpayments.ipn_callback_url.clone(),
        config.nowpayments.success_url.clone(),
        config.nowpayments.cancel_url.clone(),
    );
    let invoice_usecase = InvoiceUseCase::new(Arc::new(nowpayments_client));

    Router::new()
        .route("/invoice", post(create_invoice))
        .with_state(Arc::new(invoice_usecase))
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    #[serde(default)]
    pub user_email: String,
}

#[derive(Debug, Serialize)]
struct CreateInvoiceResponse {
    success: bool,
    invoice_url: String,
}

pub async fn create_invoice<G>(
    State(invoice_usecase): State<Arc<InvoiceUseCase<G>>>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Response
where
    G: PaymentGateway + 'static,
{
    match invoice_usecase.create_invoice(payload.user_email).await {
        Ok(invoice_url) => (
            StatusCode::OK,
            Json(CreateInvoiceResponse {
                success: true,
                invoice_url,
            }),
        )
            .into_response(),
        Err(err) => {
            let status = err.status_code();
            warn!(status = status.as_u16(), error = %err, "invoices: creation failed");
            error_response(status, ErrorBody::new(err.to_string()))
        }
    }
}
