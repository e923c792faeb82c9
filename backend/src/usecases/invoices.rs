use anyhow::Result as AnyResult;
use async_trait::async_trait;
use crates::payments::nowpayments_client::NowPaymentsClient;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait PaymentGateway: Send + Sync {
    async fn create_invoice(&self, user_email: &str) -> AnyResult<String>;
}

#[async_trait]
impl PaymentGateway for NowPaymentsClient {
    async fn create_invoice(&self, user_email: &str) -> AnyResult<String> {
        self.create_invoice(user_email).await
    }
}

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("user_email is required")]
    MissingEmail,
    #[error("Failed to create invoice")]
    Provider(#[source] anyhow::Error),
}

impl InvoiceError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            InvoiceError::MissingEmail => StatusCode::BAD_REQUEST,
            InvoiceError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, InvoiceError>;

/// Creates the hosted payment page for a would-be subscriber. The email
/// becomes the invoice order id, closing the loop with the IPN webhook.
pub struct InvoiceUseCase<G>
where
    G: PaymentGateway + 'static,
{
    payment_gateway: Arc<G>,
}

impl<G> InvoiceUseCase<G>
where
    G: PaymentGateway + 'static,
{
    pub fn new(payment_gateway: Arc<G>) -> Self {
        Self { payment_gateway }
    }

    pub async fn create_invoice(&self, user_email: String) -> UseCaseResult<String> {
        let user_email = user_email.trim().to_string();
        if user_email.is_empty() {
            return Err(InvoiceError::MissingEmail);
        }

        info!(%user_email, "invoices: creating payment invoice");
        let invoice_url = self
            .payment_gateway
            .create_invoice(&user_email)
            .await
            .map_err(|err| {
                error!(%user_email, provider_error = ?err, "invoices: provider call failed");
                InvoiceError::Provider(err)
            })?;

        Ok(invoice_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn missing_email_skips_the_provider_call() {
        // No expectation: a provider call would panic.
        let payment_gateway = MockPaymentGateway::new();
        let usecase = InvoiceUseCase::new(Arc::new(payment_gateway));

        let err = usecase.create_invoice("  ".to_string()).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn returns_the_hosted_invoice_url() {
        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_create_invoice()
            .with(eq("a@b.com"))
            .returning(|_| {
                Box::pin(async { Ok("https://nowpayments.io/payment/inv123".to_string()) })
            });

        let usecase = InvoiceUseCase::new(Arc::new(payment_gateway));
        let url = usecase.create_invoice("a@b.com".to_string()).await.unwrap();
        assert_eq!(url, "https://nowpayments.io/payment/inv123");
    }

    #[tokio::test]
    async fn provider_failure_maps_to_bad_gateway() {
        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_create_invoice()
            .returning(|_| Box::pin(async { Err(anyhow!("status 401")) }));

        let usecase = InvoiceUseCase::new(Arc::new(payment_gateway));
        let err = usecase
            .create_invoice("a@b.com".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
    }
}
