pub mod demo_analysis;
pub mod invoices;
pub mod payment_webhook;
pub mod reports;
pub mod targets;
