pub mod activation;
pub mod demo_analysis;
pub mod invoices;
pub mod reports;
pub mod subscription_gate;
pub mod targets;
