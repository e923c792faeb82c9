pub mod demo_analysis;
pub mod enums;
pub mod monitoring;
pub mod payment_webhook;
pub mod plans;
