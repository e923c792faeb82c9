pub mod monitoring_jobs;
pub mod subscriptions;
