pub mod monitoring_cycle;
