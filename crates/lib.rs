pub mod domain;
pub mod infra;
pub mod intelligence;
pub mod observability;
pub mod payments;
