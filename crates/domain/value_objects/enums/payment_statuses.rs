use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// NOWPayments IPN statuses. Anything the provider may invent later maps to
/// `Unknown` so the webhook can still acknowledge it without writing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Waiting,
    Confirming,
    Confirmed,
    Sending,
    PartiallyPaid,
    Finished,
    Failed,
    Refunded,
    Expired,
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Waiting => "waiting",
            PaymentStatus::Confirming => "confirming",
            PaymentStatus::Confirmed => "confirmed",
            PaymentStatus::Sending => "sending",
            PaymentStatus::PartiallyPaid => "partially_paid",
            PaymentStatus::Finished => "finished",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Expired => "expired",
            PaymentStatus::Unknown => "unknown",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "waiting" => PaymentStatus::Waiting,
            "confirming" => PaymentStatus::Confirming,
            "confirmed" => PaymentStatus::Confirmed,
            "sending" => PaymentStatus::Sending,
            "partially_paid" => PaymentStatus::PartiallyPaid,
            "finished" => PaymentStatus::Finished,
            "failed" => PaymentStatus::Failed,
            "refunded" => PaymentStatus::Refunded,
            "expired" => PaymentStatus::Expired,
            _ => PaymentStatus::Unknown,
        }
    }

    /// Statuses that count as money received and activate the subscription.
    pub fn is_paid(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Finished | PaymentStatus::PartiallyPaid | PaymentStatus::Confirmed
        )
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_statuses_match_provider_success_set() {
        for status in ["finished", "partially_paid", "confirmed"] {
            assert!(PaymentStatus::from_str(status).is_paid(), "{status}");
        }
        for status in ["waiting", "expired", "failed", "refunded", "something_new"] {
            assert!(!PaymentStatus::from_str(status).is_paid(), "{status}");
        }
    }
}
