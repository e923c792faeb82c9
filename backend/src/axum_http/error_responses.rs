use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The one JSON error shape every handler maps to. `details` carries extra
/// client-facing context; `is_unsubscribed` lets the dashboard route 403s to
/// the payment flow instead of a generic error page.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unsubscribed: Option<bool>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            is_unsubscribed: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_unsubscribed_flag(mut self) -> Self {
        self.is_unsubscribed = Some(true);
        self
    }
}

pub fn error_response(status: StatusCode, body: ErrorBody) -> Response {
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted_when_unset() {
        let body = serde_json::to_value(ErrorBody::new("boom")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "boom"}));
    }

    #[test]
    fn unsubscribed_flag_is_serialized_when_set() {
        let body = serde_json::to_value(
            ErrorBody::new("Active subscription required").with_unsubscribed_flag(),
        )
        .unwrap();
        assert_eq!(body["is_unsubscribed"], serde_json::json!(true));
    }
}
