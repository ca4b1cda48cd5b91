use std::any::Any;

use serde_json::json;
use thiserror::Error;

use crate::contract::{
    build_response, ApiResponse, HttpMethod, INTERNAL_SERVER_ERROR, INVALID_JSON_BODY_ERROR,
    UNSUPPORTED_METHOD_ERROR,
};

/// Failures raised while turning an inbound event into a response.
///
/// Client-caused variants map to 400 and are answered without an error log.
/// The rest are unexpected: they map to a generic 500 and their detail only
/// ever reaches the log.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unsupported HTTP method '{0}'")]
    UnsupportedMethod(HttpMethod),
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error("request event could not be decoded: {0}")]
    MalformedEvent(#[source] serde_json::Error),
    #[error("request body must be a string, got {0}")]
    NonStringBody(&'static str),
    #[error("request handling panicked: {0}")]
    Panicked(String),
}

impl DispatchError {
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked(message)
    }

    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            Self::MalformedEvent(_) | Self::NonStringBody(_) | Self::Panicked(_)
        )
    }

    pub fn status_code(&self) -> u16 {
        if self.is_unexpected() {
            500
        } else {
            400
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            Self::UnsupportedMethod(_) => UNSUPPORTED_METHOD_ERROR,
            Self::MalformedBody(_) => INVALID_JSON_BODY_ERROR,
            Self::MalformedEvent(_) | Self::NonStringBody(_) | Self::Panicked(_) => {
                INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_response(self) -> ApiResponse {
        build_response(self.status_code(), json!({ "error": self.public_message() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not-json").expect_err("invalid json")
    }

    #[test]
    fn client_errors_map_to_400() {
        let unsupported = DispatchError::UnsupportedMethod(HttpMethod::Delete);
        assert_eq!(unsupported.status_code(), 400);
        assert!(!unsupported.is_unexpected());
        assert_eq!(unsupported.to_string(), "unsupported HTTP method 'DELETE'");

        let malformed = DispatchError::MalformedBody(json_error());
        assert_eq!(malformed.status_code(), 400);
        assert_eq!(malformed.public_message(), INVALID_JSON_BODY_ERROR);
    }

    #[test]
    fn unexpected_errors_hide_detail_from_response() {
        let error = DispatchError::Panicked("secret state".to_string());
        assert!(error.is_unexpected());

        let response = error.into_response();
        assert_eq!(response.status_code(), 500);
        assert_eq!(DispatchError::NonStringBody("object").status_code(), 500);
        assert!(!response.body().contains("secret state"));
        assert_eq!(response.body(), r#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn panic_payloads_keep_their_message() {
        let static_payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(
            DispatchError::from_panic(static_payload).to_string(),
            "request handling panicked: boom"
        );

        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(
            DispatchError::from_panic(owned_payload).to_string(),
            "request handling panicked: owned boom"
        );

        let opaque_payload: Box<dyn Any + Send> = Box::new(7_u32);
        assert!(matches!(
            DispatchError::from_panic(opaque_payload),
            DispatchError::Panicked(message) if message == "non-string panic payload"
        ));
    }
}
