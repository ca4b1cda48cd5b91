use std::panic::{self, AssertUnwindSafe};

use serde_json::{json, Value};

use crate::contract::{
    build_response, request_fingerprint, ApiRequest, ApiResponse, HttpMethod, EMPTY_BODY,
    GET_SUCCESS_MESSAGE, POST_SUCCESS_MESSAGE,
};
use crate::error::DispatchError;
use crate::logging::{DispatchLogger, LogEntry};

pub const REQUEST_RECEIVED_EVENT: &str = "request_received";
pub const REQUEST_FAILED_EVENT: &str = "request_failed";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Table identifier handed down by the deployment. Recorded in log
    /// entries only.
    pub table_name: Option<String>,
}

/// Routing step run inside the dispatch boundary.
pub type Router = fn(&Value) -> Result<ApiResponse, DispatchError>;

/// Maps one inbound event to exactly one response. Holds no per-request
/// state, so a single instance serves every invocation of a process.
pub struct RequestDispatcher<L> {
    config: DispatcherConfig,
    logger: L,
    router: Router,
}

impl<L: DispatchLogger> RequestDispatcher<L> {
    pub fn new(config: DispatcherConfig, logger: L) -> Self {
        Self::with_router(config, logger, route)
    }

    pub fn with_router(config: DispatcherConfig, logger: L, router: Router) -> Self {
        Self {
            config,
            logger,
            router,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    pub fn dispatch(&self, event: &Value) -> ApiResponse {
        let fingerprint = request_fingerprint(event);
        self.logger.log(LogEntry::info(
            REQUEST_RECEIVED_EVENT,
            json!({
                "request": event,
                "request_fingerprint": fingerprint,
                "table_name": self.config.table_name,
            }),
        ));

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.router)(event)))
            .unwrap_or_else(|payload| Err(DispatchError::from_panic(payload)));

        match outcome {
            Ok(response) => response,
            Err(error) => {
                if error.is_unexpected() {
                    self.logger.log(LogEntry::error(
                        REQUEST_FAILED_EVENT,
                        json!({
                            "error": error.to_string(),
                            "request_fingerprint": fingerprint,
                        }),
                    ));
                }
                error.into_response()
            }
        }
    }
}

pub fn route(event: &Value) -> Result<ApiResponse, DispatchError> {
    let request = ApiRequest::from_event(event)?;
    match &request.http_method {
        HttpMethod::Get => Ok(handle_get(&request)),
        HttpMethod::Post => handle_post(&request),
        other => Err(DispatchError::UnsupportedMethod(other.clone())),
    }
}

pub fn handle_get(request: &ApiRequest) -> ApiResponse {
    let parameters = request.query_string_parameters.clone().unwrap_or_default();
    build_response(
        200,
        json!({
            "message": GET_SUCCESS_MESSAGE,
            "parameters": parameters,
        }),
    )
}

pub fn handle_post(request: &ApiRequest) -> Result<ApiResponse, DispatchError> {
    let raw_body = match &request.body {
        None | Some(Value::Null) => EMPTY_BODY,
        Some(Value::String(text)) => text.as_str(),
        Some(other) => return Err(DispatchError::NonStringBody(json_kind(other))),
    };
    let body: Value = serde_json::from_str(raw_body).map_err(DispatchError::MalformedBody)?;
    Ok(build_response(
        200,
        json!({
            "message": POST_SUCCESS_MESSAGE,
            "body": body,
        }),
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
