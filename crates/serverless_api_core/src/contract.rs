use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::DispatchError;

pub const GET_SUCCESS_MESSAGE: &str = "GET request successful";
pub const POST_SUCCESS_MESSAGE: &str = "POST request successful";
pub const UNSUPPORTED_METHOD_ERROR: &str = "Unsupported HTTP method";
pub const INVALID_JSON_BODY_ERROR: &str = "Invalid JSON body";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Raw text substituted for a POST request that carries no body.
pub const EMPTY_BODY: &str = "{}";
pub const JSON_CONTENT_TYPE: &str = "application/json";

pub type QueryParameters = Map<String, Value>;
pub type Headers = BTreeMap<String, String>;

/// HTTP method of an inbound request. Matching is exact, so `"get"` lands in
/// [`HttpMethod::Other`] just like any other verb the API does not route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for HttpMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "PATCH" => Self::Patch,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for HttpMethod {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound API Gateway proxy request. Only `httpMethod` is strictly typed:
/// query values are echoed as received, and `body` and `headers` stay opaque
/// until a handler reads them. JSON `null` decodes to `None` for every
/// optional field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiRequest {
    #[serde(rename = "httpMethod")]
    pub http_method: HttpMethod,
    #[serde(rename = "queryStringParameters", default)]
    pub query_string_parameters: Option<QueryParameters>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub headers: Option<Value>,
}

impl ApiRequest {
    pub fn from_event(event: &Value) -> Result<Self, DispatchError> {
        Self::deserialize(event).map_err(DispatchError::MalformedEvent)
    }
}

/// Outbound API Gateway proxy response. Built only through [`build_response`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    #[serde(rename = "statusCode")]
    status_code: u16,
    headers: Headers,
    body: String,
}

impl ApiResponse {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

pub fn build_response(status_code: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status_code,
        headers: Headers::from([("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())]),
        body: body.to_string(),
    }
}

/// Hex SHA-256 of the event rendered with object keys sorted at every depth.
pub fn request_fingerprint(event: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_json(event).to_string());
    format!("{:x}", hasher.finalize())
}

fn canonical_json(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut keys: Vec<&String> = object.keys().collect();
            keys.sort_unstable();
            let mut sorted = Map::with_capacity(object.len());
            for key in keys {
                sorted.insert(key.clone(), canonical_json(&object[key.as_str()]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical_json).collect()),
        other => other.clone(),
    }
}
