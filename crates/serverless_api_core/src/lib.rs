//! Request/response contracts and method dispatch for the serverless API.
//!
//! This crate owns the behaviour of the API handler: decoding proxy events,
//! routing by HTTP method, and building responses. It excludes the Lambda
//! runtime and environment configuration, which live in
//! `serverless_api_lambda`.

pub mod contract;
pub mod dispatcher;
pub mod error;
pub mod logging;

pub use contract::{build_response, ApiRequest, ApiResponse, HttpMethod};
pub use dispatcher::{DispatcherConfig, RequestDispatcher};
pub use error::DispatchError;
pub use logging::{DispatchLogger, LogEntry, LogLevel};
