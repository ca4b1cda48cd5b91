use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use serverless_api_core::{ApiResponse, DispatchLogger, RequestDispatcher};

use crate::adapters::logger::StderrJsonLogger;
use crate::config::RuntimeConfig;

pub fn build_dispatcher(config: &RuntimeConfig) -> RequestDispatcher<StderrJsonLogger> {
    RequestDispatcher::new(
        config.dispatcher_config(),
        StderrJsonLogger::new(config.log_level),
    )
}

/// Lambda entry point for API Gateway proxy events. Failures are already
/// folded into the response, so the invocation itself always succeeds.
pub async fn handle_api_event<L: DispatchLogger>(
    event: LambdaEvent<Value>,
    dispatcher: &RequestDispatcher<L>,
) -> Result<ApiResponse, Error> {
    Ok(dispatcher.dispatch(&event.payload))
}
