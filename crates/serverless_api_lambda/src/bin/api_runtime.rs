use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use serverless_api_lambda::config::RuntimeConfig;
use serverless_api_lambda::handlers::api::{build_dispatcher, handle_api_event};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = RuntimeConfig::from_env()?;
    let dispatcher = Arc::new(build_dispatcher(&config));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let dispatcher = Arc::clone(&dispatcher);
        async move { handle_api_event(event, &*dispatcher).await }
    }))
    .await
}
