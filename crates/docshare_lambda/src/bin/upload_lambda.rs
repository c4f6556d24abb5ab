use docshare_core::contract::ApiGatewayResponse;
use docshare_lambda::adapters::object_store::S3ObjectStore;
use docshare_lambda::adapters::queue::SqsNotificationQueue;
use docshare_lambda::config::UploadConfig;
use docshare_lambda::handlers::upload::handle_upload_event;
use docshare_lambda::telemetry::init_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct UploadDependencies {
    store: S3ObjectStore,
    queue: SqsNotificationQueue,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &UploadDependencies,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_upload_event(&event.payload, &deps.store, &deps.queue))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = UploadConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = UploadDependencies {
        store: S3ObjectStore::new(config.bucket, aws_sdk_s3::Client::new(&aws_config)),
        queue: SqsNotificationQueue::new(config.queue_url, aws_sdk_sqs::Client::new(&aws_config)),
    };
    tracing::info!(
        component = "upload_lambda",
        event = "cold_start",
        bucket = deps.store.bucket(),
        queue_url = deps.queue.queue_url(),
        "upload function ready"
    );

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event| handle_request(event, deps))).await
}
