use docshare_core::contract::ApiGatewayResponse;
use docshare_core::credentials::StaticCredentialStore;
use docshare_lambda::handlers::login::handle_login_event;
use docshare_lambda::telemetry::init_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    credentials: &StaticCredentialStore,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_login_event(&event.payload, credentials))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let credentials = StaticCredentialStore::builtin();
    tracing::info!(
        component = "login_lambda",
        event = "cold_start",
        credential_count = credentials.len(),
        "login function ready"
    );
    let credentials = &credentials;
    lambda_runtime::run(service_fn(move |event| handle_request(event, credentials))).await
}
