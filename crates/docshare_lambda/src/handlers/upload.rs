use docshare_core::contract::{
    cors_headers, decode_upload_body, error_response, json_response, payload_digest,
    ApiGatewayResponse, NotificationMessage, UploadSuccessBody, UPLOAD_SUCCESS_MESSAGE,
};
use docshare_core::error::{HandlerError, UpstreamStage};
use docshare_core::storage_keys::{SIGNED_URL_TTL, UPLOAD_OBJECT_KEY};
use serde_json::Value;

use crate::adapters::object_store::ObjectStore;
use crate::adapters::queue::{NotificationQueue, PublishReceipt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub public_url: String,
    pub receipt: PublishReceipt,
}

/// Runs one upload and maps the outcome to an HTTP-shaped response.
///
/// Every branch, including failures, carries the cross-origin headers.
pub fn handle_upload_event(
    event: &Value,
    store: &impl ObjectStore,
    queue: &impl NotificationQueue,
) -> ApiGatewayResponse {
    match upload(event, store, queue) {
        Ok(outcome) => json_response(
            200,
            cors_headers(),
            UploadSuccessBody {
                success: UPLOAD_SUCCESS_MESSAGE.to_string(),
                public_url: outcome.public_url,
            },
        ),
        Err(error) => {
            log_upload_error(&error);
            error_response(&error, cors_headers())
        }
    }
}

/// Stores the payload, signs a read URL for it and publishes that URL.
///
/// Steps run in order and stop at the first failure. An object that was
/// already written stays in place when a later step fails.
pub fn upload(
    event: &Value,
    store: &impl ObjectStore,
    queue: &impl NotificationQueue,
) -> Result<UploadOutcome, HandlerError> {
    let payload = decode_upload_body(event)?;

    store
        .put_object(UPLOAD_OBJECT_KEY, &payload)
        .map_err(|message| HandlerError::upstream(UpstreamStage::StoreObject, message))?;
    tracing::info!(
        component = "upload_handler",
        event = "object_stored",
        key = UPLOAD_OBJECT_KEY,
        bytes = payload.len(),
        sha256 = %payload_digest(&payload),
        "stored uploaded object"
    );

    let public_url = store
        .presign_get(UPLOAD_OBJECT_KEY, SIGNED_URL_TTL)
        .map_err(|message| HandlerError::upstream(UpstreamStage::SignUrl, message))?;

    let notification = NotificationMessage::new(public_url.clone())
        .to_json()
        .map_err(|error| {
            HandlerError::upstream(
                UpstreamStage::PublishNotification,
                format!("failed to serialize notification message: {error}"),
            )
        })?;
    let receipt = queue
        .publish(&notification)
        .map_err(|message| HandlerError::upstream(UpstreamStage::PublishNotification, message))?;
    tracing::info!(
        component = "upload_handler",
        event = "notification_published",
        message_id = receipt.message_id.as_deref().unwrap_or("unknown"),
        "message sent to queue"
    );

    Ok(UploadOutcome {
        public_url,
        receipt,
    })
}

fn log_upload_error(error: &HandlerError) {
    match error {
        HandlerError::Upstream { stage, message } => tracing::error!(
            component = "upload_handler",
            event = "upload_failed",
            stage = %stage,
            error = %message,
            "upload aborted"
        ),
        other => tracing::warn!(
            component = "upload_handler",
            event = "upload_rejected",
            error = %other,
            "upload rejected"
        ),
    }
}
