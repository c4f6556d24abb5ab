use docshare_core::contract::{
    cors_headers, decode_login_request, error_response, json_response, minimal_headers,
    ApiGatewayResponse, LoginSuccessBody, LOGIN_SUCCESS_MESSAGE,
};
use docshare_core::credentials::{verify_credentials, CredentialStore};
use serde_json::Value;

/// Checks the submitted credentials against `credentials`.
///
/// Only the success branch carries cross-origin headers. No session or token
/// is issued; the response just reports the outcome.
pub fn handle_login_event(
    event: &Value,
    credentials: &impl CredentialStore,
) -> ApiGatewayResponse {
    let request = match decode_login_request(event) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                component = "login_handler",
                event = "login_rejected",
                reason = %error,
                "login request rejected"
            );
            return error_response(&error, minimal_headers());
        }
    };

    if let Err(error) = verify_credentials(credentials, &request) {
        tracing::warn!(
            component = "login_handler",
            event = "login_rejected",
            username = %request.username,
            reason = %error,
            "login failed"
        );
        return error_response(&error, minimal_headers());
    }

    tracing::info!(
        component = "login_handler",
        event = "login_succeeded",
        username = %request.username,
        "login succeeded"
    );
    json_response(
        200,
        cors_headers(),
        LoginSuccessBody {
            success: LOGIN_SUCCESS_MESSAGE.to_string(),
        },
    )
}
