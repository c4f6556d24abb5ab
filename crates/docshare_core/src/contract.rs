use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::error::HandlerError;

pub const NO_FILE_MESSAGE: &str = "No file provided";
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Username or password missing";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Logged in successfully";
pub const UPLOAD_SUCCESS_MESSAGE: &str =
    "File uploaded to S3 bucket successfully and URL sent to SQS";

pub type Headers = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Headers,
    pub body: String,
}

impl ApiGatewayResponse {
    /// Parses the JSON body back into a value. Mostly useful in tests.
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadSuccessBody {
    pub success: String,
    pub public_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginSuccessBody {
    pub success: String,
}

/// Published once per successful upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationMessage {
    pub url: String,
}

impl NotificationMessage {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub fn cors_headers() -> Headers {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        ),
        ("Access-Control-Allow-Methods".to_string(), "POST".to_string()),
    ])
}

pub fn minimal_headers() -> Headers {
    BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())])
}

pub fn json_response(
    status_code: u16,
    headers: Headers,
    payload: impl Serialize,
) -> ApiGatewayResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers,
            body,
        },
        Err(error) => ApiGatewayResponse {
            status_code: 500,
            headers,
            body: json!({
                "error": format!("failed to serialize response: {error}"),
            })
            .to_string(),
        },
    }
}

pub fn error_response(error: &HandlerError, headers: Headers) -> ApiGatewayResponse {
    json_response(
        error.status_code(),
        headers,
        ErrorBody {
            error: error.to_string(),
        },
    )
}

/// Extracts the upload payload from a trigger event.
///
/// String bodies are taken byte for byte. Inline JSON bodies (direct
/// invocation) are stored as their compact serialisation.
pub fn decode_upload_body(event: &Value) -> Result<Vec<u8>, HandlerError> {
    let Some(body) = event.get("body") else {
        return Err(HandlerError::no_file());
    };

    match body {
        Value::Null => Err(HandlerError::no_file()),
        Value::String(text) if text.is_empty() => Err(HandlerError::no_file()),
        Value::String(text) => Ok(text.as_bytes().to_vec()),
        Value::Object(map) if map.is_empty() => Err(HandlerError::no_file()),
        Value::Array(items) if items.is_empty() => Err(HandlerError::no_file()),
        other => Ok(other.to_string().into_bytes()),
    }
}

/// Extracts `username` and `password` from a login event.
///
/// No body, unparsable JSON, or an absent field is a client error. A field
/// that is present but not a string can never match a stored password, so it
/// is reported as a failed login.
pub fn decode_login_request(event: &Value) -> Result<LoginRequest, HandlerError> {
    let data = match event.get("body") {
        None | Some(Value::Null) => return Err(HandlerError::missing_credentials()),
        Some(Value::String(text)) => serde_json::from_str::<Value>(text)
            .map_err(|_| HandlerError::missing_credentials())?,
        Some(other) => other.clone(),
    };

    let (Some(username), Some(password)) = (data.get("username"), data.get("password")) else {
        return Err(HandlerError::missing_credentials());
    };

    match (username.as_str(), password.as_str()) {
        (Some(username), Some(password)) => Ok(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }),
        _ => Err(HandlerError::AuthenticationFailure),
    }
}

pub fn payload_digest(payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_body_rejects_missing_null_and_empty() {
        for event in [
            json!({}),
            json!({"body": null}),
            json!({"body": ""}),
            json!({"body": {}}),
            json!("not-an-object"),
        ] {
            let error = decode_upload_body(&event).expect_err("body should be rejected");
            assert_eq!(error, HandlerError::no_file());
        }
    }

    #[test]
    fn upload_body_keeps_string_bytes_verbatim() {
        let event = json!({
            "body": "col_a,col_b\n1,2\n",
            "headers": {"Content-Disposition": "attachment; filename=\"ignored.csv\""}
        });

        let payload = decode_upload_body(&event).expect("body should decode");
        assert_eq!(payload, b"col_a,col_b\n1,2\n".to_vec());
    }

    #[test]
    fn upload_body_ignores_base64_flag() {
        for body in ["not base64!", "UEsDBA=="] {
            let event = json!({"body": body, "isBase64Encoded": true});

            let payload = decode_upload_body(&event).expect("flagged body should be accepted");
            assert_eq!(payload, body.as_bytes().to_vec());
        }
    }

    #[test]
    fn login_request_accepts_string_and_inline_bodies() {
        let from_string = decode_login_request(&json!({
            "body": "{\"username\":\"Yash\",\"password\":\"Admin@123\"}"
        }))
        .expect("string body should decode");
        let inline = decode_login_request(&json!({
            "body": {"username": "Yash", "password": "Admin@123"}
        }))
        .expect("inline body should decode");

        assert_eq!(from_string, inline);
        assert_eq!(from_string.username, "Yash");
    }

    #[test]
    fn login_request_rejects_incomplete_bodies() {
        for event in [
            json!({}),
            json!({"body": null}),
            json!({"body": "{\"username\":\"Abhishek\"}"}),
            json!({"body": "{\"password\":\"Admin@123\"}"}),
            json!({"body": "not json"}),
            json!({"body": "[]"}),
        ] {
            let error = decode_login_request(&event).expect_err("body should be rejected");
            assert_eq!(error.to_string(), MISSING_CREDENTIALS_MESSAGE);
        }
    }

    #[test]
    fn login_request_with_non_string_fields_is_a_failed_login() {
        for event in [
            json!({"body": "{\"username\":\"Abhishek\",\"password\":123}"}),
            json!({"body": "{\"username\":null,\"password\":\"Admin@123\"}"}),
            json!({"body": {"username": ["Abhishek"], "password": "Admin@123"}}),
        ] {
            let error = decode_login_request(&event).expect_err("login should be rejected");
            assert_eq!(error, HandlerError::AuthenticationFailure);
            assert_eq!(error.to_string(), INVALID_CREDENTIALS_MESSAGE);
        }
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(<S::Error as serde::ser::Error>::custom("refused"))
        }
    }

    #[test]
    fn json_response_reports_serialization_failure_as_500() {
        let response = json_response(200, minimal_headers(), Unserializable);

        assert_eq!(response.status_code, 500);
        assert_eq!(response.headers, minimal_headers());
        assert_eq!(
            response.body_json().expect("body should be json"),
            json!({"error": "failed to serialize response: refused"})
        );
    }

    #[test]
    fn error_response_serializes_status_code_field() {
        let response = error_response(&HandlerError::no_file(), cors_headers());
        let value = serde_json::to_value(&response).expect("response should serialize");

        assert_eq!(value["statusCode"], json!(400));
        assert_eq!(value["body"], json!("{\"error\":\"No file provided\"}"));
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], json!("*"));
    }

    #[test]
    fn notification_message_has_only_url_field() {
        let message =
            NotificationMessage::new("https://bucket.s3.amazonaws.com/key?X-Amz-Expires=3600");
        let body = message.to_json().expect("message should serialize");
        let value: Value = serde_json::from_str(&body).expect("valid json");

        let object = value.as_object().expect("message should be an object");
        assert_eq!(object.len(), 1);
        assert_eq!(
            object["url"],
            json!("https://bucket.s3.amazonaws.com/key?X-Amz-Expires=3600")
        );
    }

    #[test]
    fn payload_digest_is_hex_sha256() {
        assert_eq!(
            payload_digest(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
