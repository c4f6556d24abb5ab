use thiserror::Error;

use crate::contract::{MISSING_CREDENTIALS_MESSAGE, NO_FILE_MESSAGE};

/// The upstream call that failed during an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStage {
    StoreObject,
    SignUrl,
    PublishNotification,
}

impl UpstreamStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StoreObject => "store_object",
            Self::SignUrl => "sign_url",
            Self::PublishNotification => "publish_notification",
        }
    }
}

impl std::fmt::Display for UpstreamStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The caller sent something unusable; no side effects were attempted.
    #[error("{0}")]
    ClientInput(String),
    /// Unknown user or mismatched password. The two are deliberately
    /// indistinguishable to the caller.
    #[error("Invalid username or password")]
    AuthenticationFailure,
    /// A storage or queue call failed. The message is surfaced verbatim.
    #[error("{message}")]
    Upstream {
        stage: UpstreamStage,
        message: String,
    },
}

impl HandlerError {
    pub fn no_file() -> Self {
        Self::ClientInput(NO_FILE_MESSAGE.to_string())
    }

    pub fn missing_credentials() -> Self {
        Self::ClientInput(MISSING_CREDENTIALS_MESSAGE.to_string())
    }

    pub fn upstream(stage: UpstreamStage, message: impl Into<String>) -> Self {
        Self::Upstream {
            stage,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::ClientInput(_) | Self::AuthenticationFailure => 400,
            Self::Upstream { .. } => 500,
        }
    }
}
