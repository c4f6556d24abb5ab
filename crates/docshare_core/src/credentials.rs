use std::collections::HashMap;

use crate::contract::LoginRequest;
use crate::error::HandlerError;

/// Looks up the stored password for a username.
pub trait CredentialStore {
    fn password_for(&self, username: &str) -> Option<&str>;
}

/// In-memory credential table, immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCredentialStore {
    records: HashMap<String, String>,
}

impl StaticCredentialStore {
    /// The table compiled into the login function.
    pub fn builtin() -> Self {
        Self::from_pairs([("Abhishek", "Admin@123"), ("Yash", "Admin@123")])
    }

    pub fn from_pairs<U, P>(pairs: impl IntoIterator<Item = (U, P)>) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            records: pairs
                .into_iter()
                .map(|(username, password)| (username.into(), password.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CredentialStore for StaticCredentialStore {
    fn password_for(&self, username: &str) -> Option<&str> {
        self.records.get(username).map(String::as_str)
    }
}

pub fn verify_credentials(
    store: &impl CredentialStore,
    request: &LoginRequest,
) -> Result<(), HandlerError> {
    match store.password_for(&request.username) {
        Some(stored) if stored == request.password => Ok(()),
        _ => Err(HandlerError::AuthenticationFailure),
    }
}
