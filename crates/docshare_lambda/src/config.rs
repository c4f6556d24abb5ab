use thiserror::Error;

pub const BUCKET_NAME_ENV: &str = "S3_BUCKET_NAME";
pub const QUEUE_URL_ENV: &str = "SQS_NAME";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

/// Settings for the upload function, read once per cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub bucket: String,
    pub queue_url: String,
}

impl UploadConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            bucket: required(&lookup, BUCKET_NAME_ENV)?,
            queue_url: required(&lookup, QUEUE_URL_ENV)?,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(key))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| values.get(key).cloned()
    }

    #[test]
    fn reads_bucket_and_queue() {
        let config = UploadConfig::from_lookup(lookup_from(&[
            ("S3_BUCKET_NAME", "docshare-uploads"),
            (
                "SQS_NAME",
                "https://sqs.eu-west-1.amazonaws.com/123456789012/docshare",
            ),
        ]))
        .expect("config should load");

        assert_eq!(config.bucket, "docshare-uploads");
        assert_eq!(
            config.queue_url,
            "https://sqs.eu-west-1.amazonaws.com/123456789012/docshare"
        );
    }

    #[test]
    fn rejects_missing_bucket() {
        let error = UploadConfig::from_lookup(lookup_from(&[("SQS_NAME", "queue")]))
            .expect_err("missing bucket should fail");

        assert_eq!(error, ConfigError::Missing("S3_BUCKET_NAME"));
        assert_eq!(error.to_string(), "S3_BUCKET_NAME must be configured");
    }

    #[test]
    fn rejects_blank_queue() {
        let error = UploadConfig::from_lookup(lookup_from(&[
            ("S3_BUCKET_NAME", "bucket"),
            ("SQS_NAME", "  "),
        ]))
        .expect_err("blank queue should fail");

        assert_eq!(error, ConfigError::Missing("SQS_NAME"));
    }
}
