use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;

pub trait ObjectStore {
    /// Writes `body` under `key`, replacing any existing object.
    fn put_object(&self, key: &str, body: &[u8]) -> Result<(), String>;

    /// Returns a URL granting read access to `key` for `ttl`.
    fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, String>;
}

#[derive(Clone)]
pub struct S3ObjectStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(bucket: impl Into<String>, s3_client: aws_sdk_s3::Client) -> Self {
        Self {
            bucket: bucket.into(),
            s3_client,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl ObjectStore for S3ObjectStore {
    fn put_object(&self, key: &str, body: &[u8]) -> Result<(), String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write object to s3: {error}"))
            })
        })
    }

    fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, String> {
        let presigning_config = PresigningConfig::expires_in(ttl)
            .map_err(|error| format!("invalid presigned url expiry: {error}"))?;
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .get_object()
                    .bucket(bucket)
                    .key(object_key)
                    .presigned(presigning_config)
                    .await
                    .map(|request| request.uri().to_string())
                    .map_err(|error| format!("failed to presign s3 object url: {error}"))
            })
        })
    }
}
