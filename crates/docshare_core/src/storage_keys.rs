use std::time::Duration;

/// Every upload lands on this key, overwriting the previous object.
pub const UPLOAD_OBJECT_KEY: &str = "DesignSmells.xlsx";

pub const SIGNED_URL_TTL_SECS: u64 = 3600;

pub const SIGNED_URL_TTL: Duration = Duration::from_secs(SIGNED_URL_TTL_SECS);
