//! Shared DocShare handler primitives.
//!
//! This crate owns the HTTP-shaped response contracts, event body decoding,
//! credential lookup, and the error taxonomy used by both handlers. It
//! intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod credentials;
pub mod error;
pub mod storage_keys;
