//! AWS-oriented adapters and handlers for the DocShare functions.
//!
//! This crate owns runtime integration details (Lambda handlers, storage and
//! queue adapters, configuration, logging). Response contracts, body decoding
//! and credential lookup live in `docshare_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;
