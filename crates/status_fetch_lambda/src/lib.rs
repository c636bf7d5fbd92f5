//! Lambda adapters and handlers for the application status function.
//!
//! This crate owns runtime integration details (HTTP transport, API Gateway
//! event decoding, and the pipeline orchestration) and relies on
//! `status_fetch_core` for contracts, link extraction and workbook parsing.

pub mod adapters;
pub mod handlers;
