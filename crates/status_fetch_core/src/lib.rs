//! Shared domain primitives for the application status lambda.
//!
//! This crate owns the response contract, upstream configuration, link
//! extraction and spreadsheet summarization. It intentionally excludes HTTP
//! transport and Lambda runtime concerns, which live in `status_fetch_lambda`.

pub mod config;
pub mod contract;
pub mod error;
pub mod link;
pub mod workbook;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
