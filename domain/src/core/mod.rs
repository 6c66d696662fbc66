//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`usage::UsageCounter`]: oracle token accounting with snapshot/delta reads
//! - [`string`]: truncation and kind normalization helpers

pub mod error;
pub mod string;
pub mod usage;
