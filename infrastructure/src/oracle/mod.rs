//! Synthesis oracle adapters.

mod http;
mod provider;

pub use http::{HttpSynthesisOracle, RetryPolicy};
pub use provider::OracleProvider;
