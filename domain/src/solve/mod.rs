//! Solve domain: attempts, lineage history and node outcomes.
//!
//! - [`attempt`]: immutable attempts and their record lines
//! - [`reflection_history`]: bounded per-lineage FIFO used for repair prompts
//! - [`guidance`]: advisor output, examples, tool listings, verifier results
//! - [`artifact`]: cleanup of coder output
//! - [`outcome`]: the result of one node solve

pub mod artifact;
pub mod attempt;
pub mod guidance;
pub mod outcome;
pub mod reflection_history;
