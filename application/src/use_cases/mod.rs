//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod calibrate;
pub mod plan_task;
pub mod run_workflow;
pub mod solve_candidate;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_support;
