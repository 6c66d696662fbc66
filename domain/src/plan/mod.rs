//! Plan domain: task graphs, their tolerant parsing, and routing.

pub mod dispatch;
pub mod entities;
pub mod json_extract;
pub mod plan_parser;
