//! Report domain: per-node results, run payload and the Markdown report.

pub mod entities;
pub mod render;
