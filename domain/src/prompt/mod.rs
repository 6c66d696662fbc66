//! Prompt domain
//!
//! Templates for every oracle call in the workflow: planning, the two
//! synthesis strategies, reflection and calibration.

mod calibration;
mod guided;
mod plan;
pub mod reflection;
mod tools;

pub use calibration::CalibrationPromptTemplate;
pub use guided::GuidedPromptTemplate;
pub use plan::PlanPromptTemplate;
pub use reflection::{FALLBACK_REFLECTION, ReflectionPromptTemplate};
pub use tools::ToolsPromptTemplate;

