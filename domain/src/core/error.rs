//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid task node: {0}")]
    InvalidNode(String),

    #[error("Task node at index {0} has no id")]
    MissingNodeId(usize),

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Invalid calibration instruction: {0}")]
    InvalidCalibration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_node_display() {
        let error = DomainError::DuplicateNodeId("qrng_0".to_string());
        assert_eq!(error.to_string(), "Duplicate node id: qrng_0");
    }

    #[test]
    fn test_missing_node_id_display() {
        let error = DomainError::MissingNodeId(2);
        assert_eq!(error.to_string(), "Task node at index 2 has no id");
    }

    #[test]
    fn test_invalid_route_display() {
        let error = DomainError::InvalidRoute("fast".to_string());
        assert_eq!(error.to_string(), "Invalid route: fast");
    }
}
