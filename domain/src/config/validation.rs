//! Structured configuration issues.
//!
//! Configuration is checked as a whole after loading; each problem becomes a
//! [`ConfigIssue`] so callers can print warnings and refuse to start on errors.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No oracle model configured.
    EmptyModel,
    /// Unknown oracle provider and no explicit base URL.
    UnknownProvider,
    /// `dispatch.default_route` is not a known route.
    UnknownRoute,
    /// A kind is listed in both dispatch allow-lists (tools wins).
    OverlappingKinds,
    /// A timeout is set to zero.
    ZeroTimeout,
    /// `solve.candidate_count` is zero (treated as one).
    ZeroCandidates,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let issue = ConfigIssue::warning(
            ConfigIssueCode::OverlappingKinds,
            "kind 'adder' is in both allow-lists",
        );
        assert_eq!(issue.to_string(), "warning: kind 'adder' is in both allow-lists");
        assert!(!issue.is_error());
    }

    #[test]
    fn test_error_constructor() {
        let issue = ConfigIssue::error(ConfigIssueCode::EmptyModel, "oracle.model is empty");
        assert!(issue.is_error());
        assert_eq!(issue.code, ConfigIssueCode::EmptyModel);
    }
}
