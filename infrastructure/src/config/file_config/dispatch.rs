//! Routing configuration from TOML (`[dispatch]` section)

use qforge_domain::{ConfigIssue, ConfigIssueCode, DispatchPolicy, Route};
use serde::{Deserialize, Serialize};

/// Kind allow-lists per route
///
/// # Example
///
/// ```toml
/// [dispatch]
/// guided = ["bv", "dj", "grover", "qrng", "ghz", "cluster", "w_state", "qft", "or"]
/// tools = ["adder", "pe", "permutation"]
/// default_route = "guided"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    pub guided: Vec<String>,
    pub tools: Vec<String>,
    pub default_route: String,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        let policy = DispatchPolicy::default();
        Self {
            guided: policy.guided().iter().cloned().collect(),
            tools: policy.tools().iter().cloned().collect(),
            default_route: policy.default_route().to_string(),
        }
    }
}

impl FileDispatchConfig {
    /// Build the policy; an unknown default route falls back to guided.
    pub fn to_policy(&self) -> (DispatchPolicy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let default_route = match self.default_route.parse::<Route>() {
            Ok(route) => route,
            Err(e) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownRoute,
                    format!("dispatch.default_route: {}, falling back to 'guided'", e),
                ));
                Route::Guided
            }
        };

        let policy = DispatchPolicy::new(
            self.guided.iter().cloned(),
            self.tools.iter().cloned(),
            default_route,
        );
        for kind in policy.overlapping_kinds() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OverlappingKinds,
                format!(
                    "dispatch: kind '{}' is listed in both guided and tools; tools will be used",
                    kind
                ),
            ));
        }

        (policy, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_policy() {
        let (policy, issues) = FileDispatchConfig::default().to_policy();
        assert!(issues.is_empty());
        assert_eq!(policy.route_for("adder"), Route::Tools);
        assert_eq!(policy.route_for("ghz"), Route::Guided);
        assert_eq!(policy.default_route(), Route::Guided);
    }

    #[test]
    fn test_unknown_route_and_overlap() {
        let config = FileDispatchConfig {
            guided: vec!["qft".to_string()],
            tools: vec!["QFT".to_string()],
            default_route: "fastest".to_string(),
        };
        let (policy, issues) = config.to_policy();
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![ConfigIssueCode::UnknownRoute, ConfigIssueCode::OverlappingKinds]
        );
        assert_eq!(policy.route_for("qft"), Route::Tools);
    }
}
