//! Routing of task nodes to synthesis strategies.
//!
//! [`DispatchPolicy`] holds two allow-lists of kinds plus a default route.
//! [`build_dispatch_plan`] applies it to every node of a graph and is pure:
//! the same graph and policy always yield the same [`DispatchPlan`].

use super::entities::TaskGraph;
use crate::core::string::normalize_kind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Synthesis strategy a node is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// Example-guided synthesis of the artifact itself
    #[default]
    Guided,
    /// Synthesis of a script that calls a per-kind tool library
    Tools,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Guided => "guided",
            Route::Tools => "tools",
        }
    }

    pub fn all() -> &'static [Route] {
        &[Route::Guided, Route::Tools]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "guided" | "g" => Ok(Route::Guided),
            "tools" | "tool" | "t" => Ok(Route::Tools),
            _ => Err(format!("Invalid Route: {}", s)),
        }
    }
}

/// Routing decision for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchEntry {
    pub node_id: String,
    /// Normalized kind the route was chosen from
    pub kind: String,
    pub route: Route,
}

/// Node id to routing decision, ordered by id.
pub type DispatchPlan = BTreeMap<String, DispatchEntry>;

/// Allow-lists mapping kinds to routes.
///
/// Kinds are stored normalized. When a kind appears in both lists the tools
/// list wins; [`DispatchPolicy::overlapping_kinds`] reports such kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPolicy {
    guided: BTreeSet<String>,
    tools: BTreeSet<String>,
    default_route: Route,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self::new(
            [
                "bv", "dj", "grover", "qrng", "ghz", "cluster", "w_state", "qft", "or",
            ],
            ["adder", "pe", "permutation"],
            Route::Guided,
        )
    }
}

impl DispatchPolicy {
    pub fn new<G, T>(guided: G, tools: T, default_route: Route) -> Self
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let normalize = |kind: &str| Some(normalize_kind(kind)).filter(|k| !k.is_empty());
        Self {
            guided: guided
                .into_iter()
                .filter_map(|k| normalize(k.as_ref()))
                .collect(),
            tools: tools
                .into_iter()
                .filter_map(|k| normalize(k.as_ref()))
                .collect(),
            default_route,
        }
    }

    pub fn guided(&self) -> &BTreeSet<String> {
        &self.guided
    }

    pub fn tools(&self) -> &BTreeSet<String> {
        &self.tools
    }

    pub fn default_route(&self) -> Route {
        self.default_route
    }

    /// Route for a kind: tools list first, then guided list, else the default.
    pub fn route_for(&self, kind: &str) -> Route {
        let kind = normalize_kind(kind);
        if self.tools.contains(&kind) {
            Route::Tools
        } else if self.guided.contains(&kind) {
            Route::Guided
        } else {
            self.default_route
        }
    }

    /// Kinds configured in both allow-lists.
    pub fn overlapping_kinds(&self) -> Vec<String> {
        self.guided.intersection(&self.tools).cloned().collect()
    }
}

/// Assign a route to every node with a non-empty id.
pub fn build_dispatch_plan(graph: &TaskGraph, policy: &DispatchPolicy) -> DispatchPlan {
    graph
        .nodes
        .iter()
        .filter(|node| !node.id.is_empty())
        .map(|node| {
            let kind = node.normalized_kind();
            let route = policy.route_for(&kind);
            (
                node.id.clone(),
                DispatchEntry {
                    node_id: node.id.clone(),
                    kind,
                    route,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::entities::TaskNode;

    fn graph(nodes: Vec<TaskNode>) -> TaskGraph {
        TaskGraph {
            nodes,
            ..TaskGraph::empty()
        }
    }

    #[test]
    fn test_route_display_and_parse() {
        assert_eq!(Route::Tools.to_string(), "tools");
        assert_eq!("Guided".parse::<Route>().unwrap(), Route::Guided);
        assert_eq!("t".parse::<Route>().unwrap(), Route::Tools);
        assert!("fast".parse::<Route>().is_err());
    }

    #[test]
    fn test_route_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Route::Tools).unwrap(), "\"tools\"");
        let route: Route = serde_json::from_str("\"guided\"").unwrap();
        assert_eq!(route, Route::Guided);
    }

    #[test]
    fn test_default_policy_routes() {
        let policy = DispatchPolicy::default();
        assert_eq!(policy.route_for("grover"), Route::Guided);
        assert_eq!(policy.route_for(" Adder "), Route::Tools);
        assert_eq!(policy.route_for("permutation"), Route::Tools);
        assert_eq!(policy.route_for("unknown"), Route::Guided);
        assert!(policy.overlapping_kinds().is_empty());
    }

    #[test]
    fn test_unknown_kind_gets_default_route() {
        let policy = DispatchPolicy::default();
        let graph = graph(vec![
            TaskNode::new("qrng_0", "qrng", 4),
            TaskNode::new("mystery_1", "teleportation", 3),
            TaskNode::new("adder_2", "adder", 2),
        ]);

        let plan = build_dispatch_plan(&graph, &policy);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan["qrng_0"].route, Route::Guided);
        assert_eq!(plan["mystery_1"].route, policy.default_route());
        assert_eq!(plan["mystery_1"].kind, "teleportation");
        assert_eq!(plan["adder_2"].route, Route::Tools);
    }

    #[test]
    fn test_custom_default_route() {
        let policy = DispatchPolicy::new(["bv"], ["adder"], Route::Tools);
        assert_eq!(policy.route_for("teleportation"), Route::Tools);
    }

    #[test]
    fn test_overlap_prefers_tools() {
        let policy = DispatchPolicy::new(["qft", "Adder"], ["adder"], Route::Guided);
        assert_eq!(policy.route_for("adder"), Route::Tools);
        assert_eq!(policy.overlapping_kinds(), vec!["adder".to_string()]);
    }

    #[test]
    fn test_empty_ids_skipped() {
        let policy = DispatchPolicy::default();
        let graph = graph(vec![TaskNode::new("", "bv", 2), TaskNode::new("bv_1", "BV", 2)]);
        let plan = build_dispatch_plan(&graph, &policy);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan["bv_1"].kind, "bv");
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let policy = DispatchPolicy::default();
        let graph = graph(vec![
            TaskNode::new("b", "pe", 3),
            TaskNode::new("a", "ghz", 3),
        ]);
        let first = build_dispatch_plan(&graph, &policy);
        let second = build_dispatch_plan(&graph, &policy);
        assert_eq!(first, second);
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
