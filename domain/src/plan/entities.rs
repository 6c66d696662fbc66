//! Task graph entities
//!
//! A [`TaskGraph`] is the decomposed form of a user request: sub-tasks as
//! [`TaskNode`]s and the data/semantic transfers between them as
//! [`TaskEdge`]s. The JSON shape matches what the planner prompt asks the
//! oracle to produce, so graphs round-trip through the payload unchanged.

use crate::core::error::DomainError;
use crate::core::string::normalize_kind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Calibration text meaning "nothing to calibrate".
pub const NO_CALIBRATION: &str = "No calibration needed.";

/// One sub-task of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNode {
    /// Unique identifier within the graph (e.g. `grover_0`)
    pub id: String,
    /// Algorithm/task family name (e.g. `grover`, `adder`)
    #[serde(rename = "name", alias = "kind")]
    pub kind: String,
    /// Minimal resource count used for synthesis and verification
    pub logical_parameter: u32,
    /// Total footprint including overhead; never below `logical_parameter`
    pub resource_parameter: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_reason: Option<String>,
}

impl TaskNode {
    /// Create a node whose resource footprint equals its logical size.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, logical_parameter: u32) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            logical_parameter,
            resource_parameter: logical_parameter,
            parameter_reason: None,
        }
    }

    /// Set the resource footprint, raised to `logical_parameter` if smaller.
    pub fn with_resource_parameter(mut self, resource_parameter: u32) -> Self {
        self.resource_parameter = resource_parameter.max(self.logical_parameter);
        self
    }

    pub fn with_parameter_reason(mut self, reason: impl Into<String>) -> Self {
        self.parameter_reason = Some(reason.into());
        self
    }

    /// Kind as used for lookups (trimmed, lower-cased).
    pub fn normalized_kind(&self) -> String {
        normalize_kind(&self.kind)
    }
}

/// Transfer between two nodes. Purely descriptive: edges never gate scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        rename = "in_qubit_number",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub in_size: Option<String>,
    #[serde(
        rename = "out_qubit_number",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub out_size: Option<String>,
}

impl TaskEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            description: description.into(),
            in_size: None,
            out_size: None,
        }
    }

    pub fn with_sizes(mut self, in_size: impl Into<String>, out_size: impl Into<String>) -> Self {
        self.in_size = Some(in_size.into());
        self.out_size = Some(out_size.into());
        self
    }
}

/// Decomposed request: optional calibration text plus the node/edge graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGraph {
    pub calibration: Option<String>,
    #[serde(default)]
    pub nodes: Vec<TaskNode>,
    #[serde(default)]
    pub edges: Vec<TaskEdge>,
}

impl Default for TaskGraph {
    fn default() -> Self {
        Self::empty()
    }
}

impl TaskGraph {
    /// The graph returned whenever decomposition cannot produce anything usable.
    pub fn empty() -> Self {
        Self {
            calibration: Some(NO_CALIBRATION.to_string()),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&TaskNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Calibration request text, if the graph asks for one.
    ///
    /// Blank text and the [`NO_CALIBRATION`] sentinel (any case) mean none.
    pub fn calibration_request(&self) -> Option<&str> {
        let text = self.calibration.as_deref()?.trim();
        if text.is_empty() || text.eq_ignore_ascii_case(NO_CALIBRATION) {
            None
        } else {
            Some(text)
        }
    }

    /// Distinct normalized kinds, sorted, blanks skipped.
    pub fn distinct_kinds(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(TaskNode::normalized_kind)
            .filter(|k| !k.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Edges whose source or target names no node in this graph.
    pub fn dangling_edges(&self) -> Vec<&TaskEdge> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
            .collect()
    }

    /// Sum of every node's resource footprint.
    pub fn total_resource(&self) -> u64 {
        self.nodes
            .iter()
            .map(|n| u64::from(n.resource_parameter))
            .sum()
    }

    /// Structural check: every node has a non-blank id and ids are unique.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if node.id.trim().is_empty() {
                return Err(DomainError::MissingNodeId(index));
            }
            if !seen.insert(node.id.as_str()) {
                return Err(DomainError::DuplicateNodeId(node.id.clone()));
            }
        }
        Ok(())
    }
}
