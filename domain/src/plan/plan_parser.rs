//! Task graph parsing from oracle responses.
//!
//! The oracle is asked for a single JSON object but routinely adds prose,
//! code fences, `//` comments and trailing commas. [`parse_task_graph`]
//! cleans the text, extracts the first balanced object and hands it to
//! [`parse_task_graph_json`], which reads fields leniently (numbers where
//! strings are expected and vice versa) and enforces graph invariants.

use super::entities::{TaskEdge, TaskGraph, TaskNode};
use super::json_extract::{extract_first_object, strip_line_comments, strip_trailing_commas};
use crate::core::error::DomainError;
use serde_json::Value;
use thiserror::Error;

/// Why an oracle response could not be turned into a [`TaskGraph`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanParseError {
    #[error("no JSON object found in response")]
    NoJsonObject,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("response has no \"nodes\" array")]
    MissingNodes,

    #[error("node #{index} is invalid: {reason}")]
    InvalidNode { index: usize, reason: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Parse a task graph out of free-form oracle text.
pub fn parse_task_graph(response: &str) -> Result<TaskGraph, PlanParseError> {
    let cleaned = strip_line_comments(response);
    let object = extract_first_object(&cleaned).ok_or(PlanParseError::NoJsonObject)?;
    let object = strip_trailing_commas(object);

    let json: Value =
        serde_json::from_str(&object).map_err(|e| PlanParseError::InvalidJson(e.to_string()))?;

    parse_task_graph_json(&json)
}

/// JSON value to string (numbers stringified; null and empty become None)
fn json_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a non-negative integer from a number or a numeric string.
fn json_value_to_u32(value: &Value) -> Result<u32, String> {
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| format!("expected a non-negative integer, got {}", value))
}

/// Parse a task graph from a JSON value.
///
/// Expected schema:
/// ```json
/// {
///   "calibration": "string or null",
///   "nodes": [
///     {"id": "grover_0", "name": "grover", "logical_parameter": 3,
///      "resource_parameter": 3, "parameter_reason": "optional"}
///   ],
///   "edges": [
///     {"source": "a", "target": "b", "description": "...",
///      "in_qubit_number": "4", "out_qubit_number": "5"}
///   ]
/// }
/// ```
///
/// `nodes` is required (it may be empty); `edges` defaults to empty.
pub fn parse_task_graph_json(json: &Value) -> Result<TaskGraph, PlanParseError> {
    let calibration = json.get("calibration").and_then(json_value_to_string);

    let nodes_json = json
        .get("nodes")
        .and_then(|v| v.as_array())
        .ok_or(PlanParseError::MissingNodes)?;

    let mut nodes = Vec::with_capacity(nodes_json.len());
    for (index, node_json) in nodes_json.iter().enumerate() {
        nodes.push(parse_node(index, node_json)?);
    }

    let edges = json
        .get("edges")
        .and_then(|v| v.as_array())
        .map(|edges| edges.iter().filter_map(parse_edge).collect())
        .unwrap_or_default();

    let graph = TaskGraph {
        calibration,
        nodes,
        edges,
    };
    graph.validate()?;
    Ok(graph)
}

fn parse_node(index: usize, node_json: &Value) -> Result<TaskNode, PlanParseError> {
    let invalid = |reason: String| PlanParseError::InvalidNode { index, reason };

    if !node_json.is_object() {
        return Err(invalid("not an object".to_string()));
    }

    let id = node_json
        .get("id")
        .and_then(json_value_to_string)
        .unwrap_or_default();
    let kind = node_json
        .get("name")
        .or_else(|| node_json.get("kind"))
        .and_then(json_value_to_string)
        .unwrap_or_default();

    let logical = match node_json.get("logical_parameter") {
        Some(v) if !v.is_null() => json_value_to_u32(v).map_err(invalid)?,
        _ => 0,
    };

    let mut node = TaskNode::new(id, kind, logical);

    if let Some(v) = node_json.get("resource_parameter")
        && !v.is_null()
    {
        node = node.with_resource_parameter(json_value_to_u32(v).map_err(invalid)?);
    }

    if let Some(reason) = node_json.get("parameter_reason").and_then(json_value_to_string) {
        node = node.with_parameter_reason(reason);
    }

    Ok(node)
}

/// Edges are descriptive metadata; a non-object entry is dropped rather than failing the graph.
fn parse_edge(edge_json: &Value) -> Option<TaskEdge> {
    edge_json.as_object()?;

    let field = |key: &str| edge_json.get(key).and_then(json_value_to_string);

    let mut edge = TaskEdge::new(
        field("source").unwrap_or_default(),
        field("target").unwrap_or_default(),
        field("description").unwrap_or_default(),
    );
    edge.in_size = field("in_qubit_number");
    edge.out_size = field("out_qubit_number");
    Some(edge)
}
