//! Prompts for request decomposition and plan enrichment.

/// Templates for the planning stages.
pub struct PlanPromptTemplate;

impl PlanPromptTemplate {
    /// System prompt asking for a task graph as a single JSON object.
    pub fn decompose_system() -> &'static str {
        r#"You are an expert assistant for quantum computing workflows. Analyze the user's request and decompose it into a computational graph.

Output requirements:
- Output exactly one valid JSON object and nothing else.
- Required keys:
  - "calibration": the calibration task described in the request (e.g. "calibrate qubit-8 with new frequency 5.66e9"), or "No calibration needed."
  - "nodes": list of objects with
      - "id": unique identifier such as "grover_0"
      - "name": algorithm name, one of "bv", "dj", "grover", "qrng", "ghz", "cluster", "w_state", "qft", "or", "adder", "pe", "permutation"
      - "logical_parameter": minimal number of logical qubits needed by the core logic (used for synthesis)
      - "resource_parameter": total qubit footprint including ancillas (reported at the end)
  - "edges": list of objects with
      - "source": source node id
      - "target": target node id
      - "description": what is passed between the nodes

Rules:
- Encoding or mapping layers (amplitude encoding, direct state transfer) are edges, never nodes.
- Prefer the smallest sufficient logical_parameter.
- If the total footprint is unknown, set resource_parameter equal to logical_parameter.

Example: "give me a circuit that performs grover's algorithm when qubit number = 3"
{
  "calibration": "No calibration needed.",
  "nodes": [{"id": "grover_0", "name": "grover", "logical_parameter": 3, "resource_parameter": 3}],
  "edges": []
}

Example: "I need a qrng circuit that generates 4 random bits, then add the first 2 bits with the last 2 bits."
{
  "calibration": "No calibration needed.",
  "nodes": [
    {"id": "qrng_0", "name": "qrng", "logical_parameter": 4, "resource_parameter": 4},
    {"id": "adder_1", "name": "adder", "logical_parameter": 2, "resource_parameter": 6}
  ],
  "edges": [
    {"source": "qrng_0", "target": "adder_1", "description": "Split the 4 measured bits into two 2-bit integers and feed them to the adder."}
  ]
}

Example: "calibrate qubit-8 with new frequency 5.66e9, then build a dj circuit with 6 qubits"
{
  "calibration": "calibrate qubit-8 with new frequency 5.66e9",
  "nodes": [{"id": "dj_0", "name": "dj", "logical_parameter": 6, "resource_parameter": 6}],
  "edges": []
}"#
    }

    pub fn decompose_prompt(request: &str) -> String {
        format!("User Request: \"{}\"\n", request)
    }

    /// System prompt for the enrichment pass, with per-kind schemas appended.
    pub fn enrich_system(schema_appendix: &str) -> String {
        format!(
            r#"You are an expert in quantum circuit implementation and resource estimation. Enrich the computational graph you are given.

Tasks:
1. Check that every node's parameters are minimal and reasonable.
2. Add "parameter_reason" to every node, briefly explaining its logical and resource parameters.
3. Remove any parameter that is not a qubit count (keep only logical_parameter and resource_parameter).
4. Rewrite every edge "description" to state the transfer kind explicitly (direct state transfer, amplitude encoding, parameter passing, or another).
5. Add "in_qubit_number" and "out_qubit_number" to every edge (strings are fine).
6. Normalize algorithm names to their standard short names.

Return only one valid JSON object with the same "calibration", "nodes" and "edges" keys.

Example input:
{{"calibration": "No calibration needed.",
  "nodes": [{{"id": "qrng_0", "name": "qrng", "logical_parameter": 4, "resource_parameter": 4}},
            {{"id": "or_1", "name": "or", "logical_parameter": 1, "resource_parameter": 1}}],
  "edges": [{{"source": "qrng_0", "target": "or_1", "description": "Use the qrng result as input of or."}}]}}

Example output:
{{"calibration": "No calibration needed.",
  "nodes": [{{"id": "qrng_0", "name": "qrng", "logical_parameter": 4, "resource_parameter": 4,
              "parameter_reason": "Four random bits need four qubits."}},
            {{"id": "or_1", "name": "or", "logical_parameter": 5, "resource_parameter": 5,
              "parameter_reason": "Four input bits plus one output bit."}}],
  "edges": [{{"source": "qrng_0", "target": "or_1", "in_qubit_number": "4", "out_qubit_number": "5",
              "description": "Parameter passing of 4 classical bits from qrng to or; no quantum remapping."}}]}}

# Algorithm schemas
{}"#,
            schema_appendix_or_placeholder(schema_appendix)
        )
    }

    pub fn enrich_prompt(request: &str, graph_json: &str) -> String {
        format!("The user question was: {}\n\n{}", request, graph_json)
    }

    /// Render `(kind, schema)` pairs as the appendix of the enrichment prompt.
    pub fn schema_appendix(schemas: &[(String, String)]) -> String {
        schemas
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(kind, text)| format!("### {} schema\n{}\n", kind, text.trim()))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

fn schema_appendix_or_placeholder(appendix: &str) -> &str {
    if appendix.trim().is_empty() {
        "[No schemas found for the referenced algorithms]"
    } else {
        appendix
    }
}
