//! Cleanup and classification of generated artifacts.

/// Marker that starts an OpenQASM program.
const QASM_HEADER: &str = "OPENQASM";

/// Clean coder output meant to be a circuit: drop code fences and anything
/// before the `OPENQASM` header.
pub fn clean_circuit_output(text: &str) -> String {
    let unfenced = text.replace("```", "");
    match unfenced.find(QASM_HEADER) {
        Some(index) => unfenced[index..].trim_end().to_string(),
        None => unfenced.trim().to_string(),
    }
}

/// Clean coder output meant to be a script: unwrap a fenced block if present.
pub fn clean_script_output(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Skip the info string (e.g. `python`) on the opening fence line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => "",
    };
    let body = match body.rfind("```") {
        Some(end) => &body[..end],
        None => body,
    };
    body.trim().to_string()
}

/// Whether script output resembles an OpenQASM program.
pub fn looks_like_circuit(text: &str) -> bool {
    text.contains(QASM_HEADER) || text.contains("qreg ") || text.contains("creg ")
}

/// Whether a final artifact should be shown as a `qasm` block in reports.
pub fn is_circuit_artifact(text: &str) -> bool {
    text.to_lowercase().contains("openqasm") || text.contains("qelib1.inc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_circuit_output_strips_prose_and_fences() {
        let raw = "Here is the circuit:\n```qasm\nOPENQASM 3.0;\ninclude \"stdgates.inc\";\n```\n";
        assert_eq!(
            clean_circuit_output(raw),
            "OPENQASM 3.0;\ninclude \"stdgates.inc\";"
        );
    }

    #[test]
    fn test_clean_circuit_output_without_header() {
        assert_eq!(clean_circuit_output("```\nqubit q;\n```"), "qubit q;");
    }

    #[test]
    fn test_clean_script_output() {
        let raw = "```python\nqc = build(3)\nprint(qc)\n```";
        assert_eq!(clean_script_output(raw), "qc = build(3)\nprint(qc)");
        assert_eq!(clean_script_output("print(1)\n"), "print(1)");
        assert_eq!(clean_script_output("```\nprint(2)\n```"), "print(2)");
    }

    #[test]
    fn test_looks_like_circuit() {
        assert!(looks_like_circuit("OPENQASM 2.0;"));
        assert!(looks_like_circuit("qreg q[3];"));
        assert!(!looks_like_circuit("<qiskit.QuantumCircuit object>"));
    }

    #[test]
    fn test_is_circuit_artifact() {
        assert!(is_circuit_artifact("openqasm 3.0;"));
        assert!(is_circuit_artifact("include \"qelib1.inc\";"));
        assert!(!is_circuit_artifact("print('hello')"));
    }
}
