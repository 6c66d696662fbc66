//! Prompts for tool-assisted synthesis (generated scripts calling a tool library).

/// Templates for the tools strategy's advisor, coder and reviewer.
pub struct ToolsPromptTemplate;

impl ToolsPromptTemplate {
    pub fn advisor_system() -> &'static str {
        "You are a quantum computing expert. You will be given tools that build quantum circuits. Your task is to plan how to use these tools."
    }

    /// Ask for a natural-language plan over the tool library.
    pub fn advisor_prompt(kind: &str, tools: &str) -> String {
        format!(
            r#"You are a Python agent equipped with pre-defined functions for quantum algorithms.
Plan how to produce an OpenQASM circuit for {kind}.
You may write new functions, but prefer the existing ones.
A fake oracle is sometimes needed while building; remember to remove it afterwards. The real oracle is provided as a black-box gate named "Oracle" in "oracle.inc".
The plan must end by printing the OpenQASM circuit so it can be captured from stdout.

Available functions (already implemented, call them directly):
{tools}

Output the high-level plan in natural language only; no code. For example:
step 1: initialize the template circuit.
step 2: compute the required parameters.
step 3: create the input and output registers.
step 4: build the complete circuit.
step 5: convert the circuit to an OpenQASM string.
step 6: print it."#
        )
    }

    pub fn generate_system() -> &'static str {
        "You are a quantum expert who writes Python code using provided tools that generate OpenQASM. Produce valid Python given (a) the tool descriptions, (b) a plan, (c) the algorithm name and (d) the qubit number. Output Python code only, nothing else."
    }

    pub fn generate_prompt(kind: &str, size: u32, tools: &str, plan: &str) -> String {
        format!(
            r#"These functions are already implemented and may be used for the {kind} algorithm.

### Available Tools
{tools}

### Suggested Plan
{plan}

Now write the code for the {kind} algorithm when qubit_number = {size} using these tools. Prefer calling them directly over re-implementing them.
Output Python code only, without comments or explanation; it will be executed as-is with the tools already loaded.
Do not import modules when calling the existing tools. Print the final OpenQASM circuit to stdout."#
        )
    }

    pub fn revise_system() -> &'static str {
        "You are a quantum expert who revises Python code that uses provided tools. Fix the code given (a) the algorithm name, (b) the qubit number, (c) the prior code, (d) its error report and (e) a suggested solution. Output Python code only, nothing else."
    }

    pub fn revise_prompt(kind: &str, size: u32, script: &str, diagnostic: &str, suggestion: &str) -> String {
        format!(
            r#"The generated Python code (using the pre-defined tools) for the {kind} algorithm when qubit_number = {size} was:

{script}

It failed with the following report:

{diagnostic}

Another expert suggests:

{suggestion}

Now revise the code. Provide only the Python code itself, nothing else."#
        )
    }

    pub fn reflection_system() -> &'static str {
        "You are a reviewer. Given a script that builds a quantum circuit with a tool library and the tester report, give a short, actionable suggestion that makes it pass. Output only one section:\nAnalysis:\nDo not show code."
    }

    /// Diagnostic for a script that ran cleanly but printed nothing.
    pub fn empty_output_diagnostic() -> &'static str {
        "Script ran without errors, but produced no output. Print the final OpenQASM to stdout, e.g. `print(qasm)`, and make sure the tool functions return OpenQASM or that the circuit is converted to OpenQASM."
    }

    /// Diagnostic for a script that failed to run.
    pub fn execution_error_diagnostic(error: &str) -> String {
        format!(
            "Execution error. Captured error: {}. Calling the existing tools directly is recommended over re-implementing them.",
            error.trim()
        )
    }

    /// Prefix for a verifier report when the printed output does not look like OpenQASM.
    pub fn not_circuit_warning() -> &'static str {
        "Warning: output does not resemble OpenQASM (no 'OPENQASM', 'qreg' or 'creg'). Print the circuit in OpenQASM format."
    }

    /// Verifier report for a printed circuit.
    pub fn verification_report(success: bool, score: f64, detail: &str, warn: bool) -> String {
        let report = format!("success={}, success_rate={}\n{}", success, score, detail);
        if warn {
            format!("{}\n\n{}", Self::not_circuit_warning(), report)
        } else {
            report
        }
    }
}
