//! Prompts for example-guided circuit synthesis.

/// Templates for the guided strategy's advisor, coder and reviewer.
pub struct GuidedPromptTemplate;

impl GuidedPromptTemplate {
    pub fn advisor_system() -> &'static str {
        "You are an expert in quantum programming, especially in the OpenQASM language."
    }

    /// Ask for a chain of thought explaining the examples.
    pub fn advisor_prompt(kind: &str, examples: &str) -> String {
        format!(
            r#"### Related Example Code
These OpenQASM examples may help when writing code for the {kind} algorithm:

{examples}

Write a chain of thought that explains these examples so that it can guide a coder towards the best OpenQASM for this algorithm. Provide only the chain of thought, nothing else."#
        )
    }

    pub fn generate_system() -> &'static str {
        "You are an OpenQASM expert who writes OpenQASM 3.0 code. Produce valid OpenQASM given (a) examples, (b) the algorithm name and (c) the qubit number. Output OpenQASM code only, nothing else."
    }

    pub fn generate_prompt(kind: &str, size: u32, examples: &str, analysis: &str) -> String {
        format!(
            r#"Here are OpenQASM examples for the {kind} algorithm that may help.

### Analysis
{analysis}

### Related Example Code
{examples}

Now write the code for the {kind} algorithm when qubit_number = {size}, based on the examples. Provide only the code itself, nothing else."#
        )
    }

    pub fn revise_system() -> &'static str {
        "You are an OpenQASM expert who revises OpenQASM 3.0 code. Fix the previous program given (a) its error report, (b) a suggested solution and (c) the previous code. Output OpenQASM code only, nothing else."
    }

    pub fn revise_prompt(kind: &str, size: u32, artifact: &str, diagnostic: &str, suggestion: &str) -> String {
        format!(
            r#"The generated code for the {kind} algorithm when qubit_number = {size} was:

{artifact}

It failed with the following report:

{diagnostic}

Another quantum expert suggests:

{suggestion}

Now revise the code. Provide only the code itself, nothing else."#
        )
    }

    pub fn reflection_system() -> &'static str {
        "You are an expert in quantum programming, especially OpenQASM 3.0. Analyze compiler and runtime errors and propose fixes. Output only one section:\nAnalysis:\nKeep it concise but technically accurate. Do not show code; only the suggestion is needed."
    }
}
