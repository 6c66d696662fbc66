//! Prompt turning a calibration request into JSON instructions.

pub struct CalibrationPromptTemplate;

impl CalibrationPromptTemplate {
    pub fn system() -> &'static str {
        "You are an assistant that outputs JSON content based on the user's requirements."
    }

    pub fn instructions_prompt(description: &str) -> String {
        format!(
            r#"How to name variables:
- frequency of qubit-0 -> q0_freq
- qubit-9's frequency -> q9_freq
- readout frequency of qubit-5 -> ro5_freq

Example input:
I want to calibrate qubit-1 with new frequency 4.878e9, and readout frequency of qubit-17 as 6.89e9.

Example output:
[
  {{"variable_name": "q1_freq", "value": 4.878e9}},
  {{"variable_name": "ro17_freq", "value": 6.89e9}}
]

The user's requirement is:

{description}

Now output the JSON array and nothing else."#
        )
    }
}
