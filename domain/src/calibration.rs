//! Calibration instructions parsed from oracle output.
//!
//! The oracle translates a free-text calibration request (e.g. "calibrate
//! qubit-8 with new frequency 5.66e9") into a JSON array of
//! `{"variable_name": ..., "value": ...}` objects naming constants in the
//! backend description file.

use crate::core::error::DomainError;
use crate::plan::json_extract::{extract_first_array, strip_line_comments, strip_trailing_commas};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Set one backend constant to a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationInstruction {
    pub variable_name: String,
    pub value: f64,
}

impl CalibrationInstruction {
    pub fn new(variable_name: impl Into<String>, value: f64) -> Self {
        Self {
            variable_name: variable_name.into(),
            value,
        }
    }

    /// Value as written into the backend file (three decimals).
    pub fn formatted_value(&self) -> String {
        format!("{:.3}", self.value)
    }
}

/// Parse instructions out of oracle text.
///
/// Entries without a usable name or numeric value are skipped; an answer with
/// no usable entry at all is an error.
pub fn parse_calibration_instructions(
    response: &str,
) -> Result<Vec<CalibrationInstruction>, DomainError> {
    let cleaned = strip_line_comments(response);
    let array = extract_first_array(&cleaned)
        .ok_or_else(|| DomainError::InvalidCalibration("no JSON array found".to_string()))?;
    let array = strip_trailing_commas(array);

    let json: Value = serde_json::from_str(&array)
        .map_err(|e| DomainError::InvalidCalibration(format!("invalid JSON: {}", e)))?;
    let entries = json
        .as_array()
        .ok_or_else(|| DomainError::InvalidCalibration("not a list".to_string()))?;

    let instructions: Vec<CalibrationInstruction> = entries.iter().filter_map(parse_entry).collect();

    if instructions.is_empty() {
        return Err(DomainError::InvalidCalibration(
            "no valid instruction in response".to_string(),
        ));
    }
    Ok(instructions)
}

fn parse_entry(entry: &Value) -> Option<CalibrationInstruction> {
    let name = entry
        .get("variable_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())?;

    let value = match entry.get("value")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())?;

    Some(CalibrationInstruction::new(name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instructions() {
        let response = r#"[
  {"variable_name": "q1_freq", "value": 4.87e9},
  {"variable_name": "ro17_freq", "value": "6.89e9"},
]"#;
        let instructions = parse_calibration_instructions(response).unwrap();
        assert_eq!(
            instructions,
            vec![
                CalibrationInstruction::new("q1_freq", 4.87e9),
                CalibrationInstruction::new("ro17_freq", 6.89e9),
            ]
        );
    }

    #[test]
    fn test_parse_skips_invalid_entries() {
        let response = r#"Sure:
```json
[{"variable_name": "q9_freq", "value": 5.22e9}, {"value": 1.0}, {"variable_name": "x", "value": "n/a"}]
```"#;
        let instructions = parse_calibration_instructions(response).unwrap();
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].variable_name, "q9_freq");
    }

    #[test]
    fn test_parse_no_valid_entry() {
        let result = parse_calibration_instructions(r#"[{"name": "q1_freq"}]"#);
        assert!(matches!(result, Err(DomainError::InvalidCalibration(_))));
    }

    #[test]
    fn test_parse_prose_only() {
        assert!(parse_calibration_instructions("I cannot do that.").is_err());
    }

    #[test]
    fn test_formatted_value() {
        assert_eq!(
            CalibrationInstruction::new("q0_freq", 5.66e9).formatted_value(),
            "5660000000.000"
        );
        assert_eq!(CalibrationInstruction::new("x_len", 0.12345).formatted_value(), "0.123");
    }
}
