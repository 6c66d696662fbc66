//! Calibration of the backend description from a natural-language request.

use crate::ports::calibration_applier::CalibrationApplier;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::synthesis_oracle::{SynthesisOracle, max_output};
use qforge_domain::{CalibrationOutcome, CalibrationPromptTemplate, parse_calibration_instructions};
use std::sync::Arc;
use tracing::{info, warn};

const SUCCESS_REPORT: &str = "successfully calibrated!";
const FAILURE_REPORT: &str = "Failed to calibrate";

pub struct CalibrateUseCase {
    oracle: Arc<dyn SynthesisOracle>,
    applier: Arc<dyn CalibrationApplier>,
    max_trials: u32,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl CalibrateUseCase {
    pub fn new(
        oracle: Arc<dyn SynthesisOracle>,
        applier: Arc<dyn CalibrationApplier>,
        max_trials: u32,
    ) -> Self {
        Self {
            oracle,
            applier,
            max_trials,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Ask for instructions and apply them, retrying up to `max_trials` times.
    pub async fn calibrate(&self, description: &str) -> CalibrationOutcome {
        let trials = self.max_trials.max(1);
        let mut errors = Vec::new();

        for trial in 1..=trials {
            let text = match self
                .oracle
                .generate(
                    &CalibrationPromptTemplate::instructions_prompt(description),
                    CalibrationPromptTemplate::system(),
                    max_output::CALIBRATION,
                )
                .await
            {
                Ok(text) => text,
                Err(e) => {
                    warn!("Calibration trial {} failed: {}", trial, e);
                    errors.push(format!("trial #{}: {}", trial, e));
                    continue;
                }
            };

            let instructions = match parse_calibration_instructions(&text) {
                Ok(instructions) => instructions,
                Err(e) => {
                    warn!("Calibration trial {} produced no instructions: {}", trial, e);
                    errors.push(format!("trial #{}: {}", trial, e));
                    continue;
                }
            };

            match self.applier.apply(&instructions).await {
                Ok(count) => {
                    info!("Calibrated {} parameter(s) on trial {}", count, trial);
                    self.conversation_logger.log(ConversationEvent::new(
                        "calibration_applied",
                        serde_json::json!({
                            "description": description,
                            "trial": trial,
                            "success": true,
                            "instructions": instructions,
                        }),
                    ));
                    return CalibrationOutcome {
                        description: description.to_string(),
                        report: SUCCESS_REPORT.to_string(),
                        success: true,
                    };
                }
                Err(e) => {
                    warn!("Calibration trial {} could not be applied: {}", trial, e);
                    errors.push(format!("trial #{}: {}", trial, e));
                }
            }
        }

        self.conversation_logger.log(ConversationEvent::new(
            "calibration_applied",
            serde_json::json!({
                "description": description,
                "trials": trials,
                "success": false,
                "errors": errors,
            }),
        ));

        let mut report = FAILURE_REPORT.to_string();
        for error in &errors {
            report.push('\n');
            report.push_str(error);
        }
        CalibrationOutcome {
            description: description.to_string(),
            report,
            success: false,
        }
    }
}
