//! Port for structured transcript logging.
//!
//! Defines the [`ConversationLogger`] trait for recording workflow events
//! (decomposed and enriched plans, dispatch decisions, candidate attempts,
//! node results, calibration) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the run
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured workflow event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "plan_decomposed", "candidate_attempt").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging workflow events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures never
/// disrupt a run.
pub trait ConversationLogger: Send + Sync {
    /// Record an event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
