//! Structured run transcripts.
//!
//! Provides [`JsonlConversationLogger`], implementing the
//! [`ConversationLogger`](qforge_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
