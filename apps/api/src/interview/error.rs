use thiserror::Error;

use crate::interview::gateway::GatewayTask;
use crate::interview::session::Phase;

/// Errors produced by session state operations and the interview controller.
///
/// Every variant leaves the caller's `Session` untouched: controller operations
/// work on a copy and only hand it back on success.
#[derive(Debug, Error, PartialEq)]
pub enum InterviewError {
    /// Bad setup; fatal at session creation.
    #[error("Invalid interview configuration: {0}")]
    Config(String),

    /// History is already full. Indicates a logic error in the caller.
    #[error("Interview history is full ({max_questions} questions)")]
    Capacity { max_questions: usize },

    #[error("Illegal phase transition from {from} to {to}")]
    IllegalTransition { from: Phase, to: Phase },

    #[error("Answer must not be empty")]
    EmptyAnswer,

    /// Transient upstream failure; the same step may be retried.
    #[error("AI gateway unavailable during {task}: {message}")]
    RetryableGateway { task: GatewayTask, message: String },

    /// Upstream content did not match the expected shape.
    #[error("AI gateway returned a malformed {task} response: {message}")]
    MalformedResponse { task: GatewayTask, message: String },
}

impl InterviewError {
    /// Whether the caller may reissue the same step and expect a different outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            InterviewError::RetryableGateway { .. } | InterviewError::MalformedResponse { .. }
        )
    }
}
