//! crates/lesson_planner_core/src/error.rs
//!
//! The error type returned by the lesson archive and command dispatcher.

use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    /// The score text contained no integer in `0..=100`.
    #[error("Enter a valid list of scores (numbers from 0 to 100 separated by commas or spaces)")]
    InvalidScoreList,

    #[error("No lesson at position {index} (archive holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The text-generation service failed; the message is shown to the user as-is.
    #[error("Lesson generation failed: {0}")]
    GatewayFailure(String),

    #[error("Invalid lesson request: {0}")]
    InvalidRequest(String),

    #[error("There is no generated content to save")]
    MissingContent,

    #[error("Deleting a lesson requires confirmation")]
    ConfirmationRequired,

    /// Persisting the archive failed; the in-memory archive was left unchanged.
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

pub type LessonResult<T> = Result<T, LessonError>;
