//! crates/lesson_planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of the concrete storage backend and the hosted text-generation API.

use async_trait::async_trait;

use crate::domain::LessonRequest;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., filesystem, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A string-keyed store of serialized blobs.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> PortResult<Option<String>>;

    /// Replaces the value stored under `key`. Must be durable when it returns `Ok`.
    async fn set(&self, key: &str, value: &str) -> PortResult<()>;
}

#[async_trait]
pub trait LessonGenerationService: Send + Sync {
    /// Generates a Markdown lesson plan and quiz. The returned text is opaque to the core.
    async fn generate_lesson(&self, request: &LessonRequest) -> PortResult<String>;
}
