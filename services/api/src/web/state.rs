//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use lesson_planner_core::LessonPlanner;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<LessonPlanner>,
    pub config: Arc<Config>,
}
