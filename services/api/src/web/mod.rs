pub mod protocol;
pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible to the router.
pub use rest::{
    analytics_handler, delete_lesson_handler, export_lesson_handler, generate_lesson_handler,
    health_handler, list_lessons_handler, save_lesson_handler, update_scores_handler,
};
