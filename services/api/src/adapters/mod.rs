pub mod db;
pub mod file_store;
pub mod lesson_llm;

pub use db::PgKeyValueStore;
pub use file_store::FileKeyValueStore;
pub use lesson_llm::GeminiLessonAdapter;
