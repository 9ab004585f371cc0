pub mod analytics;
pub mod archive;
pub mod commands;
pub mod domain;
pub mod error;
pub mod export;
pub mod memory;
pub mod metrics;
pub mod ports;
pub mod prompt;
pub mod scores;

pub use analytics::{aggregate, FleetSummary, ProblematicLesson, NO_DATA_LABEL};
pub use archive::{LessonArchive, DEFAULT_ARCHIVE_KEY};
pub use commands::{Command, LessonPlanner, Outcome};
pub use domain::{Language, LessonMetrics, LessonRecord, LessonRequest, NewLesson};
pub use error::{LessonError, LessonResult};
pub use memory::MemoryKeyValueStore;
pub use metrics::{compute_metrics, REPEAT_THRESHOLD};
pub use ports::{KeyValueStore, LessonGenerationService, PortError, PortResult};
pub use prompt::LessonPrompt;
pub use scores::{parse_scores, ScoreList};
