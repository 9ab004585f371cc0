//! crates/lesson_planner_core/src/commands.rs
//!
//! Discrete user commands and the dispatcher that applies them.
//!
//! `LessonPlanner` is built once at startup and shared by handle. Generation runs
//! without holding the archive lock; every archive command runs to completion
//! under the lock, so concurrent readers only ever see fully applied changes.

use std::sync::Arc;

use futures::lock::{Mutex, MutexGuard};
use tracing::{error, info};

use crate::analytics::FleetSummary;
use crate::archive::LessonArchive;
use crate::domain::{LessonMetrics, LessonRecord, LessonRequest, NewLesson};
use crate::error::{LessonError, LessonResult};
use crate::ports::LessonGenerationService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask the generator for a lesson plan and quiz. Nothing is saved.
    Generate(LessonRequest),
    /// Keep a generated lesson in the archive.
    Save(NewLesson),
    UpdateScores { index: usize, scores_text: String },
    /// `confirmed` must be true; the user has to approve every deletion.
    Delete { index: usize, confirmed: bool },
    Summarize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Generated { content: String },
    Saved { index: usize, record: LessonRecord },
    ScoresUpdated { index: usize, theme: String, metrics: LessonMetrics },
    Deleted { record: LessonRecord },
    Summary(FleetSummary),
}

pub struct LessonPlanner {
    archive: Mutex<LessonArchive>,
    generator: Arc<dyn LessonGenerationService>,
}

impl LessonPlanner {
    pub fn new(archive: LessonArchive, generator: Arc<dyn LessonGenerationService>) -> Self {
        Self {
            archive: Mutex::new(archive),
            generator,
        }
    }

    /// Read access to the archive for rendering.
    pub async fn archive(&self) -> MutexGuard<'_, LessonArchive> {
        self.archive.lock().await
    }

    pub async fn dispatch(&self, command: Command) -> LessonResult<Outcome> {
        match command {
            Command::Generate(request) => self.generate(request).await,
            Command::Save(lesson) => {
                if lesson.generated_content.trim().is_empty() {
                    return Err(LessonError::MissingContent);
                }
                let record = lesson.into_record_today();
                let mut archive = self.archive.lock().await;
                let index = archive.append(record.clone()).await?;
                info!(index, theme = %record.theme, "Lesson saved to archive");
                Ok(Outcome::Saved { index, record })
            }
            Command::UpdateScores { index, scores_text } => {
                let mut archive = self.archive.lock().await;
                let metrics = archive.update_scores(index, &scores_text).await?;
                let theme = archive.get(index)?.theme.clone();
                info!(
                    index,
                    average = metrics.average,
                    repeat_count = metrics.repeat_count,
                    "Lesson scores updated"
                );
                Ok(Outcome::ScoresUpdated {
                    index,
                    theme,
                    metrics,
                })
            }
            Command::Delete { index, confirmed } => {
                if !confirmed {
                    return Err(LessonError::ConfirmationRequired);
                }
                let mut archive = self.archive.lock().await;
                let record = archive.delete_at(index).await?;
                info!(index, theme = %record.theme, "Lesson deleted from archive");
                Ok(Outcome::Deleted { record })
            }
            Command::Summarize => Ok(Outcome::Summary(self.archive.lock().await.summary())),
        }
    }

    async fn generate(&self, request: LessonRequest) -> LessonResult<Outcome> {
        request.validate().map_err(LessonError::InvalidRequest)?;
        info!(
            topic = %request.topic,
            language = request.language.prompt_name(),
            "Generating lesson"
        );
        let content = self
            .generator
            .generate_lesson(&request)
            .await
            .map_err(|e| {
                error!("Lesson generation failed: {:?}", e);
                LessonError::GatewayFailure(e.to_string())
            })?;
        Ok(Outcome::Generated { content })
    }
}
