//! crates/lesson_planner_core/src/domain.rs
//!
//! Defines the core data structures for the application: saved lessons, their
//! score metrics, and the parameters of a generation request.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Date format used for `LessonRecord::date` (matches the `ru-RU` locale).
pub const LESSON_DATE_FORMAT: &str = "%d.%m.%Y";

/// Score metrics computed for one lesson from its list of student scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonMetrics {
    /// Mean score rounded half-up, in `0..=100`.
    pub average: u8,
    /// Number of students at or below the repeat threshold.
    pub repeat_count: u32,
}

/// A saved lesson with its generated content and any recorded score data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRecord {
    pub date: String,
    pub theme: String,
    pub grade: String,
    pub generated_content: String,
    /// Raw score text exactly as the teacher entered it. Empty until scores are entered.
    #[serde(default)]
    pub scores_text: String,
    /// `None` until a valid score list has been entered.
    #[serde(default)]
    pub metrics: Option<LessonMetrics>,
}

impl LessonRecord {
    /// Creates a record with no score data.
    pub fn new(
        date: impl Into<String>,
        theme: impl Into<String>,
        grade: impl Into<String>,
        generated_content: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            theme: theme.into(),
            grade: grade.into(),
            generated_content: generated_content.into(),
            scores_text: String::new(),
            metrics: None,
        }
    }

    pub fn has_scores(&self) -> bool {
        self.metrics.is_some()
    }

    /// Average score, or `0` when no score data has been entered.
    pub fn average_score(&self) -> u8 {
        self.metrics.map(|m| m.average).unwrap_or(0)
    }

    /// Repeat-needed student count, or `0` when no score data has been entered.
    pub fn students_to_repeat(&self) -> u32 {
        self.metrics.map(|m| m.repeat_count).unwrap_or(0)
    }
}

/// A freshly generated lesson the user has chosen to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLesson {
    pub theme: String,
    pub grade: String,
    pub generated_content: String,
}

impl NewLesson {
    /// Stamps the lesson with the given calendar date.
    pub fn into_record(self, date: NaiveDate) -> LessonRecord {
        LessonRecord::new(
            date.format(LESSON_DATE_FORMAT).to_string(),
            self.theme,
            self.grade,
            self.generated_content,
        )
    }

    /// Stamps the lesson with today's local date.
    pub fn into_record_today(self) -> LessonRecord {
        self.into_record(Local::now().date_naive())
    }
}

/// Output language of a generated lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Language {
    #[default]
    #[serde(rename = "Русский")]
    Russian,
    #[serde(rename = "Казахский")]
    Kazakh,
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Language::from_label(&label))
    }
}

impl Language {
    /// Maps a form value onto a language. Anything that does not name Kazakh is Russian.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "казахский" | "kk" | "kazakh" => Language::Kazakh,
            _ => Language::Russian,
        }
    }

    /// Name of the language as written in the prompt.
    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::Russian => "Русский",
            Language::Kazakh => "Казахский",
        }
    }

    /// Heading prefix used for the lesson plan title.
    pub fn lesson_title_prefix(self) -> &'static str {
        match self {
            Language::Russian => "📘 План урока",
            Language::Kazakh => "📘 Сабақ жоспары",
        }
    }
}

/// Parameters for one lesson-and-quiz generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRequest {
    pub topic: String,
    pub level: String,
    pub duration_minutes: u32,
    pub language: Language,
}

/// Longest lesson the generator will be asked to plan.
pub const MAX_LESSON_MINUTES: u32 = 600;

impl LessonRequest {
    /// Rejects requests that should never reach the generator.
    pub fn validate(&self) -> Result<(), String> {
        if self.topic.trim().is_empty() {
            return Err("lesson topic must not be empty".to_string());
        }
        if self.level.trim().is_empty() {
            return Err("lesson level must not be empty".to_string());
        }
        if self.duration_minutes == 0 || self.duration_minutes > MAX_LESSON_MINUTES {
            return Err(format!(
                "lesson duration must be between 1 and {} minutes, got {}",
                MAX_LESSON_MINUTES, self.duration_minutes
            ));
        }
        Ok(())
    }
}
