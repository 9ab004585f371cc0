//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API server.

use lesson_planner_core::{
    FleetSummary, Language, LessonMetrics, LessonRecord, LessonRequest, NewLesson,
    ProblematicLesson,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Requests Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Form fields of the lesson generator.
#[derive(Deserialize, Debug, ToSchema)]
pub struct GenerateLessonRequest {
    pub theme: String,
    pub grade: String,
    /// Lesson length in minutes. Form inputs send it as a string, so both are accepted.
    #[serde(deserialize_with = "minutes_from_number_or_string")]
    #[schema(value_type = u32)]
    pub duration: u32,
    /// `Русский` (default) or `Казахский`.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub language: Option<Language>,
}

impl From<GenerateLessonRequest> for LessonRequest {
    fn from(req: GenerateLessonRequest) -> Self {
        LessonRequest {
            topic: req.theme,
            level: req.grade,
            duration_minutes: req.duration,
            language: req.language.unwrap_or_default(),
        }
    }
}

fn minutes_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Minutes {
        Number(u32),
        Text(String),
    }

    match Minutes::deserialize(deserializer)? {
        Minutes::Number(n) => Ok(n),
        Minutes::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| de::Error::custom(format!("'{}' is not a number of minutes", s))),
    }
}

/// A generated lesson the user wants to keep.
#[derive(Deserialize, Debug, ToSchema)]
pub struct SaveLessonRequest {
    pub theme: String,
    pub grade: String,
    pub generated_content: String,
}

impl From<SaveLessonRequest> for NewLesson {
    fn from(req: SaveLessonRequest) -> Self {
        NewLesson {
            theme: req.theme,
            grade: req.grade,
            generated_content: req.generated_content,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateScoresRequest {
    /// Free text such as `90, 85, 45, 100`.
    pub scores_text: String,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteLessonQuery {
    /// Must be `true`; the client asks the user before sending it.
    #[serde(default)]
    pub confirm: bool,
}

//=========================================================================================
// Responses Sent FROM the Server TO the Client (Browser)
//=========================================================================================

#[derive(Serialize, Debug, ToSchema)]
pub struct GenerateLessonResponse {
    pub success: bool,
    pub content: String,
    pub theme: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// One saved lesson as shown in the archive table.
#[derive(Serialize, Debug, ToSchema)]
pub struct LessonView {
    pub index: usize,
    pub date: String,
    pub theme: String,
    pub grade: String,
    pub generated_content: String,
    pub scores_text: String,
    /// Absent until a score list has been entered.
    pub average_score: Option<u8>,
    pub students_to_repeat: Option<u32>,
}

impl LessonView {
    pub fn new(index: usize, record: &LessonRecord) -> Self {
        Self {
            index,
            date: record.date.clone(),
            theme: record.theme.clone(),
            grade: record.grade.clone(),
            generated_content: record.generated_content.clone(),
            scores_text: record.scores_text.clone(),
            average_score: record.metrics.map(|m| m.average),
            students_to_repeat: record.metrics.map(|m| m.repeat_count),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SavedLessonResponse {
    pub index: usize,
    pub lesson: LessonView,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ScoresUpdatedResponse {
    pub index: usize,
    pub theme: String,
    pub average_score: u8,
    pub students_to_repeat: u32,
    pub message: String,
}

impl ScoresUpdatedResponse {
    pub fn new(index: usize, theme: String, metrics: LessonMetrics) -> Self {
        let message = format!(
            "Данные для урока \"{}\" обновлены. Средний балл: {}%. Нуждаются в повторении: {}.",
            theme, metrics.average, metrics.repeat_count
        );
        Self {
            index,
            theme,
            average_score: metrics.average,
            students_to_repeat: metrics.repeat_count,
            message,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct DeletedLessonResponse {
    pub lesson: LessonView,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ProblematicLessonView {
    pub index: usize,
    pub theme: String,
    pub date: String,
    pub students_to_repeat: u32,
}

impl From<&ProblematicLesson> for ProblematicLessonView {
    fn from(lesson: &ProblematicLesson) -> Self {
        Self {
            index: lesson.index,
            theme: lesson.theme.clone(),
            date: lesson.date.clone(),
            students_to_repeat: lesson.students_to_repeat,
        }
    }
}

/// Key figures of the analytics tab.
#[derive(Serialize, Debug, ToSchema)]
pub struct AnalyticsResponse {
    pub lesson_count: usize,
    pub overall_average: Option<f64>,
    /// One decimal place, or `N/A`.
    pub overall_average_display: String,
    pub most_problematic: Option<ProblematicLessonView>,
    /// Theme of the most problematic lesson, or `Нет данных`.
    pub most_problematic_label: String,
    pub has_any_repeaters: bool,
    pub lessons_awaiting_scores: usize,
    pub needs_score_entry: bool,
    pub advisory: Option<String>,
}

impl From<&FleetSummary> for AnalyticsResponse {
    fn from(summary: &FleetSummary) -> Self {
        Self {
            lesson_count: summary.lesson_count,
            overall_average: summary.overall_average,
            overall_average_display: summary.overall_average_display(),
            most_problematic: summary.most_problematic.as_ref().map(Into::into),
            most_problematic_label: summary.most_problematic_label().to_string(),
            has_any_repeaters: summary.has_any_repeaters,
            lessons_awaiting_scores: summary.lessons_awaiting_scores,
            needs_score_entry: summary.needs_score_entry,
            advisory: summary.advisory(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_accepts_form_strings_and_numbers() {
        let from_form: GenerateLessonRequest = serde_json::from_str(
            r#"{"theme":"Дроби","grade":"5","duration":"45","language":"Казахский"}"#,
        )
        .unwrap();
        assert_eq!(from_form.duration, 45);
        assert_eq!(from_form.language, Some(Language::Kazakh));

        let numeric: GenerateLessonRequest =
            serde_json::from_str(r#"{"theme":"Дроби","grade":"5","duration":40}"#).unwrap();
        let request = LessonRequest::from(numeric);
        assert_eq!(request.duration_minutes, 40);
        assert_eq!(request.language, Language::Russian);
    }

    #[test]
    fn non_numeric_duration_is_rejected() {
        let result: Result<GenerateLessonRequest, _> =
            serde_json::from_str(r#"{"theme":"t","grade":"5","duration":"soon"}"#);
        assert!(result.is_err());
    }
}
