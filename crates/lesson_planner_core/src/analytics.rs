//! crates/lesson_planner_core/src/analytics.rs
//!
//! Fleet-wide aggregation over every saved lesson. The summary is always
//! recomputed from the full record list; nothing is cached between calls.

use serde::Serialize;

use crate::domain::LessonRecord;

/// Label shown in place of a theme when no lesson stands out.
pub const NO_DATA_LABEL: &str = "Нет данных";

/// The lesson with the most students needing to repeat the material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblematicLesson {
    /// Position of the lesson in the archive.
    pub index: usize,
    pub theme: String,
    pub date: String,
    pub students_to_repeat: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
    /// All saved lessons, with or without score data.
    pub lesson_count: usize,
    /// Mean of per-lesson averages over lessons with score data, to one decimal place.
    pub overall_average: Option<f64>,
    pub most_problematic: Option<ProblematicLesson>,
    pub has_any_repeaters: bool,
    /// Lessons that still have no score list.
    pub lessons_awaiting_scores: usize,
    pub needs_score_entry: bool,
}

impl FleetSummary {
    /// Theme of the most problematic lesson, or the "no data" label.
    pub fn most_problematic_label(&self) -> &str {
        self.most_problematic
            .as_ref()
            .map(|lesson| lesson.theme.as_str())
            .unwrap_or(NO_DATA_LABEL)
    }

    pub fn overall_average_display(&self) -> String {
        match self.overall_average {
            Some(avg) => format!("{:.1}", avg),
            None => "N/A".to_string(),
        }
    }

    /// Review recommendation, present only when some student needs to repeat.
    pub fn advisory(&self) -> Option<String> {
        if !self.has_any_repeaters {
            return None;
        }
        Some(format!(
            "Тема '{}' требует немедленного повторения.",
            self.most_problematic_label()
        ))
    }
}

/// Summarizes the whole archive.
pub fn aggregate(records: &[LessonRecord]) -> FleetSummary {
    let averages: Vec<f64> = records
        .iter()
        .filter_map(|r| r.metrics.map(|m| f64::from(m.average)))
        .collect();

    let overall_average = if averages.is_empty() {
        None
    } else {
        let mean = averages.iter().sum::<f64>() / averages.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    };

    // Strictly greater wins, so ties keep the leftmost lesson.
    let mut most_problematic: Option<(usize, &LessonRecord)> = None;
    for (index, record) in records.iter().enumerate() {
        let best = most_problematic.map(|(_, r)| r.students_to_repeat()).unwrap_or(0);
        if record.students_to_repeat() > best {
            most_problematic = Some((index, record));
        }
    }

    let lessons_awaiting_scores = records.iter().filter(|r| !r.has_scores()).count();

    FleetSummary {
        lesson_count: records.len(),
        overall_average,
        most_problematic: most_problematic.map(|(index, record)| ProblematicLesson {
            index,
            theme: record.theme.clone(),
            date: record.date.clone(),
            students_to_repeat: record.students_to_repeat(),
        }),
        has_any_repeaters: records.iter().any(|r| r.students_to_repeat() > 0),
        lessons_awaiting_scores,
        needs_score_entry: lessons_awaiting_scores > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LessonMetrics;

    fn lesson(theme: &str, metrics: Option<(u8, u32)>) -> LessonRecord {
        let mut record = LessonRecord::new("01.09.2024", theme, "5", "content");
        record.metrics = metrics.map(|(average, repeat_count)| LessonMetrics {
            average,
            repeat_count,
        });
        record
    }

    #[test]
    fn empty_archive() {
        let summary = aggregate(&[]);
        assert_eq!(summary.lesson_count, 0);
        assert_eq!(summary.overall_average, None);
        assert_eq!(summary.most_problematic, None);
        assert!(!summary.has_any_repeaters);
        assert!(!summary.needs_score_entry);
        assert_eq!(summary.most_problematic_label(), NO_DATA_LABEL);
        assert_eq!(summary.overall_average_display(), "N/A");
        assert_eq!(summary.advisory(), None);
    }

    #[test]
    fn ties_resolve_to_leftmost_lesson() {
        let records = vec![
            lesson("a", Some((90, 0))),
            lesson("b", Some((60, 3))),
            lesson("c", Some((55, 3))),
        ];
        let summary = aggregate(&records);
        let worst = summary.most_problematic.as_ref().unwrap();
        assert_eq!(worst.index, 1);
        assert_eq!(worst.theme, "b");
        assert_eq!(worst.students_to_repeat, 3);
        assert!(summary.has_any_repeaters);
        assert_eq!(
            summary.advisory().unwrap(),
            "Тема 'b' требует немедленного повторения."
        );
    }

    #[test]
    fn overall_average_skips_unscored_lessons_and_rounds_to_one_decimal() {
        let records = vec![
            lesson("a", Some((80, 1))),
            lesson("b", None),
            lesson("c", Some((71, 0))),
            lesson("d", Some((70, 0))),
        ];
        let summary = aggregate(&records);
        // (80 + 71 + 70) / 3 = 73.666...
        assert_eq!(summary.overall_average, Some(73.7));
        assert_eq!(summary.overall_average_display(), "73.7");
        assert_eq!(summary.lesson_count, 4);
        assert_eq!(summary.lessons_awaiting_scores, 1);
        assert!(summary.needs_score_entry);
    }

    #[test]
    fn all_zero_lesson_counts_as_score_data() {
        let records = vec![lesson("a", Some((0, 4))), lesson("b", Some((100, 0)))];
        let summary = aggregate(&records);
        assert_eq!(summary.overall_average, Some(50.0));
        assert_eq!(summary.most_problematic_label(), "a");
    }

    #[test]
    fn no_repeaters_means_no_problematic_lesson() {
        let records = vec![lesson("a", Some((95, 0))), lesson("b", None)];
        let summary = aggregate(&records);
        assert_eq!(summary.most_problematic, None);
        assert!(!summary.has_any_repeaters);
        assert_eq!(summary.most_problematic_label(), NO_DATA_LABEL);
        assert_eq!(summary.advisory(), None);
    }
}
