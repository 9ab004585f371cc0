//! crates/lesson_planner_core/src/metrics.rs
//!
//! Per-lesson score metrics.

use crate::domain::LessonMetrics;
use crate::scores::ScoreList;

/// Scores at or below this value mean the student needs to repeat the material.
pub const REPEAT_THRESHOLD: u8 = 49;

/// Computes the rounded average and repeat-needed count for one lesson.
pub fn compute_metrics(scores: &ScoreList) -> LessonMetrics {
    let scores = scores.as_slice();
    let count = scores.len() as u64;
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();

    // Integer round-half-up of sum / count.
    let average = (2 * sum + count) / (2 * count);
    let repeat_count = scores.iter().filter(|&&s| s <= REPEAT_THRESHOLD).count() as u32;

    LessonMetrics {
        average: average as u8,
        repeat_count,
    }
}
