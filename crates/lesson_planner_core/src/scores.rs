//! crates/lesson_planner_core/src/scores.rs
//!
//! Parsing of free-text student score lists.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::LessonError;

/// Highest score a student can receive.
pub const MAX_SCORE: u8 = 100;

/// A non-empty list of scores, each in `0..=MAX_SCORE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreList(Vec<u8>);

impl ScoreList {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a list that passed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u8>> for ScoreList {
    type Error = LessonError;

    fn try_from(scores: Vec<u8>) -> Result<Self, Self::Error> {
        if scores.is_empty() || scores.iter().any(|&s| s > MAX_SCORE) {
            return Err(LessonError::InvalidScoreList);
        }
        Ok(Self(scores))
    }
}

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[,\s]+").expect("separator pattern is valid"))
}

fn leading_integer() -> &'static Regex {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    LEADING.get_or_init(|| Regex::new(r"^[+-]?\d+").expect("integer pattern is valid"))
}

/// Reads the integer a token starts with, so `85.5` is 85 and `12abc` is 12.
fn token_value(token: &str) -> Option<i64> {
    leading_integer()
        .find(token)
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Parses a comma and/or whitespace separated list of scores.
///
/// Each token counts by its leading integer. Tokens without one, or whose value
/// falls outside `0..=100`, are dropped without error. The order of the remaining scores is preserved. Fails with
/// `InvalidScoreList` when nothing usable remains.
pub fn parse_scores(text: &str) -> Result<ScoreList, LessonError> {
    let scores: Vec<u8> = separators()
        .split(text)
        .filter(|token| !token.is_empty())
        .filter_map(token_value)
        .filter(|n| (0..=i64::from(MAX_SCORE)).contains(n))
        .map(|n| n as u8)
        .collect();

    ScoreList::try_from(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_placeholder_example() {
        let scores = parse_scores("90, 85, 45, 100").unwrap();
        assert_eq!(scores.as_slice(), &[90, 85, 45, 100]);
    }

    #[test]
    fn empty_and_blank_input_is_rejected() {
        assert!(matches!(parse_scores(""), Err(LessonError::InvalidScoreList)));
        assert!(matches!(parse_scores(" ,, \n"), Err(LessonError::InvalidScoreList)));
    }

    #[test]
    fn drops_out_of_range_and_non_numeric_tokens_keeping_order() {
        let scores = parse_scores("101, abc 0 -5\t77,,x12 100").unwrap();
        assert_eq!(scores.as_slice(), &[0, 77, 100]);
    }

    #[test]
    fn tokens_count_by_their_leading_integer() {
        let scores = parse_scores("85.5, 12abc +40 150.2 7%").unwrap();
        assert_eq!(scores.as_slice(), &[85, 12, 40, 7]);
    }

    #[test]
    fn only_invalid_tokens_is_an_error() {
        assert!(matches!(
            parse_scores("abc, 150, -1"),
            Err(LessonError::InvalidScoreList)
        ));
    }

    #[test]
    fn leading_and_trailing_separators_are_ignored() {
        let scores = parse_scores(",  50 ,60,\n").unwrap();
        assert_eq!(scores.as_slice(), &[50, 60]);
    }

    #[test]
    fn try_from_rejects_empty_and_out_of_range() {
        assert!(ScoreList::try_from(vec![]).is_err());
        assert!(ScoreList::try_from(vec![50, 101]).is_err());
        assert_eq!(ScoreList::try_from(vec![49, 50]).unwrap().len(), 2);
    }
}
