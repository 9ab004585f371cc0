//! crates/lesson_planner_core/src/export.rs
//!
//! Plain-text rendering of a generated lesson for download.

use std::sync::OnceLock;

use regex::Regex;

const HEADER_RULE: &str = "========================================";

struct Rules {
    bold: Regex,
    heading: Regex,
    bullet: Regex,
    blank_run: Regex,
}

fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| Rules {
        bold: Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"),
        heading: Regex::new(r"#{2,3}\s*").expect("heading pattern is valid"),
        bullet: Regex::new(r"(?m)^-").expect("bullet pattern is valid"),
        blank_run: Regex::new(r"\n\s*\n").expect("blank line pattern is valid"),
    })
}

/// Converts the generated Markdown into a plain-text document with a title header.
pub fn render_plain_text(theme: &str, markdown: &str) -> String {
    let rules = rules();
    let text = rules.bold.replace_all(markdown, "${1}");
    let text = rules.heading.replace_all(&text, "\n\n");
    let text = rules.bullet.replace_all(&text, "• ");
    let text = rules.blank_run.replace_all(&text, "\n\n");
    let text = text.replace("\n\n\n", "\n\n");

    format!("ПЛАН УРОКА И ТЕСТ: {theme}\n\n{HEADER_RULE}\n\n{}", text.trim())
}

/// Download file name: every character outside ASCII letters and digits becomes `_`.
pub fn file_name(theme: &str) -> String {
    let stem: String = theme
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}_LessonPlan_Test.doc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markdown_markers() {
        let markdown = "## Plan: **Fractions**\n\n\n\n### 1. Goals\n- add\n- subtract\n   - nested";
        let text = render_plain_text("Fractions", markdown);

        assert!(text.starts_with("ПЛАН УРОКА И ТЕСТ: Fractions\n\n=========="));
        assert!(text.contains("Plan: Fractions"));
        assert!(text.contains("1. Goals"));
        assert!(text.contains("•  add\n•  subtract"));
        assert!(text.contains("   - nested"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
        assert!(!text.contains("\n\n\n"));
    }

    #[test]
    fn file_name_replaces_non_ascii_alphanumerics() {
        assert_eq!(file_name("Unit 3: Ratios"), "Unit_3__Ratios_LessonPlan_Test.doc");
        assert_eq!(file_name("Дроби 5"), "______5_LessonPlan_Test.doc");
    }
}
