//! crates/lesson_planner_core/src/prompt.rs
//!
//! Prompt construction for the lesson-and-quiz generator.

use crate::domain::LessonRequest;

/// Minutes reserved for the goals and homework stages of every lesson.
const FRAMING_MINUTES: u32 = 10;

const SYSTEM_TEMPLATE: &str = "Ты — высококвалифицированный виртуальный ассистент учителя. \
Твоя задача — сгенерировать полный, структурированный план урока и 10 тестовых заданий \
**строго с выбором одного ответа**. **Всегда используй только {language} язык**. \
Ответ должен быть единым блоком в формате Markdown, содержащим план урока и тест. **Не используй JSON**.";

const USER_TEMPLATE: &str = r#"На основе следующих данных:
- **Тема урока:** {topic}
- **Уровень/Класс:** {level}
- **Продолжительность (мин):** {duration}

Сгенерируй полный ответ в следующем четком формате Markdown:

---
## {title_prefix}: "{topic}"

### 1. Цели урока (5 минут)
[Сгенерируй 2-3 конкретных и измеримых цели]

### 2. Ход урока (Основной этап - {main_minutes} минут)
[Разбей урок на 3-4 логических этапа с указанием времени и активности]

### 3. Домашнее задание (5 минут)
[Предложи 1-2 творческих или практических задания]
---

## ✅ Автоматический Тест (10 вопросов с выбором ответа)

[Сгенерируй 10 вопросов в формате Markdown. Каждый вопрос должен иметь 4 варианта ответа и четко указанный правильный ответ в скобках.
Пример:
1. Первый вопрос?
   - Вариант 1
   - Вариант 2
   - Вариант 3
   - Вариант 4
   (Правильный ответ: Вариант X)]

---
"#;

/// The system instruction and user query sent to the text generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPrompt {
    pub system: String,
    pub user: String,
}

impl LessonPrompt {
    pub fn build(request: &LessonRequest) -> Self {
        let language = request.language;
        let system = SYSTEM_TEMPLATE.replace("{language}", language.prompt_name());
        let user = USER_TEMPLATE
            .replace("{topic}", request.topic.trim())
            .replace("{level}", request.level.trim())
            .replace("{duration}", &request.duration_minutes.to_string())
            .replace("{title_prefix}", language.lesson_title_prefix())
            .replace(
                "{main_minutes}",
                &request
                    .duration_minutes
                    .saturating_sub(FRAMING_MINUTES)
                    .to_string(),
            );
        Self { system, user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Language;

    fn request(language: Language, minutes: u32) -> LessonRequest {
        LessonRequest {
            topic: "Дроби".to_string(),
            level: "5 класс".to_string(),
            duration_minutes: minutes,
            language,
        }
    }

    #[test]
    fn russian_prompt_fills_every_placeholder() {
        let prompt = LessonPrompt::build(&request(Language::Russian, 45));
        assert!(prompt.system.contains("только Русский язык"));
        assert!(prompt.user.contains("## 📘 План урока: \"Дроби\""));
        assert!(prompt.user.contains("**Уровень/Класс:** 5 класс"));
        assert!(prompt.user.contains("(Основной этап - 35 минут)"));
        assert!(!prompt.user.contains('{'));
    }

    #[test]
    fn kazakh_prompt_uses_kazakh_title() {
        let prompt = LessonPrompt::build(&request(Language::Kazakh, 40));
        assert!(prompt.system.contains("только Казахский язык"));
        assert!(prompt.user.contains("📘 Сабақ жоспары"));
    }

    #[test]
    fn short_lessons_do_not_underflow() {
        let prompt = LessonPrompt::build(&request(Language::Russian, 5));
        assert!(prompt.user.contains("(Основной этап - 0 минут)"));
    }
}
