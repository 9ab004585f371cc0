//! services/api/src/adapters/lesson_llm.rs
//!
//! This module contains the adapter for the lesson-generating LLM.
//! It implements the `LessonGenerationService` port from the `core` crate by
//! calling Gemini through its OpenAI-compatible chat completions endpoint.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client, error::OpenAIError,
};
use async_trait::async_trait;
use lesson_planner_core::{
    domain::LessonRequest,
    ports::{LessonGenerationService, PortError, PortResult},
    prompt::LessonPrompt,
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `LessonGenerationService` using an OpenAI-compatible LLM.
///
/// Without a client every call fails, so the service can start before an API key
/// has been configured.
#[derive(Clone)]
pub struct GeminiLessonAdapter {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl GeminiLessonAdapter {
    /// Creates a new `GeminiLessonAdapter`.
    pub fn new(client: Option<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the client for `base_url`, or none when no API key is available.
    pub fn from_settings(api_key: Option<&str>, base_url: &str, model: String) -> Self {
        let client = api_key.map(|key| {
            Client::with_config(
                OpenAIConfig::new()
                    .with_api_key(key)
                    .with_api_base(base_url),
            )
        });
        Self::new(client, model)
    }
}

//=========================================================================================
// `LessonGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl LessonGenerationService for GeminiLessonAdapter {
    /// Generates the Markdown lesson plan and quiz for the request.
    async fn generate_lesson(&self, request: &LessonRequest) -> PortResult<String> {
        let client = self.client.as_ref().ok_or_else(|| {
            PortError::Unavailable(
                "API key is not configured on the server. Check your .env file.".to_string(),
            )
        })?;

        let prompt = LessonPrompt::build(request);
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.user)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("Lesson generation LLM returned no text content.".to_string())
            })?;

        if content.trim().is_empty() {
            return Err(PortError::Unexpected(
                "Lesson generation LLM returned an empty lesson.".to_string(),
            ));
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_planner_core::domain::Language;

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let adapter = GeminiLessonAdapter::from_settings(
            None,
            crate::config::DEFAULT_GEMINI_BASE_URL,
            "gemini-2.5-flash".to_string(),
        );
        let request = LessonRequest {
            topic: "Дроби".to_string(),
            level: "5".to_string(),
            duration_minutes: 45,
            language: Language::Russian,
        };
        let err = adapter.generate_lesson(&request).await.unwrap_err();
        assert!(matches!(err, PortError::Unavailable(message) if message.contains("API key")));
    }
}
