/// LLM Client: the single point of entry for all provider calls in the interviewer.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// All LLM interactions MUST go through this module (via `interview::gateway`).
///
/// Provider: Groq's OpenAI-compatible chat-completions endpoint. One request per call;
/// retrying is always left to the caller.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// Groq chat-completions endpoint, used unless `AI_API_URL` overrides it.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Model used when `AI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemma2-9b-it";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling parameters for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content of the first choice, if it is non-blank.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// The single LLM client used by the interview gateway.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: std::time::Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a single call to the chat-completions API and returns the full response.
    /// Timeouts surface as `LlmError::Http`.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        sampling: Sampling,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(llm_response)
    }

    /// Convenience method returning only the text of the first choice.
    pub async fn call_text(
        &self,
        prompt: &str,
        system: &str,
        sampling: Sampling,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, system, sampling).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Returns the slice from the first `{` to the last `}`, tolerating prose around the object.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let text = strip_json_fences(text);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_object_with_surrounding_prose() {
        let input = "Sure! Here is the question:\n{\"question_text\": \"x\"}\nGood luck.";
        assert_eq!(extract_json_object(input), Some("{\"question_text\": \"x\"}"));
    }

    #[test]
    fn test_extract_json_object_inside_fences() {
        let input = "```json\n{\"a\": {\"b\": 1}}\n```";
        assert_eq!(extract_json_object(input), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_json_object_missing() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_response_text_skips_blank_content() {
        let response: LlmResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "   "}}],
            "usage": null
        }))
        .unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_response_text_first_choice() {
        let response: LlmResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": " Welcome! "}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
        }))
        .unwrap();
        assert_eq!(response.text(), Some("Welcome!"));
    }
}
