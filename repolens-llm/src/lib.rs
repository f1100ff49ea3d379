//! Downstream summarizer client: sends an assembled context bundle to an
//! OpenAI-compatible chat-completions endpoint and parses the structured
//! JSON reply.

pub mod prompt;

use repolens_core::ContextBundle;
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f64 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is missing or empty")]
    MissingApiKey,

    #[error("LLM API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty reply from LLM")]
    EmptyReply,

    #[error("LLM reply is not the expected JSON shape: {0}")]
    MalformedReply(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Structured summarizer result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub structure: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

pub struct LlmClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    /// Build from environment: `OPENAI_API_KEY` (required),
    /// `OPENAI_BASE_URL` and `REPOLENS_MODEL` (optional overrides).
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(LlmError::MissingApiKey)?;
        let api_base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = std::env::var("REPOLENS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    /// Request a structured summary for one repository's context bundle.
    pub async fn summarize(
        &self,
        repo_name: &str,
        bundle: &ContextBundle,
    ) -> Result<RepoSummary, LlmError> {
        let user = prompt::user_prompt(bundle);
        tracing::info!(chars = user.chars().count(), model = %self.model, "requesting summary");

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt::system_prompt(repo_name)},
                {"role": "user", "content": user},
            ],
            "response_format": {"type": "json_object"},
            "temperature": TEMPERATURE,
        });

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, message });
        }

        let reply: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::MalformedReply(e.to_string()))?;
        parse_reply(reply)
    }
}

fn parse_reply(reply: ChatResponse) -> Result<RepoSummary, LlmError> {
    let content = reply
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(LlmError::EmptyReply)?;

    serde_json::from_str(&content).map_err(|e| LlmError::MalformedReply(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply() {
        let reply: ChatResponse = serde_json::from_str(
            r#"{
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "{\"summary\": \"A web framework\", \"technologies\": [\"Python\", \"FastAPI\"], \"structure\": \"src layout\"}"
                    }
                }]
            }"#,
        )
        .unwrap();
        let summary = parse_reply(reply).unwrap();
        assert_eq!(summary.summary, "A web framework");
        assert_eq!(summary.technologies, vec!["Python", "FastAPI"]);
        assert_eq!(summary.structure, "src layout");
    }

    #[test]
    fn test_parse_reply_missing_fields_default() {
        let reply: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "{\"summary\": \"only summary\"}"}}]}"#,
        )
        .unwrap();
        let summary = parse_reply(reply).unwrap();
        assert_eq!(summary.summary, "only summary");
        assert!(summary.technologies.is_empty());
        assert!(summary.structure.is_empty());
    }

    #[test]
    fn test_parse_reply_empty_is_error() {
        let reply: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": ""}}]}"#).unwrap();
        assert!(matches!(parse_reply(reply), Err(LlmError::EmptyReply)));

        let reply: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(parse_reply(reply), Err(LlmError::EmptyReply)));
    }

    #[test]
    fn test_parse_reply_non_json_content() {
        let reply: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "sorry, I cannot"}}]}"#,
        )
        .unwrap();
        assert!(matches!(parse_reply(reply), Err(LlmError::MalformedReply(_))));
    }
}
