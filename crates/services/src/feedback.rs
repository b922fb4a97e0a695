use std::env;

use async_trait::async_trait;
use prep_core::model::Difficulty;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

/// Environment variable holding the API credential. Its absence disables
/// feedback without error.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const SYSTEM_PROMPT: &str = "You are an honest, constructive interview coach.";

#[derive(Clone, Debug)]
pub struct FeedbackConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl FeedbackConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var(API_KEY_ENV).ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("PREP_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// What the coach is asked to critique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub question_text: String,
    pub skill_name: String,
    pub difficulty: Difficulty,
    pub notes: String,
}

impl FeedbackRequest {
    /// The user message sent to the model.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "You are a senior interview coach. A candidate is practicing an interview question.\n\n\
             Question:\n{question}\n\n\
             Skill area: {skill}\n\
             Difficulty: {difficulty}\n\n\
             Candidate's rough answer / notes:\n{notes}\n\n\
             Give concise, helpful feedback:\n\
             - Point out strengths.\n\
             - Point out specific gaps or mistakes.\n\
             - Suggest how to structure a stronger answer.\n\
             - End with a suggested score from 1-10.\n",
            question = self.question_text,
            skill = self.skill_name,
            difficulty = self.difficulty,
            notes = self.notes,
        )
    }
}

/// External text-generation integration that critiques a candidate's answer.
///
/// One request per call: no retries, no caching, no timeout beyond the
/// transport default.
#[async_trait]
pub trait FeedbackGateway: Send + Sync {
    fn is_configured(&self) -> bool;

    /// # Errors
    ///
    /// Returns `FeedbackError` when the gateway is not configured, the request
    /// fails, or the response cannot be read.
    async fn critique(&self, request: &FeedbackRequest) -> Result<String, FeedbackError>;
}

/// Gateway used when no credential is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledFeedbackGateway;

#[async_trait]
impl FeedbackGateway for DisabledFeedbackGateway {
    fn is_configured(&self) -> bool {
        false
    }

    async fn critique(&self, _request: &FeedbackRequest) -> Result<String, FeedbackError> {
        Err(FeedbackError::NotConfigured)
    }
}

/// OpenAI-compatible chat-completions client.
#[derive(Clone)]
pub struct OpenAiFeedbackGateway {
    client: Client,
    config: Option<FeedbackConfig>,
}

impl OpenAiFeedbackGateway {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(FeedbackConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<FeedbackConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl FeedbackGateway for OpenAiFeedbackGateway {
    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn critique(&self, request: &FeedbackRequest) -> Result<String, FeedbackError> {
        let config = self.config.as_ref().ok_or(FeedbackError::NotConfigured)?;

        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt(),
                },
            ],
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FeedbackError::HttpStatus { status, body });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| FeedbackError::MalformedResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| FeedbackError::MalformedResponse("no choices returned".into()))?
            .message
            .content
            .ok_or_else(|| FeedbackError::MalformedResponse("choice has no content".into()))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
