//! Client for the external text-generation service used when the legal
//! assistant has no canned answer.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::Settings;
use crate::dto::{ChatMessage, ChatRole};

/// Instruction sent ahead of every forwarded conversation.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful legal assistant for LegalTrack, an Indian legal services platform. You help users understand legal procedures, IPC sections, and filing FIRs. Always provide accurate, helpful information and suggest consulting a lawyer for specific legal advice. Keep responses concise and informative.";

/// Relayed when the service answers without any text.
pub const EMPTY_COMPLETION: &str = "Sorry, I couldn't generate a response.";

#[derive(thiserror::Error, Debug)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(serde_json::Error),
    #[error("http error: {0}")]
    Http(u16),
}

/// Anything that can continue a conversation with free text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
    safety_settings: &'static [SafetySetting],
}

const SAFETY_SETTINGS: &[SafetySetting] = &[
    SafetySetting {
        category: "HARM_CATEGORY_HARASSMENT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_HATE_SPEECH",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_DANGEROUS_CONTENT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
];

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

fn build_request(conversation: &[ChatMessage]) -> GenerateRequest<'_> {
    let mut contents = Vec::with_capacity(conversation.len() + 1);
    contents.push(Content {
        role: "user",
        parts: vec![Part {
            text: SYSTEM_INSTRUCTION,
        }],
    });
    contents.extend(conversation.iter().map(|m| Content {
        role: match m.role {
            ChatRole::User => "user",
            ChatRole::Assistant | ChatRole::System => "model",
        },
        parts: vec![Part { text: &m.content }],
    }));
    GenerateRequest {
        contents,
        generation_config: GenerationConfig {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        },
        safety_settings: SAFETY_SETTINGS,
    }
}

/// `generateContent` client; the API key travels as the `key` query parameter.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Builds a client when an API key is configured, `None` otherwise.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>, CompletionError> {
        settings
            .completion_key()
            .map(|key| Self::new(&settings.gemini_endpoint, key, settings.http_timeout()))
            .transpose()
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, CompletionError> {
        let req = build_request(conversation);
        debug!(turns = conversation.len(), "\u{2192} completion request");

        let res = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                error!("network error to completion service: {e}");
                CompletionError::Network(e.to_string())
            })?;

        let status = res.status();
        let bytes = res
            .bytes()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;
        debug!(
            status = %status,
            "\u{2190} body = {}",
            String::from_utf8_lossy(&bytes[..bytes.len().min(1024)])
        );

        if !status.is_success() {
            error!(status = %status, "completion service returned an error");
            return Err(CompletionError::Http(status.as_u16()));
        }

        let parsed: GenerateResponse =
            serde_json::from_slice(&bytes).map_err(CompletionError::Parse)?;
        Ok(parsed
            .first_text()
            .unwrap_or_else(|| EMPTY_COMPLETION.to_string()))
    }
}
