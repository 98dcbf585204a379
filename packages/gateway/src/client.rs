// ABOUTME: Completion client for the hosted chat-completions API
// ABOUTME: Handles request construction, authentication, and response decoding

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Response contained no choices")]
    EmptyResponse,
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Role of a conversation turn on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single role/text pair sent as conversation context
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Token and temperature settings for a completion call
#[derive(Debug, Clone, Copy)]
pub struct Sampling {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Sampling {
    /// Full document generation
    pub const GENERATION: Sampling = Sampling {
        max_tokens: 3000,
        temperature: 0.3,
    };

    /// Conversational refinement turns
    pub const REFINEMENT: Sampling = Sampling {
        max_tokens: 1500,
        temperature: 0.4,
    };

    /// Improvement suggestions
    pub const SUGGESTION: Sampling = Sampling {
        max_tokens: 1000,
        temperature: 0.3,
    };
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the hosted chat-completions endpoint
pub struct CompletionClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl CompletionClient {
    /// Create HTTP client with timeout configuration
    fn create_client() -> Client {
        Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    /// Creates a new completion client from the environment.
    /// API key comes from OPENAI_API_KEY; the model and endpoint can be
    /// overridden with DRAFTER_MODEL and DRAFTER_OPENAI_BASE_URL.
    pub fn from_env() -> Self {
        let api_key = env::var(drafter_config::OPENAI_API_KEY).ok();
        if api_key.is_none() {
            info!("OPENAI_API_KEY not set - completion calls will fail until configured");
        }

        let model =
            env::var(drafter_config::DRAFTER_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom completion model: {}", model);
        }

        let base_url = env::var(drafter_config::DRAFTER_OPENAI_BASE_URL)
            .unwrap_or_else(|_| OPENAI_API_URL.to_string());

        Self {
            client: Self::create_client(),
            api_key,
            model,
            base_url,
        }
    }

    /// Creates a new completion client with a specific API key
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            client: Self::create_client(),
            api_key: Some(api_key),
            model: DEFAULT_MODEL.to_string(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Override the endpoint URL (used by tests against a mock server)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Get the model used by this client
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether an API key was configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends a system prompt, prior conversation turns, and the user's message
    /// to the completion endpoint and returns the generated text verbatim.
    /// The caller bounds the history; nothing is trimmed here.
    pub async fn generate(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        user_message: &str,
        sampling: Sampling,
    ) -> GatewayResult<String> {
        let api_key = self.api_key.as_ref().ok_or(GatewayError::NoApiKey)?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatTurn::system(system_prompt));
        messages.extend(history.iter().cloned());
        messages.push(ChatTurn::user(user_message));

        let request = CompletionRequest {
            model: &self.model,
            messages: &messages,
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
        };

        info!(
            "Requesting completion: model={}, context={} messages",
            self.model,
            messages.len()
        );

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Completion request timed out");
                    GatewayError::Api("Request timed out. The completion service may be overloaded or unavailable.".to_string())
                } else if e.is_connect() {
                    error!("Failed to connect to completion endpoint: {}", e);
                    GatewayError::Api(format!("Connection failed: {}", e))
                } else {
                    error!("Completion request failed: {}", e);
                    GatewayError::RequestFailed(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Completion API error: {} - {}", status, error_text);
            return Err(GatewayError::Api(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .ok_or(GatewayError::EmptyResponse)?
            .message
            .content;

        Ok(text)
    }
}
