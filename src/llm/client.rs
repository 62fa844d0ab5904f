//! Async chat client for command suggestions
//!
//! Talks to Ollama's `/api/chat` by default and to OpenAI-compatible
//! `/v1/chat/completions` endpoints when the URL says so. The client only
//! fetches the reply text; interpreting it is the extraction pipeline's job.

use crate::core::config::ShellConfig;
use crate::core::error::{LlmshError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Ollama,
    OpenAI,
}

/// Async chat client for one configured endpoint
pub struct ChatClient {
    client: Client,
    base_url: String,
    model: String,
    token: Option<String>,
    timeout: Duration,
    api_format: ApiFormat,
}

impl ChatClient {
    /// Create a new chat client with explicit configuration
    pub fn new(
        base_url: String,
        model: String,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let api_format = Self::detect_api_format(&base_url);
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            token,
            timeout,
            api_format,
        })
    }

    /// Create a client from a loaded [`ShellConfig`]
    pub fn from_config(config: &ShellConfig) -> Result<Self> {
        Self::new(
            config.url.clone(),
            config.model.clone(),
            config.token.clone(),
            config.timeout,
        )
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("/v1") {
            ApiFormat::OpenAI
        } else {
            // Plain host URLs are Ollama instances
            ApiFormat::Ollama
        }
    }

    pub fn api_format(&self) -> ApiFormat {
        self.api_format
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL the request is posted to
    pub fn endpoint(&self) -> String {
        match self.api_format {
            ApiFormat::Ollama => format!("{}/api/chat", self.base_url),
            ApiFormat::OpenAI if self.base_url.ends_with("/chat/completions") => {
                self.base_url.clone()
            }
            ApiFormat::OpenAI => format!("{}/chat/completions", self.base_url),
        }
    }

    /// Send a single user message and return the reply content
    ///
    /// `Ok(None)` means the endpoint answered but carried no content.
    pub async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        let messages = vec![Message {
            role: "user".into(),
            content: prompt.into(),
        }];

        let mut request = self.client.post(self.endpoint());
        request = match self.api_format {
            ApiFormat::Ollama => request.json(&OllamaRequest {
                model: &self.model,
                messages,
                stream: false,
            }),
            ApiFormat::OpenAI => request.json(&OpenAIRequest {
                model: &self.model,
                messages,
            }),
        };
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmshError::Llm(format!("API error {}: {}", status, error_text)));
        }

        let body = response.text().await.map_err(|e| self.map_transport(e))?;
        let content = match self.api_format {
            ApiFormat::Ollama => {
                let reply: OllamaResponse = serde_json::from_str(&body)?;
                reply.message.and_then(|m| m.content)
            }
            ApiFormat::OpenAI => {
                let reply: OpenAIResponse = serde_json::from_str(&body)?;
                reply
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|c| c.message)
                    .and_then(|m| m.content)
            }
        };

        Ok(content.filter(|c| !c.is_empty()))
    }

    fn map_transport(&self, err: reqwest::Error) -> LlmshError {
        if err.is_timeout() {
            LlmshError::Timeout(self.timeout)
        } else {
            LlmshError::Http(err)
        }
    }
}

// Ollama API format
#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    message: Option<ReplyMessage>,
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ReplyMessage>,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}
