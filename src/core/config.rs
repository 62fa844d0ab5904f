//! Shell assistant configuration read from the environment
//!
//! Every value here is consumed by the transport side (client, prompt,
//! debug trace). The extraction pipeline takes no configuration.

use crate::core::error::{LlmshError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default endpoint: a local Ollama instance
pub const DEFAULT_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3";
pub const DEFAULT_COMMAND_COUNT: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DEBUG_LOG: &str = "/tmp/llmsh_debug.log";

/// Configuration for one `llmsh` invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    /// Base URL of the chat endpoint
    pub url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer token for remote instances
    pub token: Option<String>,
    /// How many commands the prompt asks for.
    ///
    /// This is a hint to the model only; replies with more or fewer
    /// commands are passed through as they are.
    pub command_count: u32,
    /// Upper bound for the whole HTTP request
    pub timeout: Duration,
    /// Where the debug trace is appended
    pub debug_log: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            model: DEFAULT_MODEL.into(),
            token: None,
            command_count: DEFAULT_COMMAND_COUNT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug_log: PathBuf::from(DEFAULT_DEBUG_LOG),
        }
    }
}

impl ShellConfig {
    /// Create a config from environment variables
    ///
    /// Optional: LLMSH_URL, LLMSH_MODEL, LLMSH_TOKEN, LLMSH_COMMAND_COUNT,
    /// LLMSH_TIMEOUT (seconds), LLMSH_DEBUG_LOG
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let url = lookup("LLMSH_URL").unwrap_or(defaults.url);
        let model = lookup("LLMSH_MODEL").unwrap_or(defaults.model);
        // An exported-but-empty token means "no auth"
        let token = lookup("LLMSH_TOKEN").filter(|t| !t.trim().is_empty());

        let command_count = match lookup("LLMSH_COMMAND_COUNT") {
            Some(raw) => parse_number::<u32>("LLMSH_COMMAND_COUNT", &raw)?,
            None => defaults.command_count,
        };
        let timeout = match lookup("LLMSH_TIMEOUT") {
            Some(raw) => Duration::from_secs(parse_number::<u64>("LLMSH_TIMEOUT", &raw)?),
            None => defaults.timeout,
        };
        let debug_log = lookup("LLMSH_DEBUG_LOG")
            .map(PathBuf::from)
            .unwrap_or(defaults.debug_log);

        let config = Self {
            url,
            model,
            token,
            command_count,
            timeout,
            debug_log,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(LlmshError::Config("LLMSH_URL must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(LlmshError::Config("LLMSH_MODEL must not be empty".into()));
        }
        if self.command_count == 0 {
            return Err(LlmshError::Config(
                "LLMSH_COMMAND_COUNT must be at least 1".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(LlmshError::Config("LLMSH_TIMEOUT must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| LlmshError::Config(format!("{} is not a valid number: {:?}", key, raw)))
}
