//! Ask the model for commands and interpret the reply
//!
//! This is the boundary where transport failures stop: a timeout or HTTP
//! error is written to the debug trace and becomes an empty suggestion list,
//! the same as a reply with nothing extractable.

use crate::core::error::LlmshError;
use crate::extract::{self, Command, Tier};
use crate::llm::client::ChatClient;
use crate::llm::prompt::build_prompt;
use crate::llm::trace::DebugTrace;

/// Suggest up to roughly `count` commands for `query`
pub async fn suggest_commands(
    client: &ChatClient,
    trace: &DebugTrace,
    query: &str,
    count: u32,
) -> Vec<Command> {
    let prompt = build_prompt(count, query);

    trace.record(&format!("Query: {}", query));
    trace.record(&format!("URL: {}, Model: {}", client.base_url(), client.model()));

    let content = match client.complete(&prompt).await {
        Ok(Some(content)) => content,
        Ok(None) => {
            trace.record("Response had no content");
            return Vec::new();
        }
        Err(LlmshError::Timeout(after)) => {
            trace.record("Request timed out");
            tracing::debug!("Request timed out after {:?}", after);
            return Vec::new();
        }
        Err(e) => {
            trace.record(&format!("Request error: {}", e));
            tracing::debug!("Request failed: {}", e);
            return Vec::new();
        }
    };

    trace.record_with("Response content:", &content);

    let extraction = extract::extract(&content);
    if let Some(failure) = &extraction.decode_failure {
        trace.record(&format!("JSON parse failed ({}), trying line extraction", failure));
    }
    match extraction.tier {
        Tier::Structured | Tier::Heuristic => tracing::debug!(
            "Extracted {} commands via {:?} tier",
            extraction.commands.len(),
            extraction.tier
        ),
        Tier::None => tracing::debug!("No commands extracted"),
    }

    extraction.commands
}
