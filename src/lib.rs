//! llmsh - shell command suggestions from a chat model

pub mod core;
pub mod extract;
pub mod llm;

pub use extract::{extract, extract_commands, Command, Extraction, Tier};
