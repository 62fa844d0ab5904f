//! Transport side: prompt, chat client, debug trace and the suggestion flow

pub mod client;
pub mod prompt;
pub mod suggest;
pub mod trace;

pub use client::{ApiFormat, ChatClient};
pub use prompt::build_prompt;
pub use suggest::suggest_commands;
pub use trace::DebugTrace;
