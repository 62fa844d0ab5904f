//! Reply extraction pipeline
//!
//! Turns a model reply into commands:
//! raw text -> strip_fence -> decode_commands (structured) -> extract_lines (heuristic)
//!
//! A successful structured decode is final, even when it yields nothing.
//! The heuristic tier only runs when no commands object could be decoded.
//! Nothing here performs I/O or logs; callers log from the returned
//! [`Extraction`].

pub mod command;
pub mod fence;
pub mod heuristic;
pub mod structured;

pub use command::Command;
pub use fence::strip_fence;
pub use heuristic::extract_lines;
pub use structured::{decode_commands, locate_commands_object, DecodeFailure};

/// Which strategy produced an [`Extraction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// A `{"commands": [...]}` object was decoded
    Structured,
    /// Lines were scraped from prose
    Heuristic,
    /// Neither tier found anything
    None,
}

/// Result of running the pipeline over one reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub commands: Vec<Command>,
    pub tier: Tier,
    /// Set whenever the structured tier did not decode
    pub decode_failure: Option<DecodeFailure>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn into_strings(self) -> Vec<String> {
        self.commands.into_iter().map(Command::into_string).collect()
    }
}

/// Run the full cascade over a raw reply
pub fn extract(raw: &str) -> Extraction {
    let normalized = strip_fence(raw);

    match decode_commands(normalized) {
        Ok(commands) => Extraction {
            commands,
            tier: Tier::Structured,
            decode_failure: None,
        },
        Err(failure) => {
            let commands = extract_lines(normalized);
            let tier = if commands.is_empty() {
                Tier::None
            } else {
                Tier::Heuristic
            };
            Extraction {
                commands,
                tier,
                decode_failure: Some(failure),
            }
        }
    }
}

/// Commands from a raw reply, possibly none
pub fn extract_commands(raw: &str) -> Vec<Command> {
    extract(raw).commands
}
