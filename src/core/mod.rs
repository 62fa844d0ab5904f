pub mod config;
pub mod error;

pub use config::ShellConfig;
pub use error::{LlmshError, Result};
