//! llmsh - Entry Point
//!
//! Takes one free-text task description, asks the configured model for
//! shell commands and prints them one per line. Exits with status 1 when
//! nothing could be suggested.

use clap::error::ErrorKind;
use clap::Parser;
use llmsh::core::config::ShellConfig;
use llmsh::core::error::Result;
use llmsh::llm::{suggest_commands, ChatClient, DebugTrace};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Suggest shell commands for a task using a chat model
#[derive(Parser, Debug)]
#[command(name = "llmsh")]
#[command(about = "Suggest shell commands for a task using an Ollama-compatible model")]
struct Args {
    /// What you want to do, in plain words
    query: String,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            eprintln!("Usage: llmsh <query>");
            return ExitCode::FAILURE;
        }
    };

    // Diagnostics go to stderr; stdout carries only commands
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LLMSH_LOG").unwrap_or_else(|_| EnvFilter::new("llmsh=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args.query) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("llmsh: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(query: &str) -> Result<ExitCode> {
    let config = ShellConfig::from_env()?;
    let client = ChatClient::from_config(&config)?;
    let trace = DebugTrace::open_or_disabled(&config.debug_log);

    // Create the async runtime for the single model call
    let rt = Runtime::new()?;
    let commands = rt.block_on(suggest_commands(&client, &trace, query, config.command_count));

    if commands.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    for command in &commands {
        println!("{}", command);
    }
    Ok(ExitCode::SUCCESS)
}
