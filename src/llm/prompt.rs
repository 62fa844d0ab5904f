//! Prompt sent to the model

/// Build the user prompt asking for `count` commands for `query`
pub fn build_prompt(count: u32, query: &str) -> String {
    format!(
        r#"Generate {count} shell commands for this task: {query}

Return ONLY a JSON object with a "commands" key containing a list of command strings.
No explanations, no markdown, just valid JSON.

Example response:
{{"commands": ["ls -la", "find . -type f", "du -sh *"]}}"#
    )
}
