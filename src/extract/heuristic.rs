//! Best-effort command lines from prose
//!
//! Used when the reply carries no decodable commands object. Each line is
//! kept unless it looks like markup, JSON debris or a comment; list
//! numbering, bullets and inline-code quoting are peeled off.

use crate::extract::command::Command;
use nom::character::complete::{digit1, multispace0, one_of};
use nom::combinator::recognize;
use nom::{IResult, Parser};

/// Leading characters that mark a line as noise
const NOISE_PREFIXES: [&str; 7] = ["#", "{", "}", "[", "]", "\"", "//"];

/// Collect command-like lines from `text` in order
pub fn extract_lines(text: &str) -> Vec<Command> {
    text.lines().filter_map(command_from_line).collect()
}

fn command_from_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() || is_noise(line) {
        return None;
    }

    let line = strip_with(line, ordinal_prefix);
    let line = strip_with(line, bullet_prefix);
    let line = line.trim_matches(|c: char| matches!(c, '`' | '"' | '\'') || c.is_whitespace());

    Command::new(line)
}

fn is_noise(line: &str) -> bool {
    NOISE_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// `1.`, `12)` and the whitespace after them
fn ordinal_prefix(input: &str) -> IResult<&str, &str> {
    recognize((digit1, one_of(".)"), multispace0)).parse(input)
}

/// `-` or `*` and the whitespace after it
fn bullet_prefix(input: &str) -> IResult<&str, &str> {
    recognize((one_of("-*"), multispace0)).parse(input)
}

fn strip_with<'a>(line: &'a str, prefix: fn(&'a str) -> IResult<&'a str, &'a str>) -> &'a str {
    match prefix(line) {
        Ok((rest, _)) => rest,
        Err(_) => line,
    }
}
