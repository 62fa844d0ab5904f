//! Remove one outer Markdown code fence

const FENCE: &str = "```";

/// Return the trimmed body of the first fenced block, or `raw` unchanged
///
/// The block runs from the first fence marker to the next one, wherever it
/// is. An info string directly after the opening marker (` ```json `,
/// ` ```sh `) is dropped when it sits on its own line ahead of more
/// content; `json` is dropped even when the payload follows on the same
/// line.
pub fn strip_fence(raw: &str) -> &str {
    let Some(open) = raw.find(FENCE) else {
        return raw;
    };
    let after_open = &raw[open + FENCE.len()..];
    let Some(close) = after_open.find(FENCE) else {
        return raw;
    };

    let body = &after_open[..close];
    skip_info_string(body).trim()
}

fn skip_info_string(body: &str) -> &str {
    let tag_len = body
        .char_indices()
        .find(|(_, c)| !is_tag_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    if tag_len == 0 {
        return body;
    }

    let (tag, rest) = body.split_at(tag_len);
    if tag.eq_ignore_ascii_case("json") {
        return rest;
    }

    // A lone word with nothing after it is the payload, not a tag
    let after_tag = rest.trim_start_matches([' ', '\t']);
    let on_own_line = after_tag.starts_with('\n') || after_tag.starts_with("\r\n");
    if on_own_line && !rest.trim().is_empty() {
        rest
    } else {
        body
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '.')
}
