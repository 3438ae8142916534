//! Parsing for inline code spans (`code`)

/// Try to parse a code span starting at the current position.
/// Returns (total_len, code_content, backtick_count) if successful.
pub(crate) fn try_parse_code_span(text: &str) -> Option<(usize, &str, usize)> {
    // Count opening backticks
    let opening_backticks = text.bytes().take_while(|&b| b == b'`').count();
    if opening_backticks == 0 {
        return None;
    }

    let rest = &text[opening_backticks..];

    // Look for matching closing backticks
    let mut pos = 0;
    while pos < rest.len() {
        if rest[pos..].starts_with('`') {
            let closing_backticks = rest[pos..].bytes().take_while(|&b| b == b'`').count();

            if closing_backticks == opening_backticks {
                let code_content = &rest[..pos];
                let after_close = opening_backticks + pos + closing_backticks;
                return Some((after_close, code_content, opening_backticks));
            }
            // Skip these backticks and continue searching
            pos += closing_backticks;
        } else {
            pos += rest[pos..].chars().next()?.len_utf8();
        }
    }

    None
}

/// Line endings become spaces, and a single surrounding space is stripped
/// when both ends have one (unless the content is all spaces).
pub(crate) fn normalize_code_content(content: &str) -> String {
    let content = content.replace('\n', " ");
    let bytes = content.as_bytes();
    if bytes.len() >= 2
        && bytes[0] == b' '
        && bytes[bytes.len() - 1] == b' '
        && bytes.iter().any(|&b| b != b' ')
    {
        return content[1..content.len() - 1].to_string();
    }
    content
}
