/// Parsing for backslash escape sequences
///
/// - Any ASCII punctuation preceded by backslash is treated literally
/// - Backslash-escaped newline = hard line break
/// - Does NOT work in verbatim contexts (code blocks, code spans)

fn is_escapable(ch: char) -> bool {
    ch.is_ascii_punctuation() || ch == '\n'
}

/// Try to parse a backslash escape sequence starting at the current position.
/// Returns (total_len, escaped_char, escape_type) or None if not an escape.
pub(crate) fn try_parse_escape(text: &str) -> Option<(usize, char, EscapeType)> {
    if !text.starts_with('\\') {
        return None;
    }

    let next_char = text[1..].chars().next()?;
    if !is_escapable(next_char) {
        return None;
    }

    let escape_type = match next_char {
        '\n' => EscapeType::HardLineBreak,
        _ => EscapeType::Literal,
    };

    Some((1 + next_char.len_utf8(), next_char, escape_type))
}

/// Replace every backslash escape of ASCII punctuation with the bare character.
pub(crate) fn unescape_all(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\'
            && let Some(&next) = chars.peek()
            && next.is_ascii_punctuation()
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum EscapeType {
    Literal,       // Regular escaped character like \*
    HardLineBreak, // \<newline>
}
