//! Emphasis (*italic*, **bold**) using the CommonMark delimiter stack algorithm.
//!
//! The algorithm processes text in two phases:
//! 1. Scan phase: the inline scanner records every delimiter run and its
//!    open/close potential, one slot per delimiter character.
//! 2. Match phase: closers are processed left-to-right, matching openers
//!    found by walking back through the stack.
//!
//! Key rules from CommonMark spec:
//! - "Rule of 3s": If opener+closer lengths sum to multiple of 3 and both can open AND close,
//!   they don't match (prevents `***foo**` from matching as bold)
//! - Strong (2 delims) takes precedence over emphasis (1 delim) when possible
//! - Delimiters must match by character (* with *, _ with _)
//! - Underscores inside words don't open or close emphasis

/// A delimiter run in the delimiter stack. Positions are slot indices.
#[derive(Debug, Clone)]
pub(crate) struct Delimiter {
    pub char: char,            // * or _
    pub count: usize,          // remaining delimiter characters
    pub original_count: usize, // original count (for rule of 3s)
    pub start_pos: usize,      // slot of the first delimiter character
    pub can_open: bool,
    pub can_close: bool,
    pub active: bool, // false if this delimiter has been fully consumed
}

impl Delimiter {
    pub fn new(char: char, count: usize, start_pos: usize, flanking: (bool, bool)) -> Self {
        Self {
            char,
            count,
            original_count: count,
            start_pos,
            can_open: flanking.0,
            can_close: flanking.1,
            active: true,
        }
    }
}

/// A matched emphasis span, in slot indices.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EmphasisMatch {
    pub start: usize,         // first slot of the opening delimiter
    pub end: usize,           // slot after the closing delimiter
    pub content_start: usize, // first slot of the content
    pub content_end: usize,   // first slot of the closing delimiter
    pub level: u8,            // 1 = em, 2 = strong
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Determine if a delimiter run can open/close emphasis based on flanking rules.
pub(crate) fn analyze_delimiter_run(
    text: &str,
    run_start: usize,
    run_char: char,
    run_count: usize,
) -> (bool, bool) {
    let run_end = run_start + run_count;

    let char_before = text[..run_start].chars().last();
    let char_after = text[run_end..].chars().next();

    let followed_by_whitespace = char_after.is_none_or(char::is_whitespace);
    let followed_by_punctuation = char_after.is_some_and(is_punctuation);
    let preceded_by_whitespace = char_before.is_none_or(char::is_whitespace);
    let preceded_by_punctuation = char_before.is_some_and(is_punctuation);

    let left_flanking = !followed_by_whitespace
        && (!followed_by_punctuation || preceded_by_whitespace || preceded_by_punctuation);

    let right_flanking = !preceded_by_whitespace
        && (!preceded_by_punctuation || followed_by_whitespace || followed_by_punctuation);

    if run_char == '_' {
        let can_open = left_flanking && (!right_flanking || preceded_by_punctuation);
        let can_close = right_flanking && (!left_flanking || followed_by_punctuation);
        (can_open, can_close)
    } else {
        (left_flanking, right_flanking)
    }
}

/// Process the delimiter stack to find all emphasis matches.
/// Implements the CommonMark "process emphasis" algorithm.
pub(crate) fn process_emphasis(delimiters: &mut [Delimiter]) -> Vec<EmphasisMatch> {
    let mut matches = Vec::new();

    // Process each potential closer from left to right
    let mut closer_idx = 0;
    while closer_idx < delimiters.len() {
        if !delimiters[closer_idx].can_close
            || !delimiters[closer_idx].active
            || delimiters[closer_idx].count == 0
        {
            closer_idx += 1;
            continue;
        }

        let closer_char = delimiters[closer_idx].char;

        // Look backwards for a matching opener
        let mut opener_idx = None;
        for j in (0..closer_idx).rev() {
            let opener = &delimiters[j];
            if !opener.active || opener.count == 0 || !opener.can_open {
                continue;
            }
            if opener.char != closer_char {
                continue;
            }

            // Rule of 3s: if either delimiter can both open and close, the
            // sum of the run lengths must not be a multiple of 3 unless
            // both lengths are.
            let opener_orig = opener.original_count;
            let closer_orig = delimiters[closer_idx].original_count;
            let opener_both = opener.can_open && opener.can_close;
            let closer_both = delimiters[closer_idx].can_open && delimiters[closer_idx].can_close;

            if (opener_both || closer_both)
                && (opener_orig + closer_orig).is_multiple_of(3)
                && !(opener_orig.is_multiple_of(3) && closer_orig.is_multiple_of(3))
            {
                continue;
            }

            opener_idx = Some(j);
            break;
        }

        let Some(j) = opener_idx else {
            // No opener found, move to next potential closer
            closer_idx += 1;
            continue;
        };

        // Use 2 if both have >= 2, otherwise use 1
        let use_count = if delimiters[j].count >= 2 && delimiters[closer_idx].count >= 2 {
            2
        } else {
            1
        };

        // The used opener delims are the LAST `use_count` of the remaining opener;
        // the used closer delims are the FIRST `use_count` of the remaining closer.
        let opener_used_start = delimiters[j].start_pos + delimiters[j].count - use_count;
        let closer_remaining_start = delimiters[closer_idx].start_pos
            + (delimiters[closer_idx].original_count - delimiters[closer_idx].count);

        matches.push(EmphasisMatch {
            start: opener_used_start,
            end: closer_remaining_start + use_count,
            content_start: opener_used_start + use_count,
            content_end: closer_remaining_start,
            level: use_count as u8,
        });

        // Consume the delimiters
        delimiters[j].count -= use_count;
        delimiters[closer_idx].count -= use_count;

        // Deactivate any delimiters between opener and closer
        for delim in delimiters.iter_mut().take(closer_idx).skip(j + 1) {
            delim.active = false;
        }

        // A closer with delimiters left stays current.
        if delimiters[closer_idx].count == 0 {
            closer_idx += 1;
        }
    }

    // Sort matches by start position for proper nesting order
    matches.sort_by_key(|m| m.start);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build the delimiter stack for `text`, treating every byte as a slot.
    fn delimiters_for(text: &str) -> Vec<Delimiter> {
        let bytes = text.as_bytes();
        let mut delimiters = Vec::new();
        let mut pos = 0;
        while pos < bytes.len() {
            let ch = bytes[pos];
            if ch == b'*' || ch == b'_' {
                let start = pos;
                while pos < bytes.len() && bytes[pos] == ch {
                    pos += 1;
                }
                let count = pos - start;
                let flanking = analyze_delimiter_run(text, start, ch as char, count);
                delimiters.push(Delimiter::new(ch as char, count, start, flanking));
            } else {
                pos += 1;
            }
        }
        delimiters
    }

    fn parse(text: &str) -> Vec<EmphasisMatch> {
        process_emphasis(&mut delimiters_for(text))
    }

    // === Flanking rule tests ===

    #[test]
    fn test_asterisk_can_open() {
        let (can_open, _) = analyze_delimiter_run("*word", 0, '*', 1);
        assert!(can_open);
    }

    #[test]
    fn test_asterisk_can_close() {
        let (_, can_close) = analyze_delimiter_run("word*", 4, '*', 1);
        assert!(can_close);
    }

    #[test]
    fn test_asterisk_space_no_emphasis() {
        let (can_open, can_close) = analyze_delimiter_run("a * b", 2, '*', 1);
        assert!(!can_open);
        assert!(!can_close);
    }

    #[test]
    fn test_intraword_underscore() {
        let (can_open, can_close) = analyze_delimiter_run("snake_case", 5, '_', 1);
        assert!(!can_open);
        assert!(!can_close);
    }

    // === Matching tests ===

    #[test]
    fn test_strong() {
        let matches = parse("**Inline** content");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].level, 2);
        assert_eq!(matches[0].content_start, 2);
        assert_eq!(matches[0].content_end, 8);
    }

    #[test]
    fn test_nested_strong_in_emphasis() {
        let matches = parse("*foo **bar** baz*");
        assert_eq!(matches.len(), 2);
        assert_eq!((matches[0].start, matches[0].end, matches[0].level), (0, 17, 1));
        assert_eq!((matches[1].start, matches[1].end, matches[1].level), (5, 12, 2));
    }

    #[test]
    fn test_triple_delimiters() {
        let matches = parse("***foo***");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].level, 1);
        assert_eq!(matches[0].start, 0);
        assert_eq!(matches[1].level, 2);
        assert_eq!(matches[1].start, 1);
    }

    #[test]
    fn test_unbalanced_opener_leaves_literal() {
        let matches = parse("**foo*");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 1);
        assert_eq!(matches[0].level, 1);
    }

    #[test]
    fn test_mismatched_characters() {
        assert!(parse("*foo_").is_empty());
    }
}
