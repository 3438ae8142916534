//! Shared utilities for block parsing.

/// Spaces and tabs; the only characters that count as indentation.
pub(crate) fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Expand tabs to columns (tab stop = 4) and return (cols, byte_offset).
pub(crate) fn leading_indent(line: &str) -> (usize, usize) {
    let mut cols = 0usize;
    let mut bytes = 0usize;
    for b in line.bytes() {
        match b {
            b' ' => {
                cols += 1;
                bytes += 1;
            }
            b'\t' => {
                cols += 4 - (cols % 4);
                bytes += 1;
            }
            _ => break,
        }
    }
    (cols, bytes)
}

/// Byte ranges `(start, end)` of every line in `input`, excluding the `\n`.
///
/// A trailing newline does not produce an extra empty line.
pub(crate) fn line_ranges(input: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < input.len() {
        let end = input[start..]
            .find('\n')
            .map_or(input.len(), |offset| start + offset);
        ranges.push((start, end));
        start = end + 1;
    }
    ranges
}

/// Normalize line endings and replace NUL characters, as required before
/// building line caches.
pub(crate) fn normalize_input(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\0', "\u{FFFD}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_indent_spaces() {
        assert_eq!(leading_indent("   foo"), (3, 3));
    }

    #[test]
    fn test_leading_indent_tab_stops() {
        assert_eq!(leading_indent("  \tfoo"), (4, 3));
        assert_eq!(leading_indent("\t\tfoo"), (8, 2));
    }

    #[test]
    fn test_line_ranges_trailing_newline() {
        assert_eq!(line_ranges("a\nbc\n"), vec![(0, 1), (2, 4)]);
    }

    #[test]
    fn test_line_ranges_no_trailing_newline() {
        assert_eq!(line_ranges("a\n\nbc"), vec![(0, 1), (2, 2), (3, 5)]);
    }

    #[test]
    fn test_normalize_crlf() {
        assert_eq!(normalize_input("a\r\nb\rc\0"), "a\nb\nc\u{FFFD}");
    }
}
