//! Marker run detection for opening and closing fences.
//!
//! A marker may be several bytes long (`+-`, `…`); the line is compared
//! against it cyclically and only whole repeats count.

/// Fewest marker repeats that form a fence.
pub const MIN_MARKER_NUM: usize = 3;

/// A recognised opening fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceMatch<'s> {
    /// The marker run, e.g. `:::`.
    pub markup: &'s str,
    /// Everything after the marker run, unmodified.
    pub params: &'s str,
    /// Number of whole marker repeats.
    pub count: usize,
}

/// Number of leading bytes of `line` that follow the cyclic marker pattern.
fn cyclic_prefix_len(line: &[u8], marker: &[u8]) -> usize {
    let mut pos = 0;
    while pos < line.len() && line[pos] == marker[pos % marker.len()] {
        pos += 1;
    }
    pos
}

/// Match an opening fence at the start of `line` (text after indentation).
pub fn match_fence<'s>(line: &'s str, marker: &str) -> Option<FenceMatch<'s>> {
    let marker = marker.as_bytes();
    let first = *marker.first()?;
    if line.as_bytes().first() != Some(&first) {
        return None;
    }

    let count = cyclic_prefix_len(line.as_bytes(), marker) / marker.len();
    if count < MIN_MARKER_NUM {
        return None;
    }

    let boundary = count * marker.len();
    Some(FenceMatch {
        markup: &line[..boundary],
        params: &line[boundary..],
        count,
    })
}

/// Match a closing fence of at least `min_count` repeats followed only by
/// spaces or tabs. Returns the marker run.
pub fn match_closing_fence<'s>(line: &'s str, marker: &str, min_count: usize) -> Option<&'s str> {
    let bytes = marker.as_bytes();
    let first = *bytes.first()?;
    if line.as_bytes().first() != Some(&first) {
        return None;
    }

    let count = cyclic_prefix_len(line.as_bytes(), bytes) / bytes.len();
    if count < min_count {
        return None;
    }

    let boundary = count * bytes.len();
    if !line[boundary..].bytes().all(|b| b == b' ' || b == b'\t') {
        return None;
    }
    Some(&line[..boundary])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_colons_open() {
        let m = match_fence("::: warning", ":").unwrap();
        assert_eq!(m.markup, ":::");
        assert_eq!(m.params, " warning");
        assert_eq!(m.count, 3);
    }

    #[test]
    fn two_colons_do_not_open() {
        assert_eq!(match_fence(":: warning", ":"), None);
    }

    #[test]
    fn long_run_counts_every_repeat() {
        assert_eq!(match_fence("::::::", ":").map(|m| m.count), Some(6));
    }

    #[test]
    fn first_byte_filter() {
        assert_eq!(match_fence("foo :::", ":"), None);
        assert_eq!(match_fence("", ":"), None);
    }

    #[test]
    fn multi_char_marker_excludes_partial_repeat() {
        let m = match_fence("+-+-+-+ name", "+-").unwrap();
        assert_eq!(m.count, 3);
        assert_eq!(m.markup, "+-+-+-");
        assert_eq!(m.params, "+ name");
    }

    #[test]
    fn multi_char_marker_needs_three_whole_repeats() {
        assert_eq!(match_fence("+-+-+ name", "+-"), None);
    }

    #[test]
    fn multi_byte_marker() {
        let m = match_fence("……… aside", "…").unwrap();
        assert_eq!(m.count, 3);
        assert_eq!(m.markup, "………");
        assert_eq!(m.params, " aside");
    }

    #[test]
    fn closing_requires_opening_count() {
        assert_eq!(match_closing_fence(":::", ":", 4), None);
        assert_eq!(match_closing_fence("::::", ":", 4), Some("::::"));
        assert_eq!(match_closing_fence(":::::", ":", 4), Some(":::::"));
    }

    #[test]
    fn closing_allows_trailing_whitespace_only() {
        assert_eq!(match_closing_fence(":::  \t", ":", 3), Some(":::"));
        assert_eq!(match_closing_fence("::: name", ":", 3), None);
    }

    #[test]
    fn closing_rejects_partial_trailing_repeat() {
        assert_eq!(match_closing_fence("+-+-+-+", "+-", 3), None);
        assert_eq!(match_closing_fence("+-+-+-", "+-", 3), Some("+-+-+-"));
    }
}
