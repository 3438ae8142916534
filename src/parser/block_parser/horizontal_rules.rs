//! Horizontal rule parsing utilities.

use crate::token::Nesting;

use super::state::BlockState;
use super::utils::is_space;

/// A horizontal rule is 3 or more `*`, `-`, or `_` characters,
/// optionally separated by spaces.
pub(crate) fn horizontal_rule(
    state: &mut BlockState<'_>,
    start_line: usize,
    _end_line: usize,
    silent: bool,
) -> bool {
    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }

    let Some(rule_char) = try_parse_horizontal_rule(state.line_text(start_line)) else {
        return false;
    };

    if silent {
        return true;
    }

    let count = state
        .line_text(start_line)
        .bytes()
        .filter(|&b| b == rule_char)
        .count();

    state.line = start_line + 1;

    let token = state.push("hr", "hr", Nesting::SelfClosing);
    token.map = Some([start_line, start_line + 1]);
    token.markup = (rule_char as char).to_string().repeat(count);

    true
}

/// Returns the rule character if `line` is a valid horizontal rule.
fn try_parse_horizontal_rule(line: &str) -> Option<u8> {
    let bytes = line.as_bytes();
    let rule_char = *bytes.first()?;
    if !matches!(rule_char, b'*' | b'-' | b'_') {
        return None;
    }

    let mut count = 0;
    for &b in bytes {
        match b {
            b if b == rule_char => count += 1,
            b if is_space(b) => continue,
            _ => return None,
        }
    }

    if count >= 3 { Some(rule_char) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_rule() {
        assert_eq!(try_parse_horizontal_rule("- - -"), Some(b'-'));
    }

    #[test]
    fn test_too_short() {
        assert_eq!(try_parse_horizontal_rule("**"), None);
    }

    #[test]
    fn test_mixed_characters() {
        assert_eq!(try_parse_horizontal_rule("*-*"), None);
    }
}
