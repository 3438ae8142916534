//! Bullet and ordered list parsing.

use crate::token::Nesting;

use super::state::{BlockState, ParentType};
use super::utils::is_space;

/// Returns the offset just past a bullet marker (`-`, `+`, `*`).
fn skip_bullet_list_marker(state: &BlockState<'_>, line: usize) -> Option<usize> {
    let max = state.e_marks[line];
    let mut pos = state.content_start(line);

    let marker = state.byte(pos)?;
    if !matches!(marker, b'*' | b'-' | b'+') {
        return None;
    }
    pos += 1;

    if pos < max && !state.byte(pos).is_some_and(is_space) {
        // " -test " - is not a list item
        return None;
    }

    Some(pos)
}

/// Returns the offset just past an ordered marker (`1.` or `1)`).
fn skip_ordered_list_marker(state: &BlockState<'_>, line: usize) -> Option<usize> {
    let start = state.content_start(line);
    let max = state.e_marks[line];
    let mut pos = start;

    // List marker should have at least 2 chars (digit + dot)
    if pos + 1 >= max {
        return None;
    }

    if !state.byte(pos)?.is_ascii_digit() {
        return None;
    }
    pos += 1;

    loop {
        if pos >= max {
            return None;
        }
        let ch = state.byte(pos)?;
        pos += 1;

        if ch.is_ascii_digit() {
            // List marker should have no more than 9 digits
            if pos - start >= 10 {
                return None;
            }
            continue;
        }

        if ch == b')' || ch == b'.' {
            break;
        }
        return None;
    }

    if pos < max && !state.byte(pos).is_some_and(is_space) {
        // " 1.test " - is not a list item
        return None;
    }
    Some(pos)
}

/// Hide the paragraphs of a tight list so they render without `<p>`.
fn mark_tight_paragraphs(state: &mut BlockState<'_>, list_idx: usize) {
    let level = state.level + 2;
    let len = state.tokens.len().saturating_sub(2);
    let mut i = list_idx + 2;
    while i < len {
        if state.tokens[i].level == level && state.tokens[i].kind == "paragraph_open" {
            state.tokens[i + 2].hidden = true;
            state.tokens[i].hidden = true;
            i += 2;
        }
        i += 1;
    }
}

pub(crate) fn list(
    state: &mut BlockState<'_>,
    start_line: usize,
    end_line: usize,
    silent: bool,
) -> bool {
    let md = state.md;
    let mut next_line = start_line;
    let mut tight = true;

    // If it's indented more than 3 spaces, it should be a code block
    if state.s_count[next_line] - state.blk_indent >= 4 {
        return false;
    }

    // A sibling item of a parent list that sits 4+ columns into its
    // content is still a sibling, not a nested code block.
    if let Some(list_indent) = state.list_indent
        && state.s_count[next_line] - list_indent >= 4
        && state.s_count[next_line] < state.blk_indent
    {
        return false;
    }

    // Only lists starting with an item can interrupt a paragraph.
    let is_terminating_paragraph = silent
        && state.parent_type == ParentType::Paragraph
        && state.s_count[next_line] >= state.blk_indent;

    let is_ordered;
    let mut marker_value = 0u64;
    let mut pos_after_marker;

    if let Some(pos) = skip_ordered_list_marker(state, next_line) {
        is_ordered = true;
        pos_after_marker = pos;
        let start = state.content_start(next_line);
        marker_value = state.src[start..pos - 1].parse().unwrap_or(1);

        // An ordered list can only interrupt a paragraph when it starts at 1.
        if is_terminating_paragraph && marker_value != 1 {
            return false;
        }
    } else if let Some(pos) = skip_bullet_list_marker(state, next_line) {
        is_ordered = false;
        pos_after_marker = pos;
    } else {
        return false;
    }

    // An empty list item cannot interrupt a paragraph.
    if is_terminating_paragraph && state.skip_spaces(pos_after_marker) >= state.e_marks[next_line]
    {
        return false;
    }

    if silent {
        return true;
    }

    let marker_char = state.src.as_bytes()[pos_after_marker - 1];
    let markup = (marker_char as char).to_string();

    let list_idx = state.tokens.len();
    let list_open = if is_ordered {
        let token = state.push("ordered_list_open", "ol", Nesting::Opening);
        if marker_value != 1 {
            token.attr_push("start", marker_value.to_string());
        }
        token
    } else {
        state.push("bullet_list_open", "ul", Nesting::Opening)
    };
    list_open.markup = markup.clone();

    let mut prev_empty_end = false;
    let old_parent_type = state.parent_type;
    state.parent_type = ParentType::List;

    while next_line < end_line {
        let mut pos = pos_after_marker;
        let max = state.e_marks[next_line];

        let initial = state.s_count[next_line]
            + (pos_after_marker - state.content_start(next_line)) as isize;
        let mut offset = initial;

        while pos < max {
            match state.byte(pos) {
                Some(b'\t') => offset += 4 - (offset + state.bs_count[next_line]) % 4,
                Some(b' ') => offset += 1,
                _ => break,
            }
            pos += 1;
        }

        let content_start = pos;
        let mut indent_after_marker = if content_start >= max {
            // Trimming space in "-    \n  3" case, indent is 1 here
            1
        } else {
            offset - initial
        };

        // If we have more than 4 spaces, the indent is 1
        // (the rest is just indented code block)
        if indent_after_marker > 4 {
            indent_after_marker = 1;
        }

        // "  -  test"
        //  ^^^^^ - calculating total length of this thing
        let indent = initial + indent_after_marker;

        let item_idx = state.tokens.len();
        let item = state.push("list_item_open", "li", Nesting::Opening);
        item.markup = markup.clone();
        if is_ordered {
            let start = state.content_start(next_line);
            let info = state.src[start..pos_after_marker - 1].to_string();
            state.tokens[item_idx].info = info;
        }

        let old_tight = state.tight;
        let old_t_shift = state.t_shift[next_line];
        let old_s_count = state.s_count[next_line];
        let old_list_indent = state.list_indent;
        let old_blk_indent = state.blk_indent;

        state.list_indent = Some(state.blk_indent);
        state.blk_indent = indent;
        state.tight = true;
        state.t_shift[next_line] = content_start - state.b_marks[next_line];
        state.s_count[next_line] = offset;

        if content_start >= max && state.is_empty(next_line + 1) {
            // An empty first line followed by an empty line ends the item.
            state.line = (next_line + 2).min(end_line);
        } else {
            md.block.tokenize(state, next_line, end_line);
        }

        // If any list item is loose, the whole list is loose.
        if !state.tight || prev_empty_end {
            tight = false;
        }
        // An item ending in an empty line makes the next one loose.
        prev_empty_end = state.line > next_line + 1 && state.is_empty(state.line - 1);

        state.blk_indent = old_blk_indent;
        state.list_indent = old_list_indent;
        state.t_shift[next_line] = old_t_shift;
        state.s_count[next_line] = old_s_count;
        state.tight = old_tight;

        let close = state.push("list_item_close", "li", Nesting::Closing);
        close.markup = markup.clone();

        let item_start = next_line;
        next_line = state.line;
        state.tokens[item_idx].map = Some([item_start, next_line]);

        if next_line >= end_line {
            break;
        }

        // Try to check if list is terminated or continued.
        if state.s_count[next_line] < state.blk_indent {
            break;
        }

        // If it's indented more than 3 spaces, it should be a code block
        if state.s_count[next_line] - state.blk_indent >= 4 {
            break;
        }

        if md.block.terminates("list", state, next_line, end_line) {
            break;
        }

        // The next item must use the same kind of marker.
        let next_pos = if is_ordered {
            skip_ordered_list_marker(state, next_line)
        } else {
            skip_bullet_list_marker(state, next_line)
        };
        let Some(next_pos) = next_pos else {
            break;
        };
        pos_after_marker = next_pos;

        if state.src.as_bytes()[pos_after_marker - 1] != marker_char {
            break;
        }
    }

    let close_kind = if is_ordered {
        ("ordered_list_close", "ol")
    } else {
        ("bullet_list_close", "ul")
    };
    let close = state.push(close_kind.0, close_kind.1, Nesting::Closing);
    close.markup = markup;

    state.tokens[list_idx].map = Some([start_line, next_line]);
    state.line = next_line;
    state.parent_type = old_parent_type;

    if tight {
        mark_tight_paragraphs(state, list_idx);
    }

    log::debug!(
        "List lines {}..{} (tight: {})",
        start_line + 1,
        next_line,
        tight
    );

    true
}
