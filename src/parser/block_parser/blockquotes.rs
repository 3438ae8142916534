//! Blockquote parsing.
//!
//! The line caches are rewritten in place so that every quoted line looks
//! like ordinary content starting after its `>` marker, the interior is
//! tokenized recursively, and the caches are put back afterwards.

use crate::token::Nesting;

use super::state::{BlockState, ParentType};

/// Saved line cache entries for one rewritten line.
struct SavedLine {
    b_mark: usize,
    bs_count: isize,
    s_count: isize,
    t_shift: usize,
}

impl SavedLine {
    fn take(state: &BlockState<'_>, line: usize) -> Self {
        Self {
            b_mark: state.b_marks[line],
            bs_count: state.bs_count[line],
            s_count: state.s_count[line],
            t_shift: state.t_shift[line],
        }
    }
}

pub(crate) fn blockquote(
    state: &mut BlockState<'_>,
    start_line: usize,
    end_line: usize,
    silent: bool,
) -> bool {
    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }

    if state.byte(state.content_start(start_line)) != Some(b'>') {
        return false;
    }

    // Lazy continuation makes the extent unknowable without parsing.
    if silent {
        return true;
    }

    let md = state.md;
    let old_line_max = state.line_max;
    let old_parent_type = state.parent_type;
    state.parent_type = ParentType::Blockquote;

    let mut saved: Vec<SavedLine> = Vec::new();
    let mut last_line_empty = false;
    let mut next_line = start_line;

    while next_line < end_line {
        let is_outdented = state.s_count[next_line] < state.blk_indent;
        let mut pos = state.content_start(next_line);
        let max = state.e_marks[next_line];

        if pos >= max {
            // Empty line outside the quote.
            break;
        }

        if state.byte(pos) == Some(b'>') && !is_outdented {
            pos += 1;
            // This line is inside the blockquote.
            let mut initial = state.s_count[next_line] + 1;
            let space_after_marker;
            let adjust_tab;

            match state.byte(pos) {
                Some(b' ') => {
                    pos += 1;
                    initial += 1;
                    adjust_tab = false;
                    space_after_marker = true;
                }
                Some(b'\t') => {
                    space_after_marker = true;
                    if (state.bs_count[next_line] + initial) % 4 == 3 {
                        // The tab is exactly one column wide.
                        pos += 1;
                        initial += 1;
                        adjust_tab = false;
                    } else {
                        // Part of the tab stays as indentation of the content.
                        adjust_tab = true;
                    }
                }
                _ => {
                    space_after_marker = false;
                    adjust_tab = false;
                }
            }

            let mut offset = initial;
            saved.push(SavedLine::take(state, next_line));
            state.b_marks[next_line] = pos;

            while pos < max {
                match state.byte(pos) {
                    Some(b'\t') => {
                        offset += 4
                            - (offset + state.bs_count[next_line] + isize::from(adjust_tab)) % 4;
                    }
                    Some(b' ') => offset += 1,
                    _ => break,
                }
                pos += 1;
            }

            last_line_empty = pos >= max;

            state.bs_count[next_line] =
                state.s_count[next_line] + 1 + isize::from(space_after_marker);
            state.s_count[next_line] = offset - initial;
            state.t_shift[next_line] = pos - state.b_marks[next_line];

            next_line += 1;
            continue;
        }

        // Not quoted, and the previous line was empty: the quote is over.
        if last_line_empty {
            break;
        }

        // Another block starts here.
        if md.block.terminates("blockquote", state, next_line, end_line) {
            // Stop lazy paragraphs from running into the terminating block.
            state.line_max = next_line;

            if state.blk_indent != 0 {
                // The terminating line is re-read inside the quote with a
                // zero block indent, so shift it accordingly.
                saved.push(SavedLine::take(state, next_line));
                state.s_count[next_line] -= state.blk_indent;
            }
            break;
        }

        saved.push(SavedLine::take(state, next_line));

        // A negative indentation means that this is a paragraph continuation.
        state.s_count[next_line] = -1;
        next_line += 1;
    }

    let old_indent = state.blk_indent;
    state.blk_indent = 0;

    let open_idx = state.tokens.len();
    let open = state.push("blockquote_open", "blockquote", Nesting::Opening);
    open.markup = ">".to_string();

    md.block.tokenize(state, start_line, next_line);

    let close = state.push("blockquote_close", "blockquote", Nesting::Closing);
    close.markup = ">".to_string();

    state.line_max = old_line_max;
    state.parent_type = old_parent_type;
    state.tokens[open_idx].map = Some([start_line, state.line]);

    // Put the line caches back.
    for (offset, entry) in saved.into_iter().enumerate() {
        let line = start_line + offset;
        state.b_marks[line] = entry.b_mark;
        state.t_shift[line] = entry.t_shift;
        state.s_count[line] = entry.s_count;
        state.bs_count[line] = entry.bs_count;
    }
    state.blk_indent = old_indent;

    log::debug!("Blockquote lines {}..{}", start_line + 1, state.line);

    true
}
