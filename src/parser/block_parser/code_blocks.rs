//! Fenced code block parsing (``` and ~~~).

use crate::token::Nesting;

use super::state::BlockState;

pub(crate) fn fence(
    state: &mut BlockState<'_>,
    start_line: usize,
    end_line: usize,
    silent: bool,
) -> bool {
    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }

    let mut pos = state.content_start(start_line);
    let mut max = state.e_marks[start_line];

    if pos + 3 > max {
        return false;
    }

    let Some(marker) = state.byte(pos).filter(|&b| b == b'`' || b == b'~') else {
        return false;
    };

    // Count fence characters
    let mut mem = pos;
    pos = state.skip_chars(pos, marker);
    let len = pos - mem;
    if len < 3 {
        return false;
    }

    let src = state.src;
    let markup = &src[mem..pos];
    let params = &src[pos..max];

    // Backtick fences may not carry backticks in their info string.
    if marker == b'`' && params.contains('`') {
        return false;
    }

    if silent {
        return true;
    }

    let mut next_line = start_line;
    let mut have_end_marker = false;

    loop {
        next_line += 1;
        if next_line >= end_line {
            // Unclosed block is closed by the end of the enclosing block.
            break;
        }

        pos = state.content_start(next_line);
        mem = pos;
        max = state.e_marks[next_line];

        if pos < max && state.s_count[next_line] < state.blk_indent {
            // Non-empty line with negative indent ends the block.
            break;
        }

        if state.byte(pos) != Some(marker) {
            continue;
        }

        // Closing fence must be indented less than 4 spaces.
        if state.s_count[next_line] - state.blk_indent >= 4 {
            continue;
        }

        pos = state.skip_chars(pos, marker);

        // Closing fence must be at least as long as the opening one.
        if pos - mem < len {
            continue;
        }

        pos = state.skip_spaces(pos);
        if pos < max {
            continue;
        }

        have_end_marker = true;
        break;
    }

    let indent = state.s_count[start_line];
    state.line = next_line + usize::from(have_end_marker);

    log::trace!(
        "Fenced code block lines {}..{} (closed: {})",
        start_line + 1,
        state.line,
        have_end_marker
    );

    let content = state.get_lines(start_line + 1, next_line, indent, true);
    let map = [start_line, state.line];

    let token = state.push("fence", "code", Nesting::SelfClosing);
    token.info = params.to_string();
    token.content = content;
    token.markup = markup.to_string();
    token.map = Some(map);

    true
}
