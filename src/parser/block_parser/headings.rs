//! ATX heading parsing (`# Title`).

use crate::token::Nesting;

use super::state::BlockState;
use super::utils::is_space;

pub(crate) fn heading(
    state: &mut BlockState<'_>,
    start_line: usize,
    _end_line: usize,
    silent: bool,
) -> bool {
    if state.s_count[start_line] - state.blk_indent >= 4 {
        return false;
    }

    let mut pos = state.content_start(start_line);
    let mut max = state.e_marks[start_line];

    if pos >= max || state.byte(pos) != Some(b'#') {
        return false;
    }

    // Count heading level
    let mut level = 1;
    pos += 1;
    while pos < max && state.byte(pos) == Some(b'#') && level <= 6 {
        level += 1;
        pos += 1;
    }

    if level > 6 || (pos < max && !state.byte(pos).is_some_and(is_space)) {
        return false;
    }

    if silent {
        return true;
    }

    // Drop the optional closing sequence: `## Title ##`
    max = state.skip_spaces_back(max, pos);
    let closing = state.skip_chars_back(max, b'#', pos);
    if closing > pos && state.byte(closing - 1).is_some_and(is_space) {
        max = closing;
    }

    state.line = start_line + 1;

    let tag = format!("h{}", level);
    let markup = "#".repeat(level);

    let open = state.push("heading_open", tag.as_str(), Nesting::Opening);
    open.markup = markup.clone();
    open.map = Some([start_line, start_line + 1]);

    let content = state.src[pos..max].trim().to_string();
    let inline = state.push("inline", "", Nesting::SelfClosing);
    inline.content = content;
    inline.map = Some([start_line, start_line + 1]);

    let close = state.push("heading_close", tag, Nesting::Closing);
    close.markup = markup;

    true
}
