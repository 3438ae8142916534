//! Paragraphs: the fallback rule that always matches.

use crate::token::Nesting;

use super::state::{BlockState, ParentType};

/// Consume lines until an empty line, the lazy continuation bound
/// (`line_max`), or a line another rule of the `paragraph` chain claims.
pub(crate) fn paragraph(
    state: &mut BlockState<'_>,
    start_line: usize,
    _end_line: usize,
    _silent: bool,
) -> bool {
    let md = state.md;
    let end_line = state.line_max;
    let old_parent_type = state.parent_type;
    state.parent_type = ParentType::Paragraph;

    let mut next_line = start_line + 1;
    while next_line < end_line && !state.is_empty(next_line) {
        // Indented lines are plain continuation text, never a new block.
        if state.s_count[next_line] - state.blk_indent > 3 {
            next_line += 1;
            continue;
        }

        // Lazy continuation inside a blockquote.
        if state.s_count[next_line] < 0 {
            next_line += 1;
            continue;
        }

        if md.block.terminates("paragraph", state, next_line, end_line) {
            break;
        }
        next_line += 1;
    }

    let content = state
        .get_lines(start_line, next_line, state.blk_indent, false)
        .trim()
        .to_string();

    state.line = next_line;

    let open = state.push("paragraph_open", "p", Nesting::Opening);
    open.map = Some([start_line, next_line]);

    let inline = state.push("inline", "", Nesting::SelfClosing);
    inline.content = content;
    inline.map = Some([start_line, next_line]);

    state.push("paragraph_close", "p", Nesting::Closing);

    state.parent_type = old_parent_type;
    true
}
