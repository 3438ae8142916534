//! The block rule behind every registered container.

use std::ops::{Deref, DerefMut};

use crate::parser::{BlockState, ParentType};
use crate::token::Nesting;

use super::marker::{match_closing_fence, match_fence};
use super::validate::ValidatorFn;

/// Parent type and lazy-continuation bound while a container body is
/// tokenized. Both are put back when the scope is dropped.
struct ContainerScope<'s, 'a> {
    state: &'s mut BlockState<'a>,
    parent_type: ParentType,
    line_max: usize,
}

impl<'s, 'a> ContainerScope<'s, 'a> {
    fn enter(state: &'s mut BlockState<'a>, line_max: usize) -> Self {
        let parent_type = state.parent_type;
        let saved_line_max = state.line_max;
        state.parent_type = ParentType::Container;
        // Lazy paragraphs must not run past the closing fence.
        state.line_max = line_max;
        Self {
            state,
            parent_type,
            line_max: saved_line_max,
        }
    }
}

impl<'a> Deref for ContainerScope<'_, 'a> {
    type Target = BlockState<'a>;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl<'a> DerefMut for ContainerScope<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for ContainerScope<'_, '_> {
    fn drop(&mut self) {
        self.state.parent_type = self.parent_type;
        self.state.line_max = self.line_max;
    }
}

pub(crate) struct ContainerRule {
    pub name: String,
    pub marker: String,
    pub validate: ValidatorFn,
}

impl ContainerRule {
    pub fn open_kind(&self) -> String {
        format!("container_{}_open", self.name)
    }

    pub fn close_kind(&self) -> String {
        format!("container_{}_close", self.name)
    }

    pub fn run(
        &self,
        state: &mut BlockState<'_>,
        start_line: usize,
        end_line: usize,
        silent: bool,
    ) -> bool {
        // Indented 4+ columns is code, same as for fenced code.
        if state.s_count[start_line] - state.blk_indent >= 4 {
            return false;
        }

        let Some(open) = match_fence(state.line_text(start_line), &self.marker) else {
            return false;
        };

        let validation = (self.validate)(open.params, open.markup);
        if !validation.is_accepted() {
            log::trace!(
                "Container '{}' rejected params {:?} at line {}",
                self.name,
                open.params,
                start_line + 1
            );
            return false;
        }

        if silent {
            return true;
        }

        let mut next_line = start_line;
        let mut close_markup = "";
        let mut closed = false;

        loop {
            next_line += 1;
            if next_line >= end_line {
                // Unclosed: ends with the enclosing block or the document.
                break;
            }

            if !state.is_empty(next_line) && state.s_count[next_line] < state.blk_indent {
                // Non-empty line with negative indent ends the container.
                break;
            }

            if state.s_count[next_line] - state.blk_indent >= 4 {
                continue;
            }

            if let Some(markup) =
                match_closing_fence(state.line_text(next_line), &self.marker, open.count)
            {
                log::trace!("Container '{}' closing fence at line {}", self.name, next_line + 1);
                close_markup = markup;
                closed = true;
                break;
            }
        }

        let meta = validation.into_meta();
        let md = state.md;
        let mut scope = ContainerScope::enter(state, next_line);

        let token = scope.push(self.open_kind(), "div", Nesting::Opening);
        token.markup = open.markup.to_string();
        token.info = open.params.to_string();
        token.map = Some([start_line, next_line]);

        let mut header = None;
        if let Some(meta) = meta {
            if let Some(attrs) = meta.attrs {
                token.attrs = attrs;
            }
            if let Some(text) = meta.inline_content.filter(|text| !text.is_empty()) {
                let kind = meta
                    .header_token_type
                    .unwrap_or_else(|| "container_header".to_string());
                let tag = meta.tag.unwrap_or_else(|| "header".to_string());
                header = Some((kind, tag, text));
            }
        }

        if let Some((kind, tag, text)) = header {
            let map = Some([start_line, start_line + 1]);
            scope.push(format!("{kind}_open"), tag.as_str(), Nesting::Opening).map = map;
            let inline = scope.push("inline", "", Nesting::SelfClosing);
            inline.content = text;
            inline.map = map;
            scope.push(format!("{kind}_close"), tag, Nesting::Closing);
        }

        md.block.tokenize(&mut scope, start_line + 1, next_line);

        let close = scope.push(self.close_kind(), "div", Nesting::Closing);
        close.markup = close_markup.to_string();
        drop(scope);

        state.line = next_line + usize::from(closed);

        log::debug!(
            "Container '{}' lines {}..{} ({})",
            self.name,
            start_line + 1,
            state.line,
            if closed { "closed" } else { "auto-closed" }
        );

        true
    }
}
