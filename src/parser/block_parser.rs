use crate::parser::Markdown;
use crate::token::Token;

mod blockquotes;
mod code_blocks;
mod headings;
mod horizontal_rules;
mod indented_code;
mod lists;
mod paragraphs;
pub mod ruler;
pub mod state;
pub(crate) mod utils;

pub use ruler::{BlockRuleFn, BlockRuler, RulerError};
pub use state::{BlockState, ParentType};

/// Chains a rule joins when it may interrupt paragraphs, blockquotes and lists.
pub(crate) const INTERRUPTS_ALL: &[&str] = &["paragraph", "reference", "blockquote", "list"];

pub struct BlockParser {
    pub ruler: BlockRuler,
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockParser {
    /// A block parser with the core rules registered, in precedence order.
    pub fn new() -> Self {
        let mut ruler = BlockRuler::new();
        // Core rule names are distinct, so registration cannot fail here.
        let core: [(&str, fn(&mut BlockState<'_>, usize, usize, bool) -> bool, &[&str]); 7] = [
            ("code", indented_code::indented_code, &[]),
            ("fence", code_blocks::fence, INTERRUPTS_ALL),
            ("blockquote", blockquotes::blockquote, INTERRUPTS_ALL),
            ("hr", horizontal_rules::horizontal_rule, INTERRUPTS_ALL),
            ("list", lists::list, &["paragraph", "reference", "blockquote"]),
            ("heading", headings::heading, &["paragraph", "reference", "blockquote"]),
            ("paragraph", paragraphs::paragraph, &[]),
        ];
        for (name, rule, alt) in core {
            if let Err(err) = ruler.push(name, rule, alt) {
                log::error!("Failed to register core rule: {}", err);
            }
        }
        Self { ruler }
    }

    /// Run the block rules over `src` and return the block-level token stream.
    pub fn parse(&self, src: &str, md: &Markdown) -> Vec<Token> {
        let mut state = BlockState::new(src, md);
        let line_max = state.line_max;
        self.tokenize(&mut state, 0, line_max);
        state.tokens
    }

    /// Tokenize lines `start_line..end_line`.
    ///
    /// Re-entrant: container rules (blockquotes, lists, fenced containers)
    /// call back into this with their interior line range.
    pub fn tokenize(&self, state: &mut BlockState<'_>, start_line: usize, end_line: usize) {
        let max_nesting = state.md.config.max_nesting;
        let mut line = start_line;
        let mut has_empty_lines = false;

        while line < end_line {
            line = state.skip_empty_lines(line);
            state.line = line;
            if line >= end_line {
                break;
            }

            // Dedented content terminates the enclosing block.
            if state.s_count[line] < state.blk_indent {
                break;
            }

            if state.level >= max_nesting {
                log::warn!("Maximum nesting depth {} reached at line {}", max_nesting, line + 1);
                state.line = end_line;
                break;
            }

            let prev_line = state.line;
            let matched = self
                .ruler
                .chain("")
                .any(|rule| rule(state, line, end_line, false));

            if !matched || state.line <= prev_line {
                // Only reachable when the paragraph rule is disabled.
                log::warn!("No block rule advanced past line {}", line + 1);
                state.line = prev_line + 1;
            }

            state.tight = !has_empty_lines;

            // A block ending in an empty line (e.g. an unterminated fence)
            // makes the surrounding list loose.
            if state.is_empty(state.line - 1) {
                has_empty_lines = true;
            }

            line = state.line;

            if line < end_line && state.is_empty(line) {
                has_empty_lines = true;
                line += 1;
                state.line = line;
            }
        }
    }

    /// True if any rule of `chain` would start a block at `line`.
    ///
    /// Rules are probed in silent mode, so nothing is emitted.
    pub fn terminates(
        &self,
        chain: &str,
        state: &mut BlockState<'_>,
        line: usize,
        end_line: usize,
    ) -> bool {
        self.ruler
            .chain(chain)
            .any(|rule| rule(state, line, end_line, true))
    }
}
