//! Mutable block parsing state threaded through every block rule.

use crate::parser::Markdown;
use crate::token::{Nesting, Token};

use super::utils::{is_space, leading_indent, line_ranges};

/// The kind of block that is currently being parsed.
///
/// Rules that allow lazy continuation (paragraphs inside blockquotes and
/// lists) look at this to decide whether a line may be swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentType {
    Root,
    Paragraph,
    Blockquote,
    List,
    Container,
}

pub struct BlockState<'a> {
    pub src: &'a str,
    /// The parser that owns the rules; used for re-entrant tokenization.
    pub md: &'a Markdown,
    pub tokens: Vec<Token>,

    /// Line start offsets.
    pub b_marks: Vec<usize>,
    /// Line end offsets (position of the `\n` or end of input).
    pub e_marks: Vec<usize>,
    /// Bytes of indentation before the first non-space character.
    pub t_shift: Vec<usize>,
    /// Indentation in columns; negative marks a lazy continuation line.
    pub s_count: Vec<isize>,
    /// Column offset introduced by container markers (blockquotes).
    pub bs_count: Vec<isize>,

    /// Required indentation of the current block.
    pub blk_indent: isize,
    /// Indentation of the enclosing list, if any.
    pub list_indent: Option<isize>,
    pub line: usize,
    /// Lines at or past this bound are out of reach for lazy continuation.
    pub line_max: usize,
    pub tight: bool,
    pub parent_type: ParentType,
    pub level: usize,
}

impl<'a> BlockState<'a> {
    pub fn new(src: &'a str, md: &'a Markdown) -> Self {
        let ranges = line_ranges(src);
        let capacity = ranges.len() + 1;
        let mut state = Self {
            src,
            md,
            tokens: Vec::new(),
            b_marks: Vec::with_capacity(capacity),
            e_marks: Vec::with_capacity(capacity),
            t_shift: Vec::with_capacity(capacity),
            s_count: Vec::with_capacity(capacity),
            bs_count: Vec::with_capacity(capacity),
            blk_indent: 0,
            list_indent: None,
            line: 0,
            line_max: 0,
            tight: false,
            parent_type: ParentType::Root,
            level: 0,
        };

        for (start, end) in ranges {
            let (cols, bytes) = leading_indent(&src[start..end]);
            state.b_marks.push(start);
            state.e_marks.push(end);
            state.t_shift.push(bytes);
            state.s_count.push(cols as isize);
            state.bs_count.push(0);
        }

        // Sentinel entry so rules may look one line past the end.
        state.b_marks.push(src.len());
        state.e_marks.push(src.len());
        state.t_shift.push(0);
        state.s_count.push(0);
        state.bs_count.push(0);

        state.line_max = state.b_marks.len() - 1;
        state
    }

    /// Append a block token and return it for further decoration.
    pub fn push(
        &mut self,
        kind: impl Into<String>,
        tag: impl Into<String>,
        nesting: Nesting,
    ) -> &mut Token {
        let mut token = Token::new(kind, tag, nesting);
        token.block = true;

        if nesting == Nesting::Closing {
            self.level = self.level.saturating_sub(1);
        }
        token.level = self.level;
        if nesting == Nesting::Opening {
            self.level += 1;
        }

        let idx = self.tokens.len();
        self.tokens.push(token);
        &mut self.tokens[idx]
    }

    /// Byte at `pos`, or `None` past the end of the source.
    pub fn byte(&self, pos: usize) -> Option<u8> {
        self.src.as_bytes().get(pos).copied()
    }

    /// Offset of the first non-indent character on `line`.
    pub fn content_start(&self, line: usize) -> usize {
        self.b_marks[line] + self.t_shift[line]
    }

    /// Line text after its indentation, without the trailing newline.
    pub fn line_text(&self, line: usize) -> &'a str {
        let start = self.content_start(line).min(self.e_marks[line]);
        &self.src[start..self.e_marks[line]]
    }

    pub fn is_empty(&self, line: usize) -> bool {
        self.content_start(line) >= self.e_marks[line]
    }

    pub fn skip_empty_lines(&self, mut from: usize) -> usize {
        while from < self.line_max {
            if !self.is_empty(from) {
                break;
            }
            from += 1;
        }
        from
    }

    pub fn skip_spaces(&self, mut pos: usize) -> usize {
        while self.byte(pos).is_some_and(is_space) {
            pos += 1;
        }
        pos
    }

    /// Skip spaces backwards from `pos`, never going below `min`.
    pub fn skip_spaces_back(&self, mut pos: usize, min: usize) -> usize {
        while pos > min {
            pos -= 1;
            if !self.byte(pos).is_some_and(is_space) {
                return pos + 1;
            }
        }
        pos
    }

    pub fn skip_chars(&self, mut pos: usize, ch: u8) -> usize {
        while self.byte(pos) == Some(ch) {
            pos += 1;
        }
        pos
    }

    pub fn skip_chars_back(&self, mut pos: usize, ch: u8, min: usize) -> usize {
        while pos > min {
            pos -= 1;
            if self.byte(pos) != Some(ch) {
                return pos + 1;
            }
        }
        pos
    }

    /// Collect lines `begin..end`, stripping up to `indent` columns from each.
    ///
    /// Tabs that straddle the indent boundary are partially expanded into
    /// spaces so that code content keeps its visual alignment.
    pub fn get_lines(&self, begin: usize, end: usize, indent: isize, keep_last_lf: bool) -> String {
        if begin >= end {
            return String::new();
        }

        let bytes = self.src.as_bytes();
        let mut out = String::new();

        for line in begin..end {
            let line_start = self.b_marks[line];
            let mut first = line_start;
            let last = if line + 1 < end || keep_last_lf {
                (self.e_marks[line] + 1).min(self.src.len())
            } else {
                self.e_marks[line]
            };

            let mut line_indent: isize = 0;
            while first < last && line_indent < indent {
                let ch = bytes[first];
                if is_space(ch) {
                    if ch == b'\t' {
                        line_indent += 4 - (line_indent + self.bs_count[line]) % 4;
                    } else {
                        line_indent += 1;
                    }
                } else if first - line_start < self.t_shift[line] {
                    // Container markers shifted into the indent act like spaces.
                    line_indent += 1;
                } else {
                    break;
                }
                first += 1;
            }

            if line_indent > indent {
                out.push_str(&" ".repeat((line_indent - indent) as usize));
            }
            out.push_str(&self.src[first..last]);
        }

        out
    }
}
