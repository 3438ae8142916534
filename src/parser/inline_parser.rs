//! Inline parsing for the content of `inline` tokens.
//!
//! Runs in two passes: a left-to-right scan that splits the text into
//! literal text, ready-made tokens (code spans, line breaks) and delimiter
//! slots, then the emphasis pass that pairs delimiters up.

use crate::token::{Nesting, Token};

mod code_spans;
mod emphasis;
mod escapes;
mod tests;

use code_spans::{normalize_code_content, try_parse_code_span};
use emphasis::{Delimiter, analyze_delimiter_run, process_emphasis};
use escapes::{EscapeType, try_parse_escape};
pub(crate) use escapes::unescape_all;

/// One unit of scanned inline content.
#[derive(Debug)]
enum Piece {
    Text(String),
    /// A single `*` or `_` that may become part of an emphasis marker.
    Delim(char),
    Token(Token),
}

/// What a delimiter slot turned into after emphasis matching.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SlotRole {
    Literal,
    Open(u8),
    Close(u8),
    /// Consumed by a neighbouring `Open`/`Close` slot.
    Consumed,
}

#[derive(Debug, Default)]
pub struct InlineParser;

impl InlineParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse inline `content` into a flat list of child tokens.
    pub fn parse(&self, content: &str) -> Vec<Token> {
        let (pieces, mut delimiters) = scan(content);
        let matches = process_emphasis(&mut delimiters);

        let mut roles = vec![SlotRole::Literal; pieces.len()];
        for m in &matches {
            roles[m.start] = SlotRole::Open(m.level);
            for role in &mut roles[m.start + 1..m.content_start] {
                *role = SlotRole::Consumed;
            }
            roles[m.content_end] = SlotRole::Close(m.level);
            for role in &mut roles[m.content_end + 1..m.end] {
                *role = SlotRole::Consumed;
            }
        }

        let mut emitter = Emitter::default();
        for (piece, role) in pieces.into_iter().zip(roles) {
            match (piece, role) {
                (Piece::Text(text), _) => emitter.text.push_str(&text),
                (Piece::Delim(ch), SlotRole::Literal) => emitter.text.push(ch),
                (Piece::Delim(ch), SlotRole::Open(level)) => emitter.emphasis(ch, level, true),
                (Piece::Delim(ch), SlotRole::Close(level)) => emitter.emphasis(ch, level, false),
                (Piece::Delim(_), SlotRole::Consumed) => {}
                (Piece::Token(token), _) => emitter.push(token),
            }
        }
        emitter.finish()
    }
}

fn push_text(pieces: &mut Vec<Piece>, text: &str) {
    if let Some(Piece::Text(last)) = pieces.last_mut() {
        last.push_str(text);
    } else {
        pieces.push(Piece::Text(text.to_string()));
    }
}

/// Remove trailing spaces from the last text piece, returning how many.
fn trim_trailing_spaces(pieces: &mut [Piece]) -> usize {
    match pieces.last_mut() {
        Some(Piece::Text(last)) => {
            let trimmed = last.trim_end_matches(' ').len();
            let removed = last.len() - trimmed;
            last.truncate(trimmed);
            removed
        }
        _ => 0,
    }
}

fn skip_leading_spaces(text: &str, mut pos: usize) -> usize {
    while matches!(text.as_bytes().get(pos), Some(b' ' | b'\t')) {
        pos += 1;
    }
    pos
}

fn scan(text: &str) -> (Vec<Piece>, Vec<Delimiter>) {
    let mut pieces = Vec::new();
    let mut delimiters = Vec::new();
    let bytes = text.as_bytes();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        match bytes[pos] {
            b'\\' => {
                if let Some((len, ch, kind)) = try_parse_escape(rest) {
                    pos += len;
                    match kind {
                        EscapeType::Literal => push_text(&mut pieces, ch.encode_utf8(&mut [0; 4])),
                        EscapeType::HardLineBreak => {
                            pieces.push(Piece::Token(Token::new("hardbreak", "br", Nesting::SelfClosing)));
                            pos = skip_leading_spaces(text, pos);
                        }
                    }
                    continue;
                }
                push_text(&mut pieces, "\\");
                pos += 1;
            }
            b'`' => {
                if let Some((len, content, ticks)) = try_parse_code_span(rest) {
                    let mut token = Token::new("code_inline", "code", Nesting::SelfClosing);
                    token.content = normalize_code_content(content);
                    token.markup = "`".repeat(ticks);
                    pieces.push(Piece::Token(token));
                    pos += len;
                } else {
                    // An unmatched run is literal as a whole.
                    let run = rest.bytes().take_while(|&b| b == b'`').count();
                    push_text(&mut pieces, &rest[..run]);
                    pos += run;
                }
            }
            ch @ (b'*' | b'_') => {
                let count = rest.bytes().take_while(|&b| b == ch).count();
                let flanking = analyze_delimiter_run(text, pos, ch as char, count);
                delimiters.push(Delimiter::new(ch as char, count, pieces.len(), flanking));
                for _ in 0..count {
                    pieces.push(Piece::Delim(ch as char));
                }
                pos += count;
            }
            b'\n' => {
                let kind = if trim_trailing_spaces(&mut pieces) >= 2 {
                    ("hardbreak", "br")
                } else {
                    ("softbreak", "br")
                };
                pieces.push(Piece::Token(Token::new(kind.0, kind.1, Nesting::SelfClosing)));
                pos = skip_leading_spaces(text, pos + 1);
            }
            _ => {
                let len = rest.chars().next().map_or(1, char::len_utf8);
                push_text(&mut pieces, &rest[..len]);
                pos += len;
            }
        }
    }

    (pieces, delimiters)
}

/// Collects child tokens, merging adjacent text and tracking nesting level.
#[derive(Default)]
struct Emitter {
    tokens: Vec<Token>,
    text: String,
    level: usize,
}

impl Emitter {
    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let mut token = Token::new("text", "", Nesting::SelfClosing);
        token.content = std::mem::take(&mut self.text);
        token.level = self.level;
        self.tokens.push(token);
    }

    fn push(&mut self, mut token: Token) {
        self.flush_text();
        if token.nesting == Nesting::Closing {
            self.level = self.level.saturating_sub(1);
        }
        token.level = self.level;
        if token.nesting == Nesting::Opening {
            self.level += 1;
        }
        self.tokens.push(token);
    }

    fn emphasis(&mut self, ch: char, level: u8, open: bool) {
        let (kind, tag) = if level == 2 {
            ("strong", "strong")
        } else {
            ("em", "em")
        };
        let (suffix, nesting) = if open {
            ("_open", Nesting::Opening)
        } else {
            ("_close", Nesting::Closing)
        };
        let mut token = Token::new(format!("{kind}{suffix}"), tag, nesting);
        token.markup = ch.to_string().repeat(usize::from(level));
        self.push(token);
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush_text();
        self.tokens
    }
}
