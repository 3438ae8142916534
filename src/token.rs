//! Flat token stream shared by the block parser, inline parser and renderer.

use serde::Serialize;

/// Whether a token opens, closes, or is a self-contained element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nesting {
    Opening,
    SelfClosing,
    Closing,
}

/// A single structural marker in the token stream.
///
/// Block rules append tokens through [`BlockState::push`](crate::parser::BlockState::push);
/// `inline` tokens get their `children` filled by the inline pass afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Token type, e.g. `paragraph_open` or `container_note_close`.
    pub kind: String,
    /// HTML tag name used by the generic renderer.
    pub tag: String,
    pub nesting: Nesting,
    pub attrs: Vec<(String, String)>,
    /// Source line range `[begin, end)`.
    pub map: Option<[usize; 2]>,
    /// Nesting level, incremented by opening tokens.
    pub level: usize,
    pub children: Vec<Token>,
    pub content: String,
    /// Source markers, e.g. `:::` for containers or `*` for emphasis.
    pub markup: String,
    /// Fence and container parameters.
    pub info: String,
    /// True for block-level tokens.
    pub block: bool,
    /// Hidden tokens are skipped by the renderer (tight list paragraphs).
    pub hidden: bool,
}

impl Token {
    pub fn new(kind: impl Into<String>, tag: impl Into<String>, nesting: Nesting) -> Self {
        Self {
            kind: kind.into(),
            tag: tag.into(),
            nesting,
            attrs: Vec::new(),
            map: None,
            level: 0,
            children: Vec::new(),
            content: String::new(),
            markup: String::new(),
            info: String::new(),
            block: false,
            hidden: false,
        }
    }

    pub fn attr_index(&self, name: &str) -> Option<usize> {
        self.attrs.iter().position(|(key, _)| key == name)
    }

    pub fn attr_get(&self, name: &str) -> Option<&str> {
        self.attr_index(name).map(|idx| self.attrs[idx].1.as_str())
    }

    pub fn attr_push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.push((name.into(), value.into()));
    }

    /// Set an attribute, overwriting an existing value.
    pub fn attr_set(&mut self, name: &str, value: impl Into<String>) {
        match self.attr_index(name) {
            Some(idx) => self.attrs[idx].1 = value.into(),
            None => self.attr_push(name, value),
        }
    }

    /// Join `value` onto an existing attribute with a space, or create it.
    ///
    /// Used for class lists, where several plugins may add to the same token.
    pub fn attr_join(&mut self, name: &str, value: &str) {
        match self.attr_index(name) {
            Some(idx) => {
                let existing = &mut self.attrs[idx].1;
                if existing.is_empty() {
                    existing.push_str(value);
                } else {
                    existing.push(' ');
                    existing.push_str(value);
                }
            }
            None => self.attr_push(name, value),
        }
    }
}
