//! HTML output for a token stream.
//!
//! Every token type can have its own render rule; tokens without one go
//! through [`Renderer::render_token`], which writes a plain tag from the
//! token's `tag`, `attrs` and `nesting`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::parser::inline_parser::unescape_all;
use crate::token::{Nesting, Token};

/// A render rule: `(tokens, idx, config, renderer) -> html`.
///
/// Rules may decorate `tokens[idx]` (e.g. add a class) before rendering it.
pub type RenderRule = Arc<dyn Fn(&mut [Token], usize, &Config, &Renderer) -> String + Send + Sync>;

pub struct Renderer {
    rules: HashMap<String, RenderRule>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut renderer = Self {
            rules: HashMap::new(),
        };
        renderer.set_rule("text", text);
        renderer.set_rule("code_inline", code_inline);
        renderer.set_rule("code_block", code_block);
        renderer.set_rule("fence", fence);
        renderer.set_rule("hardbreak", hardbreak);
        renderer.set_rule("softbreak", softbreak);
        renderer
    }

    /// Install (or replace) the rule for token type `kind`.
    pub fn set_rule<F>(&mut self, kind: impl Into<String>, rule: F)
    where
        F: Fn(&mut [Token], usize, &Config, &Renderer) -> String + Send + Sync + 'static,
    {
        self.rules.insert(kind.into(), Arc::new(rule));
    }

    pub fn rule(&self, kind: &str) -> Option<&RenderRule> {
        self.rules.get(kind)
    }

    pub fn has_rule(&self, kind: &str) -> bool {
        self.rules.contains_key(kind)
    }

    /// Render a block-level token stream.
    pub fn render(&self, tokens: &mut [Token], config: &Config) -> String {
        let mut out = String::new();
        for idx in 0..tokens.len() {
            if tokens[idx].kind == "inline" {
                out.push_str(&self.render_inline(&mut tokens[idx].children, config));
            } else {
                out.push_str(&self.render_one(tokens, idx, config));
            }
        }
        out
    }

    /// Render the children of an `inline` token.
    pub fn render_inline(&self, tokens: &mut [Token], config: &Config) -> String {
        let mut out = String::new();
        for idx in 0..tokens.len() {
            out.push_str(&self.render_one(tokens, idx, config));
        }
        out
    }

    fn render_one(&self, tokens: &mut [Token], idx: usize, config: &Config) -> String {
        match self.rules.get(&tokens[idx].kind) {
            Some(rule) => rule(tokens, idx, config, self),
            None => self.render_token(tokens, idx, config),
        }
    }

    /// Generic tag output for `tokens[idx]`.
    pub fn render_token(&self, tokens: &[Token], idx: usize, config: &Config) -> String {
        let token = &tokens[idx];
        if token.hidden {
            return String::new();
        }

        let mut out = String::new();

        // Separate a hidden paragraph from the block tag that follows it.
        if token.block && token.nesting != Nesting::Closing && idx > 0 && tokens[idx - 1].hidden {
            out.push('\n');
        }

        out.push_str(if token.nesting == Nesting::Closing {
            "</"
        } else {
            "<"
        });
        out.push_str(&token.tag);
        out.push_str(&self.render_attrs(token));

        if token.nesting == Nesting::SelfClosing && config.xhtml_out {
            out.push_str(" /");
        }

        let mut need_lf = false;
        if token.block {
            need_lf = true;
            if token.nesting == Nesting::Opening
                && let Some(next) = tokens.get(idx + 1)
                && (next.kind == "inline"
                    || next.hidden
                    || (next.nesting == Nesting::Closing && next.tag == token.tag))
            {
                need_lf = false;
            }
        }

        out.push_str(if need_lf { ">\n" } else { ">" });
        out
    }

    pub fn render_attrs(&self, token: &Token) -> String {
        let mut out = String::new();
        for (name, value) in &token.attrs {
            out.push(' ');
            out.push_str(&escape_html(name));
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn break_tag(config: &Config) -> &'static str {
    if config.xhtml_out { "<br />\n" } else { "<br>\n" }
}

fn text(tokens: &mut [Token], idx: usize, _config: &Config, _renderer: &Renderer) -> String {
    escape_html(&tokens[idx].content)
}

fn code_inline(tokens: &mut [Token], idx: usize, _config: &Config, renderer: &Renderer) -> String {
    let token = &tokens[idx];
    format!(
        "<code{}>{}</code>",
        renderer.render_attrs(token),
        escape_html(&token.content)
    )
}

fn code_block(tokens: &mut [Token], idx: usize, _config: &Config, renderer: &Renderer) -> String {
    let token = &tokens[idx];
    format!(
        "<pre{}><code>{}</code></pre>\n",
        renderer.render_attrs(token),
        escape_html(&token.content)
    )
}

fn fence(tokens: &mut [Token], idx: usize, config: &Config, renderer: &Renderer) -> String {
    let token = &mut tokens[idx];
    let info = unescape_all(&token.info);
    if let Some(lang) = info.split_whitespace().next() {
        let class = format!("{}{}", config.lang_prefix, lang);
        token.attr_join("class", &class);
    }
    format!(
        "<pre><code{}>{}</code></pre>\n",
        renderer.render_attrs(token),
        escape_html(&token.content)
    )
}

fn hardbreak(_tokens: &mut [Token], _idx: usize, config: &Config, _renderer: &Renderer) -> String {
    break_tag(config).to_string()
}

fn softbreak(_tokens: &mut [Token], _idx: usize, config: &Config, _renderer: &Renderer) -> String {
    if config.breaks {
        break_tag(config).to_string()
    } else {
        "\n".to_string()
    }
}
