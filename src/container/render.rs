//! Default render hooks for container open and close tokens.

use crate::config::Config;
use crate::renderer::Renderer;
use crate::token::Token;

/// Add the container name to the open token's class list, then render it
/// as a plain tag.
pub fn render_open(
    name: &str,
    tokens: &mut [Token],
    idx: usize,
    config: &Config,
    renderer: &Renderer,
) -> String {
    tokens[idx].attr_join("class", name);
    renderer.render_token(tokens, idx, config)
}

pub fn render_close(tokens: &mut [Token], idx: usize, config: &Config, renderer: &Renderer) -> String {
    renderer.render_token(tokens, idx, config)
}
