//! Parser module containing block and inline parsers.

use crate::config::{Config, HeaderStyle};
use crate::container::{ContainerError, ContainerOptions, bracketed_header, container};
use crate::renderer::Renderer;
use crate::token::Token;

pub mod block_parser;
pub mod inline_parser;

// Re-export commonly used types
pub(crate) use block_parser::INTERRUPTS_ALL;
pub use block_parser::{BlockParser, BlockRuleFn, BlockRuler, BlockState, ParentType, RulerError};
pub use inline_parser::InlineParser;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A configured Markdown parser and renderer.
///
/// Plugins such as [`container`] register themselves by editing the
/// public `block` ruler and `renderer` rule map.
pub struct Markdown {
    pub block: BlockParser,
    pub inline: InlineParser,
    pub renderer: Renderer,
    pub config: Config,
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Markdown {
    /// A parser with the core rules and the default configuration.
    pub fn new() -> Self {
        Self {
            block: BlockParser::new(),
            inline: InlineParser::new(),
            renderer: Renderer::new(),
            config: Config::default(),
        }
    }

    /// A parser using `config`, with every configured container registered.
    pub fn from_config(config: Config) -> Result<Self, ContainerError> {
        let containers = config.containers.clone();
        let mut md = Self {
            config,
            ..Self::new()
        };

        for entry in containers {
            let mut options = ContainerOptions::new(entry.name.as_str()).marker(entry.marker);
            if entry.header == HeaderStyle::Bracketed {
                options = options.validator(bracketed_header(&entry.name)?);
            }
            container(&mut md, options)?;
        }
        Ok(md)
    }

    /// Parse `input` into a block token stream with inline children filled in.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use markdown_containers::Markdown;
    ///
    /// let tokens = Markdown::new().parse("# Heading\n\nParagraph text.");
    /// assert_eq!(tokens[0].kind, "heading_open");
    /// ```
    pub fn parse(&self, input: &str) -> Vec<Token> {
        #[cfg(debug_assertions)]
        {
            init_logger();
        }

        let src = block_parser::utils::normalize_input(input);
        let mut tokens = self.block.parse(&src, self);

        for token in tokens.iter_mut().filter(|token| token.kind == "inline") {
            token.children = self.inline.parse(&token.content);
        }

        log::debug!("Parsed {} block tokens", tokens.len());
        tokens
    }

    /// Parse and render `input` to HTML.
    pub fn render(&self, input: &str) -> String {
        let mut tokens = self.parse(input);
        self.renderer.render(&mut tokens, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigBuilder, ContainerConfig};

    #[test]
    fn renders_basic_document() {
        let html = Markdown::new().render("# Title\n\nSome *text*.\n");
        assert_eq!(html, "<h1>Title</h1>\n<p>Some <em>text</em>.</p>\n");
    }

    #[test]
    fn crlf_input_is_normalized() {
        let md = Markdown::new();
        assert_eq!(md.render("a\r\nb\r\n"), md.render("a\nb\n"));
    }

    #[test]
    fn from_config_registers_containers() {
        let mut spoiler = ContainerConfig::new("spoiler");
        spoiler.header = HeaderStyle::Bracketed;
        let config = ConfigBuilder::default()
            .container(ContainerConfig::new("note"))
            .container(spoiler)
            .build();
        let md = Markdown::from_config(config).unwrap();

        let names = md.block.ruler.names();
        assert!(names.contains(&"container_note"));
        assert!(names.contains(&"container_spoiler"));
    }

    #[test]
    fn from_config_rejects_duplicate_containers() {
        let config = ConfigBuilder::default()
            .container(ContainerConfig::new("note"))
            .container(ContainerConfig::new("note"))
            .build();
        assert!(Markdown::from_config(config).is_err());
    }

    #[test]
    fn markdown_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Markdown>();
    }
}
