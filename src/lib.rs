//! Fenced containers (`::: name`) for a token-stream Markdown parser.
//!
//! ```rust
//! use markdown_containers::{ContainerOptions, Markdown, container};
//!
//! let mut md = Markdown::new();
//! container(&mut md, ContainerOptions::new("warning")).unwrap();
//! assert_eq!(
//!     md.render("::: warning\nfoo\n:::\n"),
//!     "<div class=\"warning\">\n<p>foo</p>\n</div>\n"
//! );
//! ```

pub mod config;
pub mod container;
pub mod parser;
pub mod renderer;
pub mod token;

pub use config::{Config, ConfigBuilder, ContainerConfig, HeaderStyle};
pub use container::{
    ContainerError, ContainerMeta, ContainerOptions, Validation, ValidatorFn, bracketed_header,
    container,
};
pub use parser::{BlockState, Markdown, ParentType};
pub use renderer::{RenderRule, Renderer};
pub use token::{Nesting, Token};

/// Render `input` with the given configuration (defaults when `None`).
///
/// Containers listed in the configuration are registered first.
pub fn render(input: &str, config: Option<Config>) -> Result<String, ContainerError> {
    let md = Markdown::from_config(config.unwrap_or_default())?;
    Ok(md.render(input))
}

/// Parse `input` into tokens with the given configuration.
pub fn parse(input: &str, config: Option<Config>) -> Result<Vec<Token>, ContainerError> {
    let md = Markdown::from_config(config.unwrap_or_default())?;
    Ok(md.parse(input))
}
