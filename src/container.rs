//! Fenced containers: blocks delimited by a repeated marker.
//!
//! ```text
//! ::: warning
//! *here be dragons*
//! :::
//! ```
//!
//! Each registered container adds a block rule `container_<name>` in front
//! of `fence` and render rules for `container_<name>_open` and
//! `container_<name>_close`. The body is tokenized by the host block
//! parser, so any block syntax (including other containers) may nest.

use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::parser::{INTERRUPTS_ALL, Markdown, RulerError};
use crate::renderer::{RenderRule, Renderer};
use crate::token::Token;

mod marker;
mod render;
mod scanner;
mod validate;

pub use marker::{FenceMatch, MIN_MARKER_NUM, match_closing_fence, match_fence};
pub use render::{render_close, render_open};
pub use validate::{
    ContainerMeta, Validation, ValidatorFn, bracketed_header, default_validator,
};

use scanner::ContainerRule;

#[derive(Debug)]
pub enum ContainerError {
    /// The container name is empty or blank.
    EmptyName,
    /// The marker is empty or contains whitespace.
    InvalidMarker(String),
    InvalidHeaderPattern(regex::Error),
    /// The rule could not be placed (duplicate name, missing `fence`).
    Ruler(RulerError),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::EmptyName => write!(f, "container name must not be empty"),
            ContainerError::InvalidMarker(marker) => {
                write!(f, "invalid container marker {marker:?}")
            }
            ContainerError::InvalidHeaderPattern(err) => {
                write!(f, "invalid header pattern: {err}")
            }
            ContainerError::Ruler(err) => write!(f, "cannot register container rule: {err}"),
        }
    }
}

impl std::error::Error for ContainerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContainerError::InvalidHeaderPattern(err) => Some(err),
            ContainerError::Ruler(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RulerError> for ContainerError {
    fn from(err: RulerError) -> Self {
        ContainerError::Ruler(err)
    }
}

/// Registration options for one container kind.
pub struct ContainerOptions {
    name: String,
    marker: String,
    validate: Option<ValidatorFn>,
    open_render: Option<RenderRule>,
    close_render: Option<RenderRule>,
}

impl ContainerOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marker: ":".to_string(),
            validate: None,
            open_render: None,
            close_render: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marker repeated to form fences. Defaults to `:`.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Replace the default "first word is the name" check.
    pub fn validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str, &str) -> Validation + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validate));
        self
    }

    pub fn validator(mut self, validate: ValidatorFn) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn open_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&mut [Token], usize, &Config, &Renderer) -> String + Send + Sync + 'static,
    {
        self.open_render = Some(Arc::new(render));
        self
    }

    pub fn close_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&mut [Token], usize, &Config, &Renderer) -> String + Send + Sync + 'static,
    {
        self.close_render = Some(Arc::new(render));
        self
    }
}

/// Register a container kind on `md`.
pub fn container(md: &mut Markdown, options: ContainerOptions) -> Result<(), ContainerError> {
    let ContainerOptions {
        name,
        marker,
        validate,
        open_render,
        close_render,
    } = options;

    if name.trim().is_empty() {
        return Err(ContainerError::EmptyName);
    }
    if marker.is_empty() || marker.chars().any(char::is_whitespace) {
        return Err(ContainerError::InvalidMarker(marker));
    }

    let validate = validate.unwrap_or_else(|| default_validator(&name));
    let rule = ContainerRule {
        name: name.clone(),
        marker,
        validate,
    };
    let rule_name = format!("container_{name}");
    let open_kind = rule.open_kind();
    let close_kind = rule.close_kind();

    md.block.ruler.before(
        "fence",
        &rule_name,
        move |state, start_line, end_line, silent| rule.run(state, start_line, end_line, silent),
        INTERRUPTS_ALL,
    )?;

    match open_render {
        Some(hook) => md.renderer.set_rule(open_kind, move |tokens, idx, config, renderer| {
            hook(tokens, idx, config, renderer)
        }),
        None => {
            let class = name.clone();
            md.renderer.set_rule(open_kind, move |tokens, idx, config, renderer| {
                render_open(&class, tokens, idx, config, renderer)
            });
        }
    }
    match close_render {
        Some(hook) => md.renderer.set_rule(close_kind, move |tokens, idx, config, renderer| {
            hook(tokens, idx, config, renderer)
        }),
        None => md.renderer.set_rule(close_kind, render_close),
    }

    log::debug!("Registered container '{}'", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_is_placed_before_fence() {
        let mut md = Markdown::new();
        container(&mut md, ContainerOptions::new("note")).unwrap();
        let names = md.block.ruler.names();
        let container_idx = names.iter().position(|n| *n == "container_note").unwrap();
        let fence_idx = names.iter().position(|n| *n == "fence").unwrap();
        assert_eq!(container_idx + 1, fence_idx);
    }

    #[test]
    fn render_rules_are_installed() {
        let mut md = Markdown::new();
        container(&mut md, ContainerOptions::new("note")).unwrap();
        assert!(md.renderer.has_rule("container_note_open"));
        assert!(md.renderer.has_rule("container_note_close"));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut md = Markdown::new();
        container(&mut md, ContainerOptions::new("note")).unwrap();
        let err = container(&mut md, ContainerOptions::new("note")).unwrap_err();
        assert!(matches!(err, ContainerError::Ruler(RulerError::DuplicateRule(_))));
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut md = Markdown::new();
        let err = container(&mut md, ContainerOptions::new("  ")).unwrap_err();
        assert!(matches!(err, ContainerError::EmptyName));
    }

    #[test]
    fn blank_marker_is_rejected() {
        let mut md = Markdown::new();
        for marker in ["", " ", ": :"] {
            let err = container(&mut md, ContainerOptions::new("note").marker(marker)).unwrap_err();
            assert!(matches!(err, ContainerError::InvalidMarker(_)), "{marker:?}");
        }
    }

    #[test]
    fn missing_fence_rule_is_reported() {
        let mut md = Markdown::new();
        md.block.ruler = crate::parser::BlockRuler::new();
        let err = container(&mut md, ContainerOptions::new("note")).unwrap_err();
        assert!(matches!(err, ContainerError::Ruler(RulerError::UnknownRule(_))));
        assert!(err.to_string().contains("fence"));
    }
}
