//! Opening-line validators.
//!
//! A validator sees the text after the marker run (`params`) and the run
//! itself (`markup`) and decides whether the line opens the container.

use std::sync::Arc;

use regex::Regex;

use super::ContainerError;

/// Extra data an accepting validator can attach to the container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerMeta {
    /// Inline text rendered in a header block at the top of the container.
    pub inline_content: Option<String>,
    /// Attributes that replace those of the open token.
    pub attrs: Option<Vec<(String, String)>>,
    /// Header token type; `<type>_open`/`<type>_close` are emitted.
    pub header_token_type: Option<String>,
    /// Header tag name.
    pub tag: Option<String>,
}

impl ContainerMeta {
    pub fn with_inline_content(text: impl Into<String>) -> Self {
        Self {
            inline_content: Some(text.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Rejected,
    Accepted,
    AcceptedWith(ContainerMeta),
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Validation::Rejected)
    }

    pub fn into_meta(self) -> Option<ContainerMeta> {
        match self {
            Validation::AcceptedWith(meta) => Some(meta),
            _ => None,
        }
    }
}

impl From<bool> for Validation {
    fn from(accepted: bool) -> Self {
        if accepted {
            Validation::Accepted
        } else {
            Validation::Rejected
        }
    }
}

/// `(params, markup) -> Validation`
pub type ValidatorFn = Arc<dyn Fn(&str, &str) -> Validation + Send + Sync>;

/// Accept when the first word of `params` is `name`.
pub fn default_validator(name: &str) -> ValidatorFn {
    let name = name.to_string();
    Arc::new(move |params: &str, _markup: &str| {
        Validation::from(params.trim().split(' ').next() == Some(name.as_str()))
    })
}

/// Accept `name [header text]`, returning the bracket text as header content.
///
/// A bare `name` without brackets is rejected.
pub fn bracketed_header(name: &str) -> Result<ValidatorFn, ContainerError> {
    let pattern = format!(r"^\s*{}\s+\[(.*)\]\s*$", regex::escape(name));
    let re = Regex::new(&pattern).map_err(ContainerError::InvalidHeaderPattern)?;
    Ok(Arc::new(move |params: &str, _markup: &str| {
        match re.captures(params).and_then(|caps| caps.get(1)) {
            Some(text) => Validation::AcceptedWith(ContainerMeta::with_inline_content(text.as_str())),
            None => Validation::Rejected,
        }
    }))
}
