use crate::container::{ContainerOptions, container};
use crate::parser::Markdown;
use crate::token::Token;

/// A parser with the given containers registered under default options.
pub(crate) fn with_containers(names: &[&str]) -> Markdown {
    let mut md = Markdown::new();
    for name in names {
        container(&mut md, ContainerOptions::new(*name)).unwrap();
    }
    md
}

pub(crate) fn kinds(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.kind.as_str()).collect()
}

pub(crate) fn assert_block_kinds(md: &Markdown, input: &str, expected: &[&str]) {
    let tokens = md.parse(input);
    assert_eq!(kinds(&tokens), expected, "input: {input:?}");
}

/// Content of every `inline` token, in order.
pub(crate) fn inline_contents(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .filter(|t| t.kind == "inline")
        .map(|t| t.content.as_str())
        .collect()
}
