#[cfg(test)]
mod inline_tests {
    use crate::parser::inline_parser::InlineParser;
    use crate::token::Token;

    fn parse(input: &str) -> Vec<Token> {
        InlineParser::new().parse(input)
    }

    /// `kind` of every child, with text content inlined for readability.
    fn summary(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| match t.kind.as_str() {
                "text" | "code_inline" => format!("{}({})", t.kind, t.content),
                _ => t.kind.clone(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_plain_text_is_one_token() {
        let tokens = parse("Just some text.");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].content, "Just some text.");
    }

    #[test]
    fn test_strong_header_content() {
        insta::assert_snapshot!(
            summary(&parse("**Inline** content")),
            @"strong_open text(Inline) strong_close text( content)"
        );
    }

    #[test]
    fn test_simple_emphasis() {
        insta::assert_snapshot!(
            summary(&parse("This is *italic* text.")),
            @"text(This is ) em_open text(italic) em_close text( text.)"
        );
    }

    #[test]
    fn test_nested_emphasis() {
        insta::assert_snapshot!(
            summary(&parse("*foo **bar** baz*")),
            @"em_open text(foo ) strong_open text(bar) strong_close text( baz) em_close"
        );
    }

    #[test]
    fn test_emphasis_levels() {
        let tokens = parse("*a **b***");
        let levels: Vec<usize> = tokens.iter().map(|t| t.level).collect();
        assert_eq!(levels, vec![0, 1, 1, 2, 1, 0]);
    }

    #[test]
    fn test_unmatched_delimiters_are_text() {
        let tokens = parse("2 * 3 * 4");
        assert_eq!(summary(&tokens), "text(2 * 3 * 4)");
    }

    #[test]
    fn test_intraword_underscore_is_text() {
        assert_eq!(summary(&parse("snake_case_name")), "text(snake_case_name)");
    }

    #[test]
    fn test_markup_records_delimiter() {
        let tokens = parse("__bold__");
        assert_eq!(tokens[0].kind, "strong_open");
        assert_eq!(tokens[0].markup, "__");
    }

    #[test]
    fn test_code_span() {
        let tokens = parse("use `*raw*` here");
        assert_eq!(summary(&tokens), "text(use ) code_inline(*raw*) text( here)");
        assert_eq!(tokens[1].markup, "`");
    }

    #[test]
    fn test_unclosed_backticks_are_text() {
        assert_eq!(summary(&parse("``not code`")), "text(``not code`)");
    }

    #[test]
    fn test_escaped_delimiter() {
        assert_eq!(summary(&parse(r"\*not em\*")), "text(*not em*)");
    }

    #[test]
    fn test_softbreak_strips_surrounding_spaces() {
        assert_eq!(summary(&parse("foo \n  bar")), "text(foo) softbreak text(bar)");
    }

    #[test]
    fn test_softbreak_skips_leading_tab() {
        assert_eq!(summary(&parse("a\n\t`")), "text(a) softbreak text(`)");
    }

    #[test]
    fn test_hardbreak_from_trailing_spaces() {
        assert_eq!(summary(&parse("foo  \nbar")), "text(foo) hardbreak text(bar)");
    }

    #[test]
    fn test_hardbreak_from_backslash() {
        assert_eq!(summary(&parse("foo\\\nbar")), "text(foo) hardbreak text(bar)");
    }

    #[test]
    fn test_children_are_inline_tokens() {
        assert!(parse("*a* b").iter().all(|t| !t.block));
    }
}
