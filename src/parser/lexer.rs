//! Lexer for Nagios object configuration using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Block opener, e.g. `define host {` (carries the type tag).
    /// A `#` comment may follow the brace on the same line.
    #[regex(r"define[ \t]+[A-Za-z_][A-Za-z0-9_]*[ \t]*\{([ \t]*#[^\n]*)?", |lex| define_tag(lex.slice()))]
    Define(String),

    #[token("}")]
    BraceClose,

    /// End of line. Absorbs a following `#` comment line, since `#` only
    /// starts a comment at the beginning of a line.
    #[regex(r"\n([ \t\r\f]*#[^\n]*)?")]
    Newline,

    // Anything else up to whitespace or an inline comment; `\;` is a literal
    #[regex(r"([^ \t\r\f\n;\\]|\\;?)+", |lex| lex.slice().to_string(), priority = 1)]
    Word(String),

    #[regex(r";[^\n]*", logos::skip)]
    InlineComment,
}

/// Extract the type tag from a `define <tag> {` slice
fn define_tag(slice: &str) -> String {
    let header = slice.split('{').next().unwrap_or_default();
    header["define".len()..].trim().to_string()
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    // a comment on the first line has no newline in front of it
    let start = if input.trim_start_matches([' ', '\t', '\r', '\x0c']).starts_with('#') {
        input.find('\n').unwrap_or(input.len())
    } else {
        0
    };
    Token::lexer(&input[start..])
        .spanned()
        .filter_map(move |(tok, span)| tok.ok().map(|t| (t, span.start + start..span.end + start)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    #[test]
    fn test_define_header() {
        let tokens: Vec<_> = lex("define host {").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Define("host".to_string())]);
    }

    #[test]
    fn test_define_header_without_space_before_brace() {
        let tokens: Vec<_> = lex("define service{").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Define("service".to_string())]);
    }

    #[test]
    fn test_property_line() {
        let tokens: Vec<_> = lex("    host_name   web01\n").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![word("host_name"), word("web01"), Token::Newline]);
    }

    #[test]
    fn test_line_comments_skipped() {
        let tokens: Vec<_> = lex("# a comment line\nuse generic-host")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(tokens, vec![Token::Newline, word("use"), word("generic-host")]);
    }

    #[test]
    fn test_indented_comment_line_skipped() {
        let tokens: Vec<_> = lex("alias a\n    # note\nuse b").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![word("alias"), word("a"), Token::Newline, word("use"), word("b")]
        );
    }

    #[test]
    fn test_hash_inside_value_is_a_word() {
        let tokens: Vec<_> = lex("notes ticket #42 pending\n").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                word("notes"),
                word("ticket"),
                word("#42"),
                word("pending"),
                Token::Newline
            ]
        );
    }

    #[test]
    fn test_comment_after_define_header() {
        let tokens: Vec<_> = lex("define contact {   # people\n").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Define("contact".to_string()), Token::Newline]);
    }

    #[test]
    fn test_escaped_semicolon_stays_in_word() {
        let tokens: Vec<_> = lex("command_line echo a\\;b ; real comment\n")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![word("command_line"), word("echo"), word("a\\;b"), Token::Newline]
        );
    }

    #[test]
    fn test_leading_comment_keeps_spans() {
        let spans: Vec<_> = lex("  # head\nuse b").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![8..9, 9..12, 13..14]);
    }

    #[test]
    fn test_inline_comments_skipped() {
        let tokens: Vec<_> = lex("max_check_attempts 5 ; retry five times\n")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![word("max_check_attempts"), word("5"), Token::Newline]
        );
    }

    #[test]
    fn test_brace_inside_value_is_a_word() {
        let tokens: Vec<_> = lex("command_line awk '{print $1}'")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![word("command_line"), word("awk"), word("'{print"), word("$1}'")]
        );
    }

    #[test]
    fn test_additive_value() {
        let tokens: Vec<_> = lex("contact_groups +admins").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![word("contact_groups"), word("+admins")]);
    }

    #[test]
    fn test_complete_block() {
        let input = "define host {\n    use  generic-host\n}\n";
        let tokens: Vec<_> = lex(input).map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Define("host".to_string()),
                Token::Newline,
                word("use"),
                word("generic-host"),
                Token::Newline,
                Token::BraceClose,
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_spans_cover_words() {
        let spans: Vec<_> = lex("alias  My Host").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..5, 7..9, 10..14]);
    }
}
