//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse object configuration text into an AST
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser(input)
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>(
    source: &'a str,
) -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let newlines = just(Token::Newline).repeated();

    let word = select! {
        Token::Word(w) => w,
    }
    .map_with(|w, e| Spanned::new(w, span_range(&e.span())));

    let define = select! {
        Token::Define(kind) => kind,
    }
    .map_with(|k, e| Spanned::new(k, span_range(&e.span())));

    // key followed by the rest of the line; the value keeps its inner spacing,
    // so it is sliced out of the source rather than re-joined from words
    let property = word
        .clone()
        .then(word.repeated().collect::<Vec<_>>())
        .then_ignore(newlines.clone())
        .map_with(move |(key, words), e| {
            let value = match (words.first(), words.last()) {
                (Some(first), Some(last)) => {
                    let span = first.span.start..last.span.end;
                    let text = source.get(span.clone()).unwrap_or_default();
                    Spanned::new(text.to_string(), span)
                }
                _ => Spanned::new(String::new(), key.span.end..key.span.end),
            };
            Spanned::new(PropertyDecl { key, value }, span_range(&e.span()))
        });

    let block = define
        .then_ignore(newlines.clone())
        .then(property.repeated().collect::<Vec<_>>())
        .then_ignore(just(Token::BraceClose))
        .map_with(|(kind, properties), e| {
            Spanned::new(Block { kind, properties }, span_range(&e.span()))
        });

    // Document is a list of blocks separated by blank lines
    newlines
        .clone()
        .ignore_then(block.then_ignore(newlines).repeated().collect::<Vec<_>>())
        .then_ignore(end())
        .map(|blocks| Document { blocks })
}
