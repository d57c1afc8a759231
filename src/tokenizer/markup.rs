use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_until},
    character::complete::char,
    combinator::{map, peek, value},
    error::{context, ErrorKind, ParseError, VerboseError},
    sequence::{delimited, preceded, terminated},
};

use super::token::{MarkupState, ParserResult, Token};

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_text(input: &str) -> ParserResult<Token> {
    context(
        "text",
        map(take_till1(|c: char| c == '<'), |text: &str| {
            Token::Text(text.to_string())
        }),
    )(input)
}

/// Peeks past `<` to pick the state for the construct that follows.
pub fn parse_tag_start(input: &str) -> ParserResult<MarkupState> {
    context(
        "tag start",
        preceded(
            char('<'),
            peek(alt((
                value(MarkupState::Comment, tag("!--")),
                value(MarkupState::ProcessingInstruction, tag("?")),
                value(MarkupState::LiteralBlock, tag("![CDATA[")),
                value(MarkupState::EndTag, tag("/")),
            ))),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_comment(input: &str) -> ParserResult<Token> {
    context(
        "comment",
        map(
            delimited(tag("<!--"), take_until("-->"), tag("-->")),
            |content: &str| Token::Comment(content.to_string()),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_literal_block(input: &str) -> ParserResult<Token> {
    context(
        "literal block",
        map(
            delimited(tag("<![CDATA["), take_until("]]>"), tag("]]>")),
            |content: &str| Token::LiteralBlock(content.to_string()),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_processing_instruction(input: &str) -> ParserResult<&str> {
    context(
        "processing instruction",
        delimited(tag("<?"), take_until("?>"), tag("?>")),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_end_tag(input: &str) -> ParserResult<Token> {
    context(
        "end tag",
        map(
            delimited(tag("</"), tag_body, char('>')),
            |body: &str| Token::EndTag(body.trim().to_string()),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_open_or_empty_tag(input: &str) -> ParserResult<Token> {
    context(
        "open or empty tag",
        map(delimited(char('<'), tag_body, char('>')), split_tag_body),
    )(input)
}

fn split_tag_body(body: &str) -> Token {
    let (body, empty) = match body.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (body, false),
    };
    let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
    let name = body[..name_end].to_string();
    let attributes = body[name_end..].to_string();

    if empty {
        Token::EmptyTag { name, attributes }
    } else {
        Token::StartTag { name, attributes }
    }
}

/// Everything up to the closing `>` of a tag. Quoted attribute values may
/// contain `>`; an unquoted `<` means the tag was never closed.
fn tag_body(input: &str) -> ParserResult<&str> {
    let mut quote: Option<char> = None;
    for (index, c) in input.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Ok((&input[index..], &input[..index])),
            (None, '<') => break,
            (None, _) => {}
        }
    }
    Err(nom::Err::Error(VerboseError::from_error_kind(
        input,
        ErrorKind::TakeUntil,
    )))
}
