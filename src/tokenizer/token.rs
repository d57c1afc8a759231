use nom::error::VerboseError;
use nom::IResult;
use strum_macros::Display;
use thiserror::Error;

use super::markup::{
    parse_comment, parse_end_tag, parse_literal_block, parse_open_or_empty_tag,
    parse_processing_instruction, parse_tag_start, parse_text,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    StartTag { name: String, attributes: String },
    EmptyTag { name: String, attributes: String },
    EndTag(String),
    LiteralBlock(String),
    Comment(String),
}

/// States of the markup scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MarkupState {
    Text,
    TagStart,
    OpenOrEmptyTag,
    EndTag,
    LiteralBlock,
    Comment,
    ProcessingInstruction,
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    current_position: usize,
    current_line: usize,
    current_column: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            current_position: 0,
            current_line: 1,   // 1-based
            current_column: 1, // 1-based
        }
    }

    #[tracing::instrument(level = "debug", skip(input))]
    pub fn tokenize(&mut self, input: &str) -> TokenizerResult<Vec<TokenSpan>> {
        let mut tokens = Vec::new();
        let mut remaining = input;
        let mut state = MarkupState::Text;

        while !remaining.is_empty() {
            let start_position = self.current_position;
            let start_line = self.current_line;
            let start_column = self.current_column;

            let result = match state {
                MarkupState::Text if remaining.starts_with('<') => {
                    state = MarkupState::TagStart;
                    continue;
                }
                MarkupState::Text => parse_text(remaining).map(|(rest, token)| (rest, Some(token))),
                MarkupState::TagStart => {
                    state = match parse_tag_start(remaining) {
                        Ok((_, next)) => next,
                        Err(_) => MarkupState::OpenOrEmptyTag,
                    };
                    continue;
                }
                MarkupState::OpenOrEmptyTag => {
                    parse_open_or_empty_tag(remaining).map(|(rest, token)| (rest, Some(token)))
                }
                MarkupState::EndTag => {
                    parse_end_tag(remaining).map(|(rest, token)| (rest, Some(token)))
                }
                MarkupState::LiteralBlock => {
                    parse_literal_block(remaining).map(|(rest, token)| (rest, Some(token)))
                }
                MarkupState::Comment => {
                    parse_comment(remaining).map(|(rest, token)| (rest, Some(token)))
                }
                MarkupState::ProcessingInstruction => {
                    parse_processing_instruction(remaining).map(|(rest, _)| (rest, None))
                }
            };

            match result {
                Ok((new_remaining, token)) => {
                    let consumed = &remaining[..(remaining.len() - new_remaining.len())];
                    self.update_position(consumed);
                    let span = Span {
                        start: start_position,
                        end: self.current_position,
                        line: start_line,
                        column: start_column,
                    };

                    if let Some(token) = token {
                        if let Some(error) = check_tag_name(&token, consumed, &span) {
                            tracing::error!("{}", error);
                            return Err(error);
                        }
                        tokens.push(TokenSpan {
                            token,
                            start: span.start,
                            end: span.end,
                            line: span.line,
                            column: span.column,
                        });
                    }

                    remaining = new_remaining;
                    state = MarkupState::Text;
                }
                Err(e) => {
                    let found = remaining.chars().take(20).collect::<String>();
                    let span = Span {
                        start: self.current_position,
                        end: self.current_position + 1,
                        line: self.current_line,
                        column: self.current_column,
                    };
                    let message = match e {
                        nom::Err::Incomplete(e) => format!("Incomplete input, {:?}", e),
                        nom::Err::Error(e) | nom::Err::Failure(e) => {
                            nom::error::convert_error(remaining, e)
                        }
                    };
                    let error = MalformedDocumentError::Unterminated {
                        construct: state,
                        message,
                        found,
                        span,
                    };
                    tracing::error!("{}", error);
                    return Err(error);
                }
            }
        }

        Ok(tokens)
    }

    fn update_position(&mut self, text: &str) {
        for c in text.chars() {
            self.current_position += c.len_utf8();
            if c == '\n' {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
        }
    }
}

fn check_tag_name(token: &Token, consumed: &str, span: &Span) -> Option<MalformedDocumentError> {
    let name = match token {
        Token::StartTag { name, .. } | Token::EmptyTag { name, .. } | Token::EndTag(name) => name,
        _ => return None,
    };
    if name.is_empty() {
        Some(MalformedDocumentError::EmptyTagName {
            found: consumed.chars().take(20).collect(),
            span: span.clone(),
        })
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct TokenSpan {
    pub token: Token,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl TokenSpan {
    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end,
            line: self.line,
            column: self.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line: {}, column: {}, start: {}, end: {}",
            self.line, self.column, self.start, self.end
        )
    }
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

pub type TokenizerResult<T> = Result<T, MalformedDocumentError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedDocumentError {
    #[error("Unterminated {construct} at position {span}, found \"{found}\": {message}")]
    Unterminated {
        construct: MarkupState,
        message: String,
        found: String,
        span: Span,
    },
    #[error("Missing tag name at position {span}, found \"{found}\"")]
    EmptyTagName { found: String, span: Span },
    #[error("End tag </{found}> does not close <{expected}> at position {span}")]
    UnmatchedEndTag {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("End tag </{found}> has no open element at position {span}")]
    StrayEndTag { found: String, span: Span },
    #[error("Element <{name}> opened at position {span} is never closed")]
    UnclosedElement { name: String, span: Span },
}

impl MalformedDocumentError {
    pub fn span(&self) -> &Span {
        match self {
            Self::Unterminated { span, .. }
            | Self::EmptyTagName { span, .. }
            | Self::UnmatchedEndTag { span, .. }
            | Self::StrayEndTag { span, .. }
            | Self::UnclosedElement { span, .. } => span,
        }
    }
}
