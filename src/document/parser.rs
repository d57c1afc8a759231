use super::node::{Document, Node, Tag};
use crate::text::collapse_whitespace;
use crate::tokenizer::{MalformedDocumentError, Span, Token, TokenSpan, Tokenizer};

pub type DocumentResult<T> = Result<T, MalformedDocumentError>;

struct Frame {
    tag: Tag,
    children: Vec<Node>,
    span: Span,
}

/// Parses authored markup into a node tree.
///
/// Whitespace runs in text are collapsed to a single space; literal blocks
/// and comments are kept verbatim. Processing instructions are dropped.
#[tracing::instrument(level = "debug", skip(raw))]
pub fn parse_document(raw: &str) -> DocumentResult<Document> {
    let tokens = Tokenizer::new().tokenize(raw)?;
    build_tree(tokens)
}

fn build_tree(tokens: Vec<TokenSpan>) -> DocumentResult<Document> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token_span in tokens {
        let span = token_span.span();
        let node = match token_span.token {
            Token::Text(text) => Node::Text(collapse_whitespace(&text)),
            Token::LiteralBlock(text) => Node::LiteralBlock(text),
            Token::Comment(text) => Node::Comment(text),
            Token::EmptyTag { name, attributes } => Node::SelfClosing(Tag::new(name, attributes)),
            Token::StartTag { name, attributes } => {
                stack.push(Frame {
                    tag: Tag::new(name, attributes),
                    children: Vec::new(),
                    span,
                });
                continue;
            }
            Token::EndTag(name) => match stack.pop() {
                Some(frame) if frame.tag.name() == name => {
                    Node::element(frame.tag, frame.children)
                }
                Some(frame) => {
                    return Err(MalformedDocumentError::UnmatchedEndTag {
                        expected: frame.tag.name().to_string(),
                        found: name,
                        span,
                    })
                }
                None => return Err(MalformedDocumentError::StrayEndTag { found: name, span }),
            },
        };

        match stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => root.push(node),
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(MalformedDocumentError::UnclosedElement {
            name: frame.tag.name().to_string(),
            span: frame.span,
        });
    }

    Ok(Document::new(root))
}
