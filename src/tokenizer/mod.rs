pub mod attribute;
pub mod markup;
pub mod token;

pub use attribute::{parse_attributes, Attributes};
pub use token::{MalformedDocumentError, MarkupState, Span, Token, TokenSpan, Tokenizer};
