//! Parsed template trees.
//!
//! [`parse_document`] turns authored markup into a [`Document`]: an ordered
//! list of [`Node`]s. Elements own their children; self-closing tags,
//! text, literal blocks and comments are leaves. `Display` on either type
//! serializes back to markup.

mod node;
mod parser;

pub use crate::tokenizer::{Attributes, MalformedDocumentError, Span};
pub use node::{Document, Node, NodeKind, Tag};
pub use parser::{parse_document, DocumentResult};
