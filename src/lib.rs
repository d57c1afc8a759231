//! # aiml-engine
//!
//! Template execution core for an AIML-style chatbot.
//!
//! Authors write categories: a match pattern and a response template in a
//! small markup language. At conversation time a [`Matcher`] picks the
//! category for the user's input and the [`Evaluator`] runs its template,
//! reading and writing per-session state through [`Session`] and issuing
//! recursive self-queries for `<srai>`.
//!
//! ## Pipeline
//!
//! ```text
//! raw markup --parse_document--> Document --Evaluator--> response text
//!                                   |
//!                 HandlerRegistry (tag -> handler), Desugarer (legacy tags)
//! ```
//!
//! * [`text`]: substitution, normalization, pattern compilation, pronoun
//!   shifting.
//! * [`tokenizer`] and [`document`]: the markup state machine and tree
//!   builder.
//! * [`handler_registry`] and [`handlers`]: the fixed tag set.
//! * [`desugar`]: deprecated and shorthand tags rewritten to canonical ones.
//! * [`eval`]: the tree-walking interpreter with bounded recursion and a per
//!   turn step and time budget.
//! * [`engine`]: one call per user turn.
//!
//! ```
//! use std::sync::Arc;
//! use aiml_engine::{CategoryMatcher, CategorySource, Engine, EngineConfig, InMemorySession, SessionId};
//!
//! let mut matcher = CategoryMatcher::new();
//! matcher.load_categories(vec![
//!     CategorySource::new("HELLO", "Hi there!"),
//!     CategorySource::new("HI", "<srai>HELLO</srai>"),
//! ]);
//! let engine = Engine::standard(
//!     EngineConfig::default(),
//!     Arc::new(InMemorySession::default()),
//!     Arc::new(matcher),
//! )
//! .unwrap();
//! assert_eq!(engine.respond("hi", &SessionId::from("demo")), "Hi there!");
//! ```

pub mod config;
pub mod desugar;
pub mod document;
pub mod engine;
pub mod error;
pub mod eval;
pub mod handler_registry;
pub mod handlers;
pub mod matcher;
pub mod session;
pub mod text;
pub mod tokenizer;

// Re-exports
pub use config::EngineConfig;
pub use desugar::{Desugarer, Rewrite, UnknownLegacyTagError};
pub use document::{parse_document, Document, MalformedDocumentError, Node, NodeKind, Tag};
pub use engine::Engine;
pub use error::*;
pub use eval::{EvalError, EvalResult, EvaluationContext, EvaluationFailed, Evaluator, MatchStars};
pub use handler_registry::{
    HandlerRegistry, RegistryError, TagHandler, STANDARD_TAG_SET_VERSION,
};
pub use matcher::{
    CategoryMatcher, CategorySource, LoadReport, MatchOutcome, Matcher, MatcherError,
};
pub use session::{HistoryKind, HistorySlot, InMemorySession, Session, SessionError, SessionId};
