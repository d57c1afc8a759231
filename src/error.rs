use thiserror::Error;

use crate::desugar::UnknownLegacyTagError;
use crate::document::MalformedDocumentError;
use crate::eval::{EvalError, EvaluationFailed};
use crate::handler_registry::RegistryError;
use crate::matcher::{LoadError, MatcherError};
use crate::session::SessionError;
use crate::text::InvalidPatternError;

#[derive(Error, Debug)]
pub enum Error {
    // authoring time
    #[error("Document error: {0}")]
    Document(#[from] MalformedDocumentError),
    #[error("Pattern error: {0}")]
    Pattern(#[from] InvalidPatternError),
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    // conversation time
    #[error("Legacy tag error: {0}")]
    Legacy(#[from] UnknownLegacyTagError),
    #[error("Eval error: {0}")]
    Eval(#[from] EvalError),
    #[error(transparent)]
    EvaluationFailed(#[from] EvaluationFailed),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("Matcher error: {0}")]
    Matcher(#[from] MatcherError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
