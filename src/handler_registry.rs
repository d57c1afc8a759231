//! Tag name to handler lookup.
//!
//! Handlers are registered explicitly at startup through
//! [`HandlerRegistryBuilder`]; the finished [`HandlerRegistry`] is read-only
//! and can be shared across threads.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::document::Node;
use crate::eval::{EvalResult, EvaluationContext, Evaluator};
use crate::handlers;

/// Version of the tag set installed by [`HandlerRegistry::standard`].
pub const STANDARD_TAG_SET_VERSION: &str = "1.0.1";

/// Evaluates one tag name.
pub trait TagHandler: Send + Sync {
    /// Exact tag name this handler is bound to.
    const LABEL: &'static str;

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String>;
}

/// Object-safe view of a [`TagHandler`], used for storage.
pub trait DynTagHandler: Send + Sync {
    fn label(&self) -> &'static str;

    fn handle(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String>;
}

impl<H: TagHandler> DynTagHandler for H {
    fn label(&self) -> &'static str {
        H::LABEL
    }

    fn handle(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        self.process(node, context, evaluator)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Duplicate handler registered for <{label}>")]
    DuplicateLabel { label: String },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Default)]
pub struct HandlerRegistryBuilder {
    handlers: Vec<Arc<dyn DynTagHandler>>,
}

impl HandlerRegistryBuilder {
    pub fn register<H: TagHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    pub fn build(self) -> RegistryResult<HandlerRegistry> {
        let mut handlers: HashMap<&'static str, Arc<dyn DynTagHandler>> = HashMap::new();
        for handler in self.handlers {
            let label = handler.label();
            if handlers.insert(label, handler).is_some() {
                return Err(RegistryError::DuplicateLabel {
                    label: label.to_string(),
                });
            }
        }
        tracing::debug!("built handler registry with {} tags", handlers.len());
        Ok(HandlerRegistry { handlers })
    }
}

pub struct HandlerRegistry {
    handlers: HashMap<&'static str, Arc<dyn DynTagHandler>>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Every tag the engine understands natively.
    pub fn standard() -> RegistryResult<Self> {
        handlers::register_standard(Self::builder()).build()
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTagHandler> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered labels, sorted.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<_> = self.handlers.keys().copied().collect();
        labels.sort_unstable();
        labels
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("labels", &self.labels())
            .finish()
    }
}
