use std::sync::Arc;

use thiserror::Error;

use super::context::{EvaluationContext, MatchStars};
use crate::config::EngineConfig;
use crate::desugar::{Desugarer, UnknownLegacyTagError};
use crate::document::{Document, Node};
use crate::handler_registry::HandlerRegistry;
use crate::matcher::{Matcher, MatcherError};
use crate::session::{HistoryKind, HistorySlot, Session, SessionError, SessionId};
use crate::text::{normalize_input, remove_markup, sentence_split};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A self-query would go deeper than the configured maximum
    #[error("Recursion depth {depth} exceeds limit {limit}")]
    RecursionLimitExceeded { depth: usize, limit: usize },

    /// Step count or wall-clock budget of the turn used up
    #[error("Evaluation budget exceeded: {0}")]
    BudgetExceeded(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Matcher error: {0}")]
    Matcher(#[from] MatcherError),

    /// A handler asked for a rewrite that does not exist
    #[error("Legacy tag error: {0}")]
    Legacy(#[from] UnknownLegacyTagError),

    #[error("Handler <{tag}> failed: {message}")]
    Handler { tag: String, message: String },
}

pub type EvalResult<T> = Result<T, EvalError>;

/// A top-level evaluation that did not complete. No partial output survives.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Evaluation failed: {0}")]
pub struct EvaluationFailed(#[from] pub EvalError);

/// Tree-walking template interpreter.
///
/// Holds the read-only registry and configuration plus the two external
/// collaborators. One evaluator serves any number of sessions; all
/// per-turn state lives in [`EvaluationContext`].
pub struct Evaluator {
    registry: Arc<HandlerRegistry>,
    config: Arc<EngineConfig>,
    desugarer: Desugarer,
    session: Arc<dyn Session>,
    matcher: Arc<dyn Matcher>,
}

impl Evaluator {
    pub fn new(
        registry: Arc<HandlerRegistry>,
        config: Arc<EngineConfig>,
        session: Arc<dyn Session>,
        matcher: Arc<dyn Matcher>,
    ) -> Self {
        let desugarer = Desugarer::new(config.support_deprecated_tags);
        Self {
            registry,
            config,
            desugarer,
            session,
            matcher,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn session(&self) -> &dyn Session {
        self.session.as_ref()
    }

    pub fn matcher(&self) -> &dyn Matcher {
        self.matcher.as_ref()
    }

    /// Runs a matched template for one turn and returns its trimmed output.
    #[tracing::instrument(level = "debug", skip(self, template, stars))]
    pub fn render_template(
        &self,
        template: &Document,
        session_id: &SessionId,
        stars: MatchStars,
    ) -> Result<String, EvaluationFailed> {
        let mut context = EvaluationContext::new(session_id.clone(), stars, &self.config);
        let output = self.evaluate(template.nodes(), &mut context)?;
        tracing::debug!("rendered template in {} steps", context.steps());
        Ok(output.trim().to_string())
    }

    /// Evaluates siblings left to right and concatenates their output.
    pub fn evaluate(&self, nodes: &[Node], context: &mut EvaluationContext) -> EvalResult<String> {
        let mut output = String::new();
        for node in nodes {
            output.push_str(&self.evaluate_node(node, context)?);
        }
        Ok(output)
    }

    pub fn evaluate_node(&self, node: &Node, context: &mut EvaluationContext) -> EvalResult<String> {
        context.tick()?;
        match node {
            Node::Text(text) | Node::LiteralBlock(text) => Ok(text.clone()),
            Node::Comment(_) => Ok(String::new()),
            Node::Element { .. } | Node::SelfClosing(_) => self.dispatch(node, context, true),
        }
    }

    /// Handler first, then a legacy rewrite, then verbatim pass-through.
    fn dispatch(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        allow_rewrite: bool,
    ) -> EvalResult<String> {
        let name = node.name().unwrap_or_default();
        if let Some(handler) = self.registry.get(name) {
            return handler.handle(node, context, self);
        }
        if allow_rewrite {
            match self.desugarer.rewrite(node) {
                Ok(rewrite) => {
                    tracing::debug!("rewriting <{}>", name);
                    let content = if rewrite.needs_content() {
                        Some(self.evaluate(node.children(), context)?)
                    } else {
                        None
                    };
                    let synthesized = rewrite.into_node(content);
                    return self.dispatch(&synthesized, context, false);
                }
                Err(e) => tracing::debug!("{}, passing through", e),
            }
        }
        self.pass_through(node, context)
    }

    /// Reproduces the node's own markup and evaluates its children in place.
    pub fn pass_through(&self, node: &Node, context: &mut EvaluationContext) -> EvalResult<String> {
        let inner = self.evaluate(node.children(), context)?;
        Ok(format!("{}{}{}", node.open_markup(), inner, node.close_markup()))
    }

    /// Expands a star shorthand (`<person/>`, `<gender/>`, ...) and dispatches
    /// the canonical node. Used by handlers that accept a self-closing form.
    pub fn expand_shorthand(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
    ) -> EvalResult<String> {
        let synthesized = self.desugarer.rewrite(node)?.into_node(None);
        self.dispatch(&synthesized, context, false)
    }

    /// Matches `query` like user input and evaluates the result one level
    /// deeper. No match yields an empty string.
    pub fn self_query(&self, query: &str, context: &EvaluationContext) -> EvalResult<String> {
        let normalized = normalize_input(query);
        let that = self.that_context(context.session_id())?;
        let topic = self.topic_context(context.session_id())?;

        let Some(outcome) = self.matcher.match_input(&normalized, &that, &topic)? else {
            tracing::debug!("self-query \"{}\" matched nothing", normalized);
            return Ok(String::new());
        };
        let mut nested = context.nested(outcome.stars, self.config.max_recursion_depth)?;
        self.evaluate(outcome.template.nodes(), &mut nested)
    }

    /// Predicate value, or the configured default when unset.
    pub fn predicate(&self, name: &str, session_id: &SessionId) -> EvalResult<String> {
        Ok(self
            .session
            .get_predicate(name, session_id)?
            .unwrap_or_else(|| self.config.default_predicate_value.clone()))
    }

    /// The `sentence`-th sentence from the end of the `turn`-th most recent
    /// history entry. Out of range yields an empty string.
    pub fn history_sentence(
        &self,
        kind: HistoryKind,
        turn: usize,
        sentence: usize,
        session_id: &SessionId,
    ) -> EvalResult<String> {
        if turn == 0 || sentence == 0 {
            return Ok(String::new());
        }
        let Some(entry) = self
            .session
            .get_history(HistorySlot { kind, index: turn }, session_id)?
        else {
            return Ok(String::new());
        };
        let sentences = sentence_split(&self.config.sentence_splitters, &entry);
        Ok(sentences
            .len()
            .checked_sub(sentence)
            .and_then(|index| sentences.get(index))
            .map(|s| remove_markup(s))
            .unwrap_or_default())
    }

    /// Normalized last sentence of the previous response, `*` if none.
    pub fn that_context(&self, session_id: &SessionId) -> EvalResult<String> {
        let that = normalize_input(&self.history_sentence(HistoryKind::That, 1, 1, session_id)?);
        Ok(if that.is_empty() { "*".to_string() } else { that })
    }

    /// Normalized `topic` predicate, the configured default if unset or empty.
    pub fn topic_context(&self, session_id: &SessionId) -> EvalResult<String> {
        let topic = self
            .session
            .get_predicate("topic", session_id)?
            .map(|t| normalize_input(&t))
            .unwrap_or_default();
        Ok(if topic.is_empty() {
            self.config.default_topic.clone()
        } else {
            topic
        })
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("registry", &self.registry)
            .field("desugarer", &self.desugarer)
            .finish()
    }
}
