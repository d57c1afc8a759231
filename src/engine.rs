//! Turn-level entry point tying the evaluator to a session and a matcher.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::eval::{EvaluationFailed, Evaluator};
use crate::handler_registry::{HandlerRegistry, RegistryResult};
use crate::matcher::Matcher;
use crate::session::{HistoryKind, Session, SessionId};
use crate::text::{normalize_input, sentence_split, substitute_ignore_case};

pub struct Engine {
    evaluator: Evaluator,
}

impl Engine {
    pub fn new(
        registry: Arc<HandlerRegistry>,
        config: Arc<EngineConfig>,
        session: Arc<dyn Session>,
        matcher: Arc<dyn Matcher>,
    ) -> Self {
        Self {
            evaluator: Evaluator::new(registry, config, session, matcher),
        }
    }

    /// Engine with the standard tag set.
    pub fn standard(
        config: EngineConfig,
        session: Arc<dyn Session>,
        matcher: Arc<dyn Matcher>,
    ) -> RegistryResult<Self> {
        Ok(Self::new(
            Arc::new(HandlerRegistry::standard()?),
            Arc::new(config),
            session,
            matcher,
        ))
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Answers one user turn.
    ///
    /// Input substitutions run over the whole input first. Each sentence is
    /// then pushed onto the input history, matched and rendered on its own,
    /// and its reply is pushed onto the `that` history before the next
    /// sentence is matched. A sentence that fails or matches nothing
    /// contributes the configured fallback response. Non-empty replies are
    /// joined with a space.
    #[tracing::instrument(level = "debug", skip(self, input))]
    pub fn respond(&self, input: &str, session_id: &SessionId) -> String {
        let config = self.evaluator.config();
        let substituted = substitute_ignore_case(&config.substitutions.input, input);
        let replies: Vec<String> = sentence_split(&config.sentence_splitters, &substituted)
            .iter()
            .map(|sentence| self.respond_sentence(sentence, session_id))
            .filter(|reply| !reply.is_empty())
            .collect();
        replies.join(" ").trim().to_string()
    }

    fn respond_sentence(&self, sentence: &str, session_id: &SessionId) -> String {
        self.record(HistoryKind::Input, session_id, sentence);
        let reply = match self.try_respond(sentence, session_id) {
            Ok(Some(reply)) => reply,
            Ok(None) => {
                tracing::debug!("no category matched \"{}\"", sentence);
                self.evaluator.config().fallback_response.clone()
            }
            Err(e) => {
                tracing::warn!("{} for \"{}\"", e, sentence);
                self.evaluator.config().fallback_response.clone()
            }
        };
        self.record(HistoryKind::That, session_id, &reply);
        reply
    }

    fn record(&self, kind: HistoryKind, session_id: &SessionId, entry: &str) {
        if let Err(e) = self.evaluator.session().push_history(kind, session_id, entry) {
            tracing::warn!("could not record {} history for {}: {}", kind, session_id, e);
        }
    }

    fn try_respond(
        &self,
        sentence: &str,
        session_id: &SessionId,
    ) -> Result<Option<String>, EvaluationFailed> {
        let input = normalize_input(sentence);
        let that = self.evaluator.that_context(session_id)?;
        let topic = self.evaluator.topic_context(session_id)?;
        let outcome = self
            .evaluator
            .matcher()
            .match_input(&input, &that, &topic)
            .map_err(|e| EvaluationFailed(e.into()))?;

        match outcome {
            Some(outcome) => self
                .evaluator
                .render_template(&outcome.template, session_id, outcome.stars)
                .map(Some),
            None => Ok(None),
        }
    }
}
