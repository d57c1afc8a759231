#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use aiml_engine::{
    matcher::MatcherResult, parse_document, CategoryMatcher, CategorySource, Document,
    EngineConfig, EvaluationFailed, Evaluator, HandlerRegistry, HistoryKind, InMemorySession,
    MatchOutcome, MatchStars, Matcher, Session, SessionId,
};

/// Maps normalized inputs to templates, ignoring `that` and `topic`.
#[derive(Default)]
pub struct StubMatcher {
    templates: HashMap<String, Arc<Document>>,
}

impl StubMatcher {
    pub fn with(mut self, input: &str, template: &str) -> Self {
        self.templates
            .insert(input.to_string(), Arc::new(parse_document(template).unwrap()));
        self
    }
}

impl Matcher for StubMatcher {
    fn match_input(
        &self,
        input: &str,
        _that: &str,
        _topic: &str,
    ) -> MatcherResult<Option<MatchOutcome>> {
        Ok(self.templates.get(input).map(|template| MatchOutcome {
            template: Arc::clone(template),
            stars: MatchStars::default(),
        }))
    }

    fn category_count(&self) -> usize {
        self.templates.len()
    }
}

pub struct Harness {
    pub evaluator: Evaluator,
    pub session: Arc<InMemorySession>,
    pub session_id: SessionId,
}

impl Harness {
    pub fn new(config: EngineConfig, matcher: Arc<dyn Matcher>) -> Self {
        let session = Arc::new(InMemorySession::new(config.max_history));
        let evaluator = Evaluator::new(
            Arc::new(HandlerRegistry::standard().unwrap()),
            Arc::new(config),
            Arc::clone(&session) as Arc<dyn Session>,
            matcher,
        );
        Self {
            evaluator,
            session,
            session_id: SessionId::from("user-1"),
        }
    }

    pub fn plain() -> Self {
        Self::new(EngineConfig::default(), Arc::new(StubMatcher::default()))
    }

    pub fn with_categories(config: EngineConfig, categories: Vec<CategorySource>) -> Self {
        let mut matcher = CategoryMatcher::new();
        let report = matcher.load_categories(categories);
        assert!(report.skipped.is_empty(), "{:?}", report.skipped);
        Self::new(config, Arc::new(matcher))
    }

    pub fn try_render(&self, markup: &str, stars: MatchStars) -> Result<String, EvaluationFailed> {
        let template = parse_document(markup).unwrap();
        self.evaluator
            .render_template(&template, &self.session_id, stars)
    }

    pub fn render(&self, markup: &str) -> String {
        self.try_render(markup, MatchStars::default()).unwrap()
    }

    pub fn render_with_stars(&self, markup: &str, stars: MatchStars) -> String {
        self.try_render(markup, stars).unwrap()
    }

    pub fn set(&self, name: &str, value: &str) {
        self.session
            .set_predicate(name, &self.session_id, value)
            .unwrap();
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.session.get_predicate(name, &self.session_id).unwrap()
    }

    /// Records one finished turn: the input first, then the reply.
    pub fn exchange(&self, input: &str, response: &str) {
        self.session
            .push_history(HistoryKind::Input, &self.session_id, input)
            .unwrap();
        self.session
            .push_history(HistoryKind::That, &self.session_id, response)
            .unwrap();
    }
}
