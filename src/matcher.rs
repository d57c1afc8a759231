//! Category lookup.
//!
//! The evaluator depends only on the [`Matcher`] trait. [`CategoryMatcher`]
//! is a small linear-scan implementation over compiled patterns, enough to
//! drive the engine end to end.

use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{parse_document, Document, MalformedDocumentError};
use crate::eval::MatchStars;
use crate::text::{compile_pattern, InvalidPatternError, PatternMatcher};

#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub template: Arc<Document>,
    pub stars: MatchStars,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatcherError {
    #[error("Matcher unavailable: {0}")]
    Unavailable(String),
    #[error("Lookup failed: {0}")]
    Lookup(String),
}

pub type MatcherResult<T> = Result<T, MatcherError>;

#[mockall::automock]
pub trait Matcher: Send + Sync {
    /// Finds the category for an already normalized input and its `that` and
    /// `topic` context.
    fn match_input(&self, input: &str, that: &str, topic: &str)
        -> MatcherResult<Option<MatchOutcome>>;

    /// Number of categories known, reported by `<size/>`.
    fn category_count(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CategoryField {
    Pattern,
    That,
    Topic,
    Template,
}

/// Authored form of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySource {
    pub pattern: String,
    #[serde(default = "default_context")]
    pub that: String,
    #[serde(default = "default_context")]
    pub topic: String,
    pub template: String,
}

fn default_context() -> String {
    "*".to_string()
}

impl CategorySource {
    pub fn new(pattern: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            that: default_context(),
            topic: default_context(),
            template: template.into(),
        }
    }

    pub fn with_that(mut self, that: impl Into<String>) -> Self {
        self.that = that.into();
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Invalid {field} pattern: {source}")]
    Pattern {
        field: CategoryField,
        #[source]
        source: InvalidPatternError,
    },
    #[error("Malformed template: {0}")]
    Template(#[from] MalformedDocumentError),
}

/// A category that was skipped while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadDiagnostic {
    /// Position of the category in the loaded sequence, starting at 0.
    pub index: usize,
    pub field: CategoryField,
    /// The authored text that failed.
    pub offending: String,
    pub error: LoadError,
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "category {} ({} \"{}\"): {}",
            self.index, self.field, self.offending, self.error
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<LoadDiagnostic>,
}

#[derive(Debug, Clone)]
struct Category {
    pattern: PatternMatcher,
    that: PatternMatcher,
    topic: PatternMatcher,
    template: Arc<Document>,
}

type Rank = (usize, Reverse<usize>);

fn rank(pattern: &PatternMatcher) -> Rank {
    (pattern.wildcard_count(), Reverse(pattern.literal_count()))
}

impl Category {
    /// Lower is more specific: fewer wildcards first, then more literal
    /// words, field by field.
    fn specificity(&self) -> (Rank, Rank, Rank) {
        (rank(&self.pattern), rank(&self.that), rank(&self.topic))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryMatcher {
    categories: Vec<Category>,
}

fn compile_field(field: CategoryField, pattern: &str) -> Result<PatternMatcher, LoadError> {
    compile_pattern(pattern, true).map_err(|source| LoadError::Pattern { field, source })
}

impl CategoryMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn add_category(&mut self, source: &CategorySource) -> Result<(), LoadError> {
        let category = Category {
            pattern: compile_field(CategoryField::Pattern, &source.pattern)?,
            that: compile_field(CategoryField::That, &source.that)?,
            topic: compile_field(CategoryField::Topic, &source.topic)?,
            template: Arc::new(parse_document(&source.template)?),
        };
        self.categories.push(category);
        Ok(())
    }

    /// Adds every category that compiles. A bad pattern or template skips
    /// only that category and is recorded in the report.
    pub fn load_categories<I>(&mut self, sources: I) -> LoadReport
    where
        I: IntoIterator<Item = CategorySource>,
    {
        let mut report = LoadReport::default();
        for (index, source) in sources.into_iter().enumerate() {
            match self.add_category(&source) {
                Ok(()) => report.loaded += 1,
                Err(error) => {
                    let field = match &error {
                        LoadError::Pattern { field, .. } => *field,
                        LoadError::Template(_) => CategoryField::Template,
                    };
                    let offending = match field {
                        CategoryField::Pattern => source.pattern,
                        CategoryField::That => source.that,
                        CategoryField::Topic => source.topic,
                        CategoryField::Template => source.template,
                    };
                    let diagnostic = LoadDiagnostic {
                        index,
                        field,
                        offending,
                        error,
                    };
                    tracing::warn!("skipping {}", diagnostic);
                    report.skipped.push(diagnostic);
                }
            }
        }
        report
    }
}

impl Matcher for CategoryMatcher {
    fn match_input(
        &self,
        input: &str,
        that: &str,
        topic: &str,
    ) -> MatcherResult<Option<MatchOutcome>> {
        let mut best: Option<(&Category, MatchStars)> = None;
        for category in &self.categories {
            if let Some((current, _)) = &best {
                if current.specificity() <= category.specificity() {
                    continue;
                }
            }
            let (Some(input_stars), Some(that_stars), Some(topic_stars)) = (
                category.pattern.captures(input),
                category.that.captures(that),
                category.topic.captures(topic),
            ) else {
                continue;
            };
            best = Some((
                category,
                MatchStars {
                    input: input_stars,
                    that: that_stars,
                    topic: topic_stars,
                },
            ));
        }

        Ok(best.map(|(category, stars)| MatchOutcome {
            template: Arc::clone(&category.template),
            stars,
        }))
    }

    fn category_count(&self) -> usize {
        self.categories.len()
    }
}
