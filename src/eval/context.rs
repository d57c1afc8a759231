use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::evaluator::{EvalError, EvalResult};
use crate::config::EngineConfig;
use crate::session::SessionId;

/// Wildcard captures of the category that produced the current template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStars {
    pub input: Vec<String>,
    pub that: Vec<String>,
    pub topic: Vec<String>,
}

impl MatchStars {
    pub fn from_input<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

// Shared by a top-level context and every context nested under it.
struct TurnState {
    steps: Cell<usize>,
    max_steps: usize,
    started: Instant,
    max_duration: Duration,
    rng: RefCell<StdRng>,
}

/// State threaded through one top-level evaluation.
///
/// Nested contexts (one per `<srai>` level) share the session, the step and
/// time budget and the random source with their parent.
pub struct EvaluationContext {
    session_id: SessionId,
    stars: MatchStars,
    depth: usize,
    turn: Rc<TurnState>,
}

impl EvaluationContext {
    pub fn new(session_id: SessionId, stars: MatchStars, config: &EngineConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            session_id,
            stars,
            depth: 0,
            turn: Rc::new(TurnState {
                steps: Cell::new(0),
                max_steps: config.max_steps,
                started: Instant::now(),
                max_duration: config.max_duration,
                rng: RefCell::new(rng),
            }),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn stars(&self) -> &MatchStars {
        &self.stars
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn steps(&self) -> usize {
        self.turn.steps.get()
    }

    /// Context for a self-query one level deeper.
    pub fn nested(&self, stars: MatchStars, max_depth: usize) -> EvalResult<Self> {
        let depth = self.depth + 1;
        if depth > max_depth {
            return Err(EvalError::RecursionLimitExceeded {
                depth,
                limit: max_depth,
            });
        }
        Ok(Self {
            session_id: self.session_id.clone(),
            stars,
            depth,
            turn: Rc::clone(&self.turn),
        })
    }

    /// Counts one node visit against the step and time budget.
    pub fn tick(&self) -> EvalResult<()> {
        let steps = self.turn.steps.get() + 1;
        self.turn.steps.set(steps);
        if steps > self.turn.max_steps {
            return Err(EvalError::BudgetExceeded(format!(
                "more than {} steps",
                self.turn.max_steps
            )));
        }
        let elapsed = self.turn.started.elapsed();
        if elapsed > self.turn.max_duration {
            return Err(EvalError::BudgetExceeded(format!(
                "ran for {} ms, limit is {} ms",
                elapsed.as_millis(),
                self.turn.max_duration.as_millis()
            )));
        }
        Ok(())
    }

    /// Uniform index in `0..count`. `count` must be non-zero.
    pub fn choose(&self, count: usize) -> usize {
        self.turn.rng.borrow_mut().gen_range(0..count)
    }
}
