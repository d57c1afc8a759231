mod context;
mod evaluator;

pub use context::{EvaluationContext, MatchStars};
pub use evaluator::{EvalError, EvalResult, EvaluationFailed, Evaluator};
