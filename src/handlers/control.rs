use crate::document::Node;
use crate::eval::{EvalError, EvalResult, EvaluationContext, Evaluator};
use crate::handler_registry::TagHandler;
use crate::session::SessionId;
use crate::text::{compile_pattern, pattern_fit};

fn list_items(node: &Node) -> Vec<&Node> {
    node.children()
        .iter()
        .filter(|child| child.is_named("li"))
        .collect()
}

/// Evaluates one uniformly chosen `<li>`.
pub struct RandomHandler;

impl TagHandler for RandomHandler {
    const LABEL: &'static str = "random";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        let items = list_items(node);
        let chosen = match items.len() {
            0 => return Ok(String::new()),
            1 => items[0],
            count => items[context.choose(count)],
        };
        evaluator.evaluate(chosen.children(), context)
    }
}

/// `<condition>` in its three forms.
///
/// * `name` and `value`: the content is evaluated when the predicate matches.
/// * `name` only: the first `<li value="...">` that matches is evaluated.
/// * neither: the first `<li name="..." value="...">` that matches is
///   evaluated.
///
/// In the list forms an `<li>` without a guard always matches. Values are
/// patterns compared case-insensitively against the predicate, both brought
/// into pattern form first.
pub struct ConditionHandler;

impl ConditionHandler {
    fn predicate_matches(
        name: &str,
        value: &str,
        session_id: &SessionId,
        evaluator: &Evaluator,
    ) -> EvalResult<bool> {
        // both sides in pattern form
        let predicate = pattern_fit(&evaluator.predicate(name, session_id)?);
        let pattern = pattern_fit(value);
        match compile_pattern(&pattern, true) {
            Ok(matcher) => Ok(matcher.is_match(&predicate)),
            Err(e) => {
                tracing::warn!("condition on \"{}\" never matches: {}", name, e);
                Ok(false)
            }
        }
    }
}

impl TagHandler for ConditionHandler {
    const LABEL: &'static str = "condition";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        let attributes = node.attributes();
        let name = attributes.get("name");
        let value = attributes.get("value");

        if let (Some(name), Some(value)) = (name, value) {
            return if Self::predicate_matches(name, value, context.session_id(), evaluator)? {
                evaluator.evaluate(node.children(), context)
            } else {
                Ok(String::new())
            };
        }

        for item in list_items(node) {
            let item_attributes = item.attributes();
            let guard = match (name, item_attributes.get("name"), item_attributes.get("value")) {
                (Some(name), _, Some(value)) => Some((name, value)),
                (Some(_), _, None) => None,
                (None, Some(name), Some(value)) => Some((name, value)),
                (None, None, None) => None,
                (None, _, _) => {
                    tracing::warn!("skipping <li> with an incomplete guard in <condition>");
                    continue;
                }
            };
            let selected = match guard {
                Some((name, value)) => {
                    Self::predicate_matches(name, value, context.session_id(), evaluator)?
                }
                None => true,
            };
            if selected {
                return evaluator.evaluate(item.children(), context);
            }
        }
        Ok(String::new())
    }
}

/// Self-query. The depth limit turns into the configured placeholder text.
pub struct SraiHandler;

impl TagHandler for SraiHandler {
    const LABEL: &'static str = "srai";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        let query = evaluator.evaluate(node.children(), context)?;
        match evaluator.self_query(&query, context) {
            Err(EvalError::RecursionLimitExceeded { depth, limit }) => {
                tracing::warn!(
                    "self-query \"{}\" stopped at depth {} (limit {})",
                    query.trim(),
                    depth,
                    limit
                );
                Ok(evaluator.config().recursion_fallback.clone())
            }
            result => result,
        }
    }
}
