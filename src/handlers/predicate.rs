use crate::document::Node;
use crate::eval::{EvalResult, EvaluationContext, Evaluator};
use crate::handler_registry::TagHandler;

/// `<get name="x"/>`: session predicate.
pub struct GetHandler;

impl TagHandler for GetHandler {
    const LABEL: &'static str = "get";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        match node.attribute("name") {
            Some(name) => evaluator.predicate(&name, context.session_id()),
            None => {
                tracing::warn!("<get> without a name attribute");
                Ok(String::new())
            }
        }
    }
}

/// `<set name="x">value</set>`: stores the evaluated content and outputs it.
pub struct SetHandler;

impl TagHandler for SetHandler {
    const LABEL: &'static str = "set";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        let value = evaluator.evaluate(node.children(), context)?.trim().to_string();
        match node.attribute("name") {
            Some(name) => {
                evaluator
                    .session()
                    .set_predicate(&name, context.session_id(), &value)?;
            }
            None => tracing::warn!("<set> without a name attribute, value not stored"),
        }
        Ok(value)
    }
}

/// `<bot name="x"/>`: configured bot property.
pub struct BotHandler;

impl TagHandler for BotHandler {
    const LABEL: &'static str = "bot";

    fn process(
        &self,
        node: &Node,
        _context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        Ok(node
            .attribute("name")
            .and_then(|name| evaluator.config().bot_properties.get(&name).cloned())
            .unwrap_or_default())
    }
}
