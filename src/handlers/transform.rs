use crate::document::Node;
use crate::eval::{EvalResult, EvaluationContext, Evaluator};
use crate::handler_registry::TagHandler;
use crate::text::{formal, sentence_case, shift_with_table, PersonShift};

fn evaluate_then<F>(
    node: &Node,
    context: &mut EvaluationContext,
    evaluator: &Evaluator,
    transform: F,
) -> EvalResult<String>
where
    F: FnOnce(&str) -> String,
{
    let content = evaluator.evaluate(node.children(), context)?;
    Ok(transform(&content))
}

pub struct UppercaseHandler;

impl TagHandler for UppercaseHandler {
    const LABEL: &'static str = "uppercase";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        evaluate_then(node, context, evaluator, str::to_uppercase)
    }
}

pub struct LowercaseHandler;

impl TagHandler for LowercaseHandler {
    const LABEL: &'static str = "lowercase";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        evaluate_then(node, context, evaluator, str::to_lowercase)
    }
}

pub struct FormalHandler;

impl TagHandler for FormalHandler {
    const LABEL: &'static str = "formal";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        evaluate_then(node, context, evaluator, formal)
    }
}

pub struct SentenceHandler;

impl TagHandler for SentenceHandler {
    const LABEL: &'static str = "sentence";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        let splitters = &evaluator.config().sentence_splitters;
        evaluate_then(node, context, evaluator, |content| {
            sentence_case(splitters, content)
        })
    }
}

// Self-closing `<person/>`, `<person2/>` and `<gender/>` stand for the same
// tag wrapped around `<star/>`.
fn shift(
    node: &Node,
    context: &mut EvaluationContext,
    evaluator: &Evaluator,
    direction: Option<PersonShift>,
) -> EvalResult<String> {
    if node.is_self_closing() {
        return evaluator.expand_shorthand(node, context);
    }
    let substitutions = &evaluator.config().substitutions;
    let table = match direction {
        Some(direction) => substitutions.person_table(direction),
        None => substitutions.gender_table(),
    };
    evaluate_then(node, context, evaluator, |content| {
        shift_with_table(table, content)
    })
}

pub struct PersonHandler;

impl TagHandler for PersonHandler {
    const LABEL: &'static str = "person";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        shift(node, context, evaluator, Some(PersonShift::FirstThird))
    }
}

pub struct Person2Handler;

impl TagHandler for Person2Handler {
    const LABEL: &'static str = "person2";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        shift(node, context, evaluator, Some(PersonShift::FirstSecond))
    }
}

pub struct GenderHandler;

impl TagHandler for GenderHandler {
    const LABEL: &'static str = "gender";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        shift(node, context, evaluator, None)
    }
}

/// Evaluates its content for side effects only.
pub struct ThinkHandler;

impl TagHandler for ThinkHandler {
    const LABEL: &'static str = "think";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        evaluator.evaluate(node.children(), context)?;
        Ok(String::new())
    }
}
