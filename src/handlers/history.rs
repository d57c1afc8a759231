use super::{index_1d, index_2d, nth_capture};
use crate::document::Node;
use crate::eval::{EvalResult, EvaluationContext, Evaluator};
use crate::handler_registry::TagHandler;
use crate::session::HistoryKind;

/// `<input index="n,m"/>`: a sentence of an earlier user input.
pub struct InputHandler;

impl TagHandler for InputHandler {
    const LABEL: &'static str = "input";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        let (turn, sentence) = index_2d(node);
        evaluator.history_sentence(HistoryKind::Input, turn, sentence, context.session_id())
    }
}

/// `<that index="n,m"/>`: a sentence of an earlier bot response.
pub struct ThatHandler;

impl TagHandler for ThatHandler {
    const LABEL: &'static str = "that";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        let (turn, sentence) = index_2d(node);
        evaluator.history_sentence(HistoryKind::That, turn, sentence, context.session_id())
    }
}

pub struct StarHandler;

impl TagHandler for StarHandler {
    const LABEL: &'static str = "star";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        _evaluator: &Evaluator,
    ) -> EvalResult<String> {
        Ok(nth_capture(&context.stars().input, index_1d(node)))
    }
}

pub struct ThatStarHandler;

impl TagHandler for ThatStarHandler {
    const LABEL: &'static str = "thatstar";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        _evaluator: &Evaluator,
    ) -> EvalResult<String> {
        Ok(nth_capture(&context.stars().that, index_1d(node)))
    }
}

pub struct TopicStarHandler;

impl TagHandler for TopicStarHandler {
    const LABEL: &'static str = "topicstar";

    fn process(
        &self,
        node: &Node,
        context: &mut EvaluationContext,
        _evaluator: &Evaluator,
    ) -> EvalResult<String> {
        Ok(nth_capture(&context.stars().topic, index_1d(node)))
    }
}
