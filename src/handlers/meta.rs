use std::fmt::Write;

use chrono::Local;

use crate::document::Node;
use crate::eval::{EvalResult, EvaluationContext, Evaluator};
use crate::handler_registry::TagHandler;

/// `<date format="..."/>`: local time, strftime syntax.
pub struct DateHandler;

impl TagHandler for DateHandler {
    const LABEL: &'static str = "date";

    fn process(
        &self,
        node: &Node,
        _context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        let default_format = &evaluator.config().date_format;
        let format = node.attribute("format").unwrap_or_else(|| default_format.clone());
        let now = Local::now();

        let mut output = String::new();
        if write!(output, "{}", now.format(&format)).is_ok() {
            return Ok(output);
        }
        tracing::warn!("invalid date format \"{}\", using \"{}\"", format, default_format);
        output.clear();
        match write!(output, "{}", now.format(default_format)) {
            Ok(()) => Ok(output),
            Err(_) => Ok(now.to_rfc2822()),
        }
    }
}

pub struct IdHandler;

impl TagHandler for IdHandler {
    const LABEL: &'static str = "id";

    fn process(
        &self,
        _node: &Node,
        context: &mut EvaluationContext,
        _evaluator: &Evaluator,
    ) -> EvalResult<String> {
        Ok(context.session_id().to_string())
    }
}

/// Number of loaded categories.
pub struct SizeHandler;

impl TagHandler for SizeHandler {
    const LABEL: &'static str = "size";

    fn process(
        &self,
        _node: &Node,
        _context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        Ok(evaluator.matcher().category_count().to_string())
    }
}

pub struct VersionHandler;

impl TagHandler for VersionHandler {
    const LABEL: &'static str = "version";

    fn process(
        &self,
        _node: &Node,
        _context: &mut EvaluationContext,
        evaluator: &Evaluator,
    ) -> EvalResult<String> {
        Ok(evaluator.config().version.clone())
    }
}
