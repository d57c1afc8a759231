//! Standard tag handlers.

mod control;
mod history;
mod meta;
mod predicate;
mod transform;

pub use control::{ConditionHandler, RandomHandler, SraiHandler};
pub use history::{InputHandler, StarHandler, ThatHandler, ThatStarHandler, TopicStarHandler};
pub use meta::{DateHandler, IdHandler, SizeHandler, VersionHandler};
pub use predicate::{BotHandler, GetHandler, SetHandler};
pub use transform::{
    FormalHandler, GenderHandler, LowercaseHandler, Person2Handler, PersonHandler,
    SentenceHandler, ThinkHandler, UppercaseHandler,
};

use crate::document::Node;
use crate::handler_registry::HandlerRegistryBuilder;

pub(crate) fn register_standard(builder: HandlerRegistryBuilder) -> HandlerRegistryBuilder {
    builder
        .register(StarHandler)
        .register(ThatStarHandler)
        .register(TopicStarHandler)
        .register(InputHandler)
        .register(ThatHandler)
        .register(GetHandler)
        .register(SetHandler)
        .register(BotHandler)
        .register(ThinkHandler)
        .register(UppercaseHandler)
        .register(LowercaseHandler)
        .register(FormalHandler)
        .register(SentenceHandler)
        .register(PersonHandler)
        .register(Person2Handler)
        .register(GenderHandler)
        .register(RandomHandler)
        .register(ConditionHandler)
        .register(SraiHandler)
        .register(DateHandler)
        .register(IdHandler)
        .register(SizeHandler)
        .register(VersionHandler)
}

/// `index="n"`, default 1. Unparsable values fall back to the default.
pub(crate) fn index_1d(node: &Node) -> usize {
    match node.attribute("index") {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::debug!("invalid index \"{}\" on <{}>", value, node.name().unwrap_or_default());
            1
        }),
        None => 1,
    }
}

/// `index="n,m"` or `index="n"`, default `(1, 1)`.
pub(crate) fn index_2d(node: &Node) -> (usize, usize) {
    let Some(value) = node.attribute("index") else {
        return (1, 1);
    };
    let mut parts = value.split(',').map(|part| part.trim().parse::<usize>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(first)), None, None) => (first, 1),
        (Some(Ok(first)), Some(Ok(second)), None) => (first, second),
        _ => {
            tracing::debug!("invalid index \"{}\" on <{}>", value, node.name().unwrap_or_default());
            (1, 1)
        }
    }
}

/// 1-based lookup; 0 and out-of-range give an empty string.
pub(crate) fn nth_capture(captures: &[String], index: usize) -> String {
    index
        .checked_sub(1)
        .and_then(|i| captures.get(i))
        .cloned()
        .unwrap_or_default()
}
