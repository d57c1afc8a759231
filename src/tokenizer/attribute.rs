use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0},
    error::context,
    sequence::{delimited, preceded, separated_pair},
};

use super::token::ParserResult;
use crate::text::unescape_markup;

/// Attribute values of one tag, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// First value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn attribute_name(input: &str) -> ParserResult<&str> {
    context(
        "attribute name",
        take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')),
    )(input)
}

fn quoted_value(input: &str) -> ParserResult<&str> {
    context(
        "attribute value",
        alt((
            delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
            delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
        )),
    )(input)
}

fn attribute(input: &str) -> ParserResult<(&str, &str)> {
    context(
        "attribute",
        preceded(
            multispace0,
            separated_pair(
                attribute_name,
                delimited(multispace0, char('='), multispace0),
                quoted_value,
            ),
        ),
    )(input)
}

/// Scans `name="value"` pairs out of a tag's attribute text.
///
/// Values are unescaped. Scanning stops at the first thing that is not an
/// attribute; the rest is ignored.
pub fn parse_attributes(source: &str) -> Attributes {
    let mut entries = Vec::new();
    let mut remaining = source;
    while let Ok((rest, (name, value))) = attribute(remaining) {
        entries.push((name.to_string(), unescape_markup(value)));
        remaining = rest;
    }
    if !remaining.trim().is_empty() {
        tracing::debug!("ignoring attribute text \"{}\"", remaining.trim());
    }
    Attributes { entries }
}
