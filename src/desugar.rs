//! Rewrites of deprecated and shorthand tags into canonical ones.
//!
//! A rewrite never evaluates anything itself. It describes the canonical
//! node to synthesize; the evaluator fills in evaluated content where a rule
//! asks for it and dispatches the result like any authored node.

use thiserror::Error;

use crate::document::{Node, Tag};

#[derive(Error, Debug, Clone, PartialEq)]
#[error("No rewrite rule for legacy tag <{name}>")]
pub struct UnknownLegacyTagError {
    pub name: String,
}

/// Canonical form of a legacy tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Replace the node with this self-closing tag.
    SelfClosing(Tag),
    /// Replace the node with `outer` wrapping a single self-closing `inner`.
    Wrap { outer: Tag, inner: Tag },
    /// Replace the node with this element holding the original node's
    /// evaluated content as one text child.
    WithContent(Tag),
}

impl Rewrite {
    /// Builds the synthesized node. `content` is used only by
    /// [`Rewrite::WithContent`].
    pub fn into_node(self, content: Option<String>) -> Node {
        match self {
            Rewrite::SelfClosing(tag) => Node::self_closing(tag),
            Rewrite::Wrap { outer, inner } => Node::element(outer, vec![Node::self_closing(inner)]),
            Rewrite::WithContent(tag) => {
                Node::element(tag, vec![Node::text(content.unwrap_or_default())])
            }
        }
    }

    pub fn needs_content(&self) -> bool {
        matches!(self, Rewrite::WithContent(_))
    }
}

// (legacy name, bot property)
const BOT_PROPERTY_SHORTHANDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("birthday", "birthday"),
    ("birthplace", "birthplace"),
    ("boyfriend", "boyfriend"),
    ("favoriteband", "favoriteband"),
    ("favoritebook", "favoritebook"),
    ("favoritecolor", "favoritecolor"),
    ("favoritefood", "favoritefood"),
    ("favoritemovie", "favoritemovie"),
    ("favoritesong", "favoritesong"),
    ("for_fun", "forfun"),
    ("friends", "friends"),
    ("girlfriend", "girlfriend"),
    ("kind_music", "kindmusic"),
    ("location", "location"),
    ("look_like", "looklike"),
    ("botmaster", "master"),
    ("question", "question"),
    ("sign", "sign"),
    ("talk_about", "talkabout"),
    ("wear", "wear"),
];

// (legacy name, canonical tag, attributes)
const SELF_CLOSING_RULES: &[(&str, &str, &[(&str, &str)])] = &[
    ("justbeforethat", "that", &[("index", "2,1")]),
    ("justthat", "input", &[("index", "2")]),
    ("beforethat", "input", &[("index", "3")]),
    ("getname", "get", &[("name", "name")]),
    ("gettopic", "get", &[("name", "topic")]),
    ("getsize", "size", &[]),
    ("getversion", "version", &[]),
    ("get_ip", "id", &[]),
];

// (legacy name, predicate)
const SET_RULES: &[(&str, &str)] = &[("settopic", "topic"), ("setname", "name")];

// shorthand name to the tag that wraps `<star/>`
const STAR_SHORTHANDS: &[(&str, &str)] = &[
    ("sr", "srai"),
    ("person", "person"),
    ("person2", "person2"),
];

fn star() -> Tag {
    Tag::new("star", "")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Desugarer {
    support_deprecated_tags: bool,
}

impl Desugarer {
    pub fn new(support_deprecated_tags: bool) -> Self {
        Self {
            support_deprecated_tags,
        }
    }

    pub fn supports_deprecated_tags(&self) -> bool {
        self.support_deprecated_tags
    }

    /// Finds the rewrite for a tag node.
    ///
    /// Star shorthands (`<sr/>`, `<person/>`, `<person2/>`, `<gender/>`) are
    /// always available. The other legacy spellings only when deprecated
    /// tag support is on.
    pub fn rewrite(&self, node: &Node) -> Result<Rewrite, UnknownLegacyTagError> {
        let unknown = || UnknownLegacyTagError {
            name: node.name().unwrap_or_default().to_string(),
        };
        let name = node.name().ok_or_else(unknown)?;

        if let Some((_, outer)) = STAR_SHORTHANDS.iter().find(|(legacy, _)| *legacy == name) {
            return Ok(Rewrite::Wrap {
                outer: Tag::new(*outer, ""),
                inner: star(),
            });
        }
        if name == "gender" {
            return Ok(if self.support_deprecated_tags {
                Rewrite::SelfClosing(Tag::with_attributes("bot", &[("name", "gender")]))
            } else {
                Rewrite::Wrap {
                    outer: Tag::new("gender", ""),
                    inner: star(),
                }
            });
        }
        if !self.support_deprecated_tags {
            return Err(unknown());
        }

        if let Some((_, property)) = BOT_PROPERTY_SHORTHANDS
            .iter()
            .find(|(legacy, _)| *legacy == name)
        {
            return Ok(Rewrite::SelfClosing(Tag::with_attributes(
                "bot",
                &[("name", *property)],
            )));
        }
        if let Some((_, canonical, attributes)) =
            SELF_CLOSING_RULES.iter().find(|(legacy, _, _)| *legacy == name)
        {
            return Ok(Rewrite::SelfClosing(Tag::with_attributes(
                *canonical,
                attributes,
            )));
        }
        if let Some((_, predicate)) = SET_RULES.iter().find(|(legacy, _)| *legacy == name) {
            return Ok(Rewrite::WithContent(Tag::with_attributes(
                "set",
                &[("name", *predicate)],
            )));
        }
        if let Some(predicate) = name.strip_prefix("set_").filter(|p| !p.is_empty()) {
            return Ok(Rewrite::WithContent(Tag::with_attributes(
                "set",
                &[("name", predicate)],
            )));
        }
        if let Some(predicate) = name.strip_prefix("get_").filter(|p| !p.is_empty()) {
            return Ok(Rewrite::SelfClosing(Tag::with_attributes(
                "get",
                &[("name", predicate)],
            )));
        }

        Err(unknown())
    }
}

impl Default for Desugarer {
    fn default() -> Self {
        Self::new(true)
    }
}
