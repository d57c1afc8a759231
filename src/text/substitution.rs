use lazy_static::lazy_static;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Ordered list of literal `(find, replace)` rules.
///
/// Rules run in listed order; each one replaces every occurrence before the
/// next one sees the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionTable {
    rules: Vec<(String, String)>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn from_pairs<I, F, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, R)>,
        F: Into<String>,
        R: Into<String>,
    {
        Self {
            rules: pairs
                .into_iter()
                .map(|(find, replace)| (find.into(), replace.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, find: impl Into<String>, replace: impl Into<String>) {
        self.rules.push((find.into(), replace.into()));
    }

    pub fn rules(&self) -> &[(String, String)] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        apply_table(self, text)
    }
}

/// Replaces every non-overlapping, leftmost-first occurrence of `find`.
///
/// Scanning resumes after the inserted replacement, so a replacement that
/// contains `find` is never rescanned. An empty `find` leaves `text` as is.
pub fn replace_all(find: &str, replace: &str, text: &str) -> String {
    if find.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut remaining = text;
    while let Some(position) = remaining.find(find) {
        result.push_str(&remaining[..position]);
        result.push_str(replace);
        remaining = &remaining[position + find.len()..];
    }
    result.push_str(remaining);
    result
}

pub fn apply_table(table: &SubstitutionTable, text: &str) -> String {
    table
        .rules()
        .iter()
        .fold(text.to_string(), |acc, (find, replace)| {
            replace_all(find, replace, &acc)
        })
}

enum Piece {
    Untouched(String),
    Replaced(String),
}

/// Applies `table` case-insensitively. A rule only sees text that no earlier
/// rule produced, so replacements are never substituted again.
pub fn substitute_ignore_case(table: &SubstitutionTable, text: &str) -> String {
    let mut pieces = vec![Piece::Untouched(text.to_string())];
    for (find, replace) in table.rules() {
        if find.is_empty() {
            continue;
        }
        let rule = match RegexBuilder::new(&regex::escape(find))
            .case_insensitive(true)
            .build()
        {
            Ok(rule) => rule,
            Err(e) => {
                tracing::warn!("skipping substitution for \"{}\": {}", find, e);
                continue;
            }
        };

        let mut next = Vec::with_capacity(pieces.len());
        for piece in pieces {
            let untouched = match piece {
                Piece::Untouched(untouched) => untouched,
                replaced => {
                    next.push(replaced);
                    continue;
                }
            };
            let mut last = 0;
            for found in rule.find_iter(&untouched) {
                next.push(Piece::Untouched(untouched[last..found.start()].to_string()));
                next.push(Piece::Replaced(replace.clone()));
                last = found.end();
            }
            next.push(Piece::Untouched(untouched[last..].to_string()));
        }
        pieces = next;
    }

    pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Untouched(text) | Piece::Replaced(text) => text,
        })
        .collect()
}

lazy_static! {
    // `&amp;` goes last when unescaping and first when escaping.
    static ref UNESCAPE_TABLE: SubstitutionTable = SubstitutionTable::from_pairs([
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&apos;", "'"),
        ("&amp;", "&"),
    ]);
    static ref ESCAPE_TABLE: SubstitutionTable = SubstitutionTable::from_pairs([
        ("&", "&amp;"),
        ("<", "&lt;"),
        (">", "&gt;"),
        ("\"", "&quot;"),
        ("'", "&apos;"),
    ]);
}

pub fn unescape_markup(text: &str) -> String {
    UNESCAPE_TABLE.apply(text)
}

pub fn escape_markup(text: &str) -> String {
    ESCAPE_TABLE.apply(text)
}
