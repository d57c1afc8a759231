//! Pronoun shifting for `<person>`, `<person2>` and `<gender>`.
//!
//! The working text is uppercased and every word is padded so a rule only
//! matches whole words. Replacement text has its spaces swapped for
//! [`SENTINEL`] before insertion, so no later rule in the same table can
//! match anything an earlier rule produced. Sentinels become spaces again
//! once the whole table has run.

use lazy_static::lazy_static;

use super::substitution::{replace_all, SubstitutionTable};

/// Stand-in for a space inside inserted replacement text.
pub const SENTINEL: char = '\u{1}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum PersonShift {
    /// First person to third person and back (`<person>`).
    #[strum(serialize = "person")]
    FirstThird,
    /// First person to second person and back (`<person2>`).
    #[strum(serialize = "person2")]
    FirstSecond,
}

lazy_static! {
    static ref PERSON_TABLE: SubstitutionTable = SubstitutionTable::from_pairs([
        ("I WAS", "he or she was"),
        ("HE WAS", "I was"),
        ("SHE WAS", "I was"),
        ("I AM", "he or she is"),
        ("HE IS", "I am"),
        ("SHE IS", "I am"),
        ("MYSELF", "him or herself"),
        ("HIMSELF", "myself"),
        ("HERSELF", "myself"),
        ("MINE", "his or hers"),
        ("MY", "his or her"),
        ("ME", "him or her"),
        ("I", "he or she"),
        ("HE", "I"),
        ("SHE", "I"),
        ("HIM", "me"),
        ("HIS", "my"),
        ("HER", "me"),
    ]);
    static ref PERSON2_TABLE: SubstitutionTable = SubstitutionTable::from_pairs([
        ("WITH YOU", "with me"),
        ("WITH ME", "with you"),
        ("TO YOU", "to me"),
        ("TO ME", "to you"),
        ("I AM", "you are"),
        ("YOU ARE", "I am"),
        ("I WAS", "you were"),
        ("YOU WERE", "I was"),
        ("MYSELF", "yourself"),
        ("YOURSELF", "myself"),
        ("MINE", "yours"),
        ("YOURS", "mine"),
        ("MY", "your"),
        ("YOUR", "my"),
        ("ME", "you"),
        ("I", "you"),
        ("YOU", "me"),
        ("I'M", "you're"),
        ("YOU'RE", "I'm"),
    ]);
    static ref GENDER_TABLE: SubstitutionTable = SubstitutionTable::from_pairs([
        ("HIMSELF", "herself"),
        ("HERSELF", "himself"),
        ("HE", "she"),
        ("SHE", "he"),
        ("HIM", "her"),
        ("HIS", "her"),
        ("HER", "his"),
    ]);
}

pub fn default_person_table() -> &'static SubstitutionTable {
    &PERSON_TABLE
}

pub fn default_person2_table() -> &'static SubstitutionTable {
    &PERSON2_TABLE
}

pub fn default_gender_table() -> &'static SubstitutionTable {
    &GENDER_TABLE
}

pub fn person_shift(text: &str, direction: PersonShift) -> String {
    let table = match direction {
        PersonShift::FirstThird => default_person_table(),
        PersonShift::FirstSecond => default_person2_table(),
    };
    shift_with_table(table, text)
}

pub fn gender_shift(text: &str) -> String {
    shift_with_table(default_gender_table(), text)
}

/// Runs a pronoun table over `text` with sentinel-protected replacements.
pub fn shift_with_table(table: &SubstitutionTable, text: &str) -> String {
    let words: Vec<String> = text.split_whitespace().map(str::to_uppercase).collect();
    if words.is_empty() {
        return String::new();
    }

    // " A  B  C ": every word owns a leading and a trailing space
    let mut working = format!(" {} ", words.join("  "));
    for (find, replace) in table.rules() {
        let find = pad_words(&find.to_uppercase());
        if find.trim().is_empty() {
            continue;
        }
        working = replace_all(&find, &protect(replace), &working);
    }

    let restored = working.replace(SENTINEL, " ").to_lowercase();
    prettify(&restored)
}

fn pad_words(text: &str) -> String {
    format!(" {} ", text.split_whitespace().collect::<Vec<_>>().join("  "))
}

fn protect(replacement: &str) -> String {
    let mut protected = String::with_capacity(replacement.len() + 2);
    protected.push(SENTINEL);
    for c in replacement.trim().chars() {
        protected.push(if c == ' ' { SENTINEL } else { c });
    }
    protected.push(SENTINEL);
    protected
}

/// Cleans up lowercased shifter output: collapses whitespace, capitalizes the
/// pronoun `i` (also in `i'm`, `i've`, ...) and glues split contractions such
/// as `you 're` back together.
pub fn prettify(text: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        match words.last_mut() {
            Some(previous) if word.starts_with('\'') => previous.push_str(word),
            _ => words.push(word.to_string()),
        }
    }
    for word in words.iter_mut() {
        if word == "i" {
            *word = "I".to_string();
        } else if let Some(rest) = word.strip_prefix("i'") {
            *word = format!("I'{}", rest);
        }
    }
    words.join(" ")
}
