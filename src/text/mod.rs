//! Text primitives used by the parser and the evaluator.
//!
//! Everything here is a pure function over strings: literal substitution,
//! whitespace and markup normalization, pattern validation and compilation,
//! pronoun shifting and case transforms.

mod case;
mod normalize;
mod pattern;
mod person;
mod substitution;

pub use case::{formal, sentence_case};
pub use normalize::{
    collapse_whitespace, generic_normalize, normalize_input, normalize_whitespace, pattern_fit, remove_markup,
    sentence_split, LITERAL_CLOSE, LITERAL_OPEN,
};
pub use pattern::{compile_pattern, validate_pattern, InvalidPatternError, PatternMatcher};
pub use person::{
    default_gender_table, default_person2_table, default_person_table, gender_shift,
    person_shift, prettify, shift_with_table, PersonShift, SENTINEL,
};
pub use substitution::{
    apply_table, escape_markup, replace_all, substitute_ignore_case, unescape_markup,
    SubstitutionTable,
};
