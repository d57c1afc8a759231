use regex::Regex;
use thiserror::Error;

const WILDCARD_CAPTURE: &str = "([^ ]+(?: [^ ]+)*)";

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid pattern \"{pattern}\": {reason}")]
pub struct InvalidPatternError {
    pub pattern: String,
    pub reason: String,
}

impl InvalidPatternError {
    fn new(pattern: &str, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

fn is_wildcard(token: &str) -> bool {
    token == "*" || token == "_"
}

fn check_pattern(pattern: &str) -> Result<(), InvalidPatternError> {
    if pattern.is_empty() {
        return Err(InvalidPatternError::new(pattern, "pattern is empty"));
    }
    for (index, token) in pattern.split(' ').enumerate() {
        if token.is_empty() {
            return Err(InvalidPatternError::new(
                pattern,
                format!("empty token at position {}", index + 1),
            ));
        }
        if is_wildcard(token) {
            continue;
        }
        if let Some(bad) = token
            .chars()
            .find(|c| !(c.is_uppercase() || c.is_numeric()))
        {
            return Err(InvalidPatternError::new(
                pattern,
                format!("unexpected character '{}' in token \"{}\"", bad, token),
            ));
        }
    }
    Ok(())
}

/// True iff `pattern` is single-space separated tokens, each `*`, `_`, or
/// made only of uppercase letters and digits.
pub fn validate_pattern(pattern: &str) -> bool {
    check_pattern(pattern).is_ok()
}

/// Compiled, fully anchored pattern. Each wildcard captures one or more
/// whole words.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    regex: Regex,
    wildcards: usize,
    tokens: usize,
}

impl PatternMatcher {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn wildcard_count(&self) -> usize {
        self.wildcards
    }

    /// Number of literal (non-wildcard) words.
    pub fn literal_count(&self) -> usize {
        self.tokens - self.wildcards
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Captured wildcard values in left-to-right order, or `None` if the
    /// input does not match.
    pub fn captures(&self, input: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(input)?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

pub fn compile_pattern(
    pattern: &str,
    ignore_case: bool,
) -> Result<PatternMatcher, InvalidPatternError> {
    check_pattern(pattern)?;

    let mut wildcards = 0;
    let mut tokens = 0;
    let body = pattern
        .split(' ')
        .map(|token| {
            tokens += 1;
            if is_wildcard(token) {
                wildcards += 1;
                WILDCARD_CAPTURE.to_string()
            } else {
                regex::escape(token)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let flags = if ignore_case { "(?i)" } else { "" };
    let regex = Regex::new(&format!("{}^{}$", flags, body))
        .map_err(|e| InvalidPatternError::new(pattern, e.to_string()))?;

    Ok(PatternMatcher {
        pattern: pattern.to_string(),
        regex,
        wildcards,
        tokens,
    })
}
