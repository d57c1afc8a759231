pub const LITERAL_OPEN: &str = "<![CDATA[";
pub const LITERAL_CLOSE: &str = "]]>";

/// Collapses whitespace runs to one space and trims the ends.
///
/// Literal blocks (`<![CDATA[...]]>`) are copied through untouched. An
/// opening marker with no closing marker is ordinary text.
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut remaining = text;

    loop {
        let Some(open) = remaining.find(LITERAL_OPEN) else {
            push_collapsed(&mut result, remaining);
            break;
        };
        let body = open + LITERAL_OPEN.len();
        let Some(close) = remaining[body..].find(LITERAL_CLOSE) else {
            push_collapsed(&mut result, remaining);
            break;
        };
        let end = body + close + LITERAL_CLOSE.len();

        push_collapsed(&mut result, &remaining[..open]);
        result.push_str(&remaining[open..end]);
        remaining = &remaining[end..];
    }

    if result.ends_with(' ') {
        result.pop();
    }
    result
}

// Leading whitespace of the whole result is dropped, interior runs become
// one space. `result` never ends in whitespace copied from a literal block
// because literal blocks end with `]]>`.
fn push_collapsed(result: &mut String, segment: &str) {
    for c in segment.chars() {
        if c.is_whitespace() {
            if !result.is_empty() && !result.ends_with(' ') {
                result.push(' ');
            }
        } else {
            result.push(c);
        }
    }
}

/// Collapses whitespace runs to one space without trimming.
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                result.push(' ');
            }
            in_run = true;
        } else {
            result.push(c);
            in_run = false;
        }
    }
    result
}

/// Strips every `<...>` tag, keeping the surrounding text, and trims.
pub fn remove_markup(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result.trim().to_string()
}

/// Deletes everything that is not a letter, digit or whitespace, then
/// collapses whitespace and trims.
pub fn generic_normalize(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normal form handed to the matcher for input, `that` and `topic`.
pub fn normalize_input(text: &str) -> String {
    generic_normalize(text).to_uppercase()
}

/// Turns authored text into pattern form: markup removed, punctuation other
/// than the wildcards turned into spaces, uppercased, whitespace collapsed.
pub fn pattern_fit(text: &str) -> String {
    let plain: String = remove_markup(text)
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '*' || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect();
    plain
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits `text` after each splitter occurrence.
///
/// Consecutive splitters stay with the sentence they end (`"Really?!"` is one
/// sentence). Sentences are trimmed and empty ones dropped.
pub fn sentence_split<S: AsRef<str>>(splitters: &[S], text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut position = 0;
    let mut in_splitter_run = false;

    while position < text.len() {
        let rest = &text[position..];
        let splitter = splitters
            .iter()
            .map(AsRef::as_ref)
            .find(|s| !s.is_empty() && rest.starts_with(*s));

        match splitter {
            Some(s) => {
                position += s.len();
                in_splitter_run = true;
            }
            None => {
                if in_splitter_run {
                    push_sentence(&mut sentences, &text[start..position]);
                    start = position;
                    in_splitter_run = false;
                }
                // `rest` is non-empty here
                position += rest.chars().next().map(char::len_utf8).unwrap_or(1);
            }
        }
    }
    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}
