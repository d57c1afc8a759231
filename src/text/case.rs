/// Capitalizes the first letter of every word and lowercases the rest.
pub fn formal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            result.push(c);
        } else if at_word_start {
            result.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }
    result
}

/// Capitalizes the first letter of every sentence, leaving the rest as is.
pub fn sentence_case<S: AsRef<str>>(splitters: &[S], text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut capitalize_next = true;
    let mut position = 0;

    while let Some(c) = text[position..].chars().next() {
        let rest = &text[position..];
        if let Some(splitter) = splitters
            .iter()
            .map(AsRef::as_ref)
            .find(|s| !s.is_empty() && rest.starts_with(*s))
        {
            result.push_str(splitter);
            position += splitter.len();
            capitalize_next = true;
            continue;
        }

        if capitalize_next && c.is_alphabetic() {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            if !c.is_whitespace() {
                capitalize_next = false;
            }
            result.push(c);
        }
        position += c.len_utf8();
    }
    result
}
