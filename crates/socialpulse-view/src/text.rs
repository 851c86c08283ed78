//! Label formatting shared by the projections

/// Upper-case the first character, leave the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"natural_disaster"` -> `"Natural Disaster"`
///
/// Underscores become spaces and every character that starts a word is
/// upper-cased.
pub fn humanize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Underscores to spaces only, as used for topic tags on posts
pub fn despace(s: &str) -> String {
    s.replace('_', " ")
}
