//! POSIX shell quoting.
//!
//! Pure functions only — no I/O.

/// Characters that never need quoting in a POSIX shell word.
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_-@%+=:,./".contains(c)
}

/// Quotes `s` so that a POSIX shell parses it back as exactly one word with
/// the original bytes.
///
/// Words made only of safe characters are returned unchanged. Everything
/// else is wrapped in single quotes, with each embedded `'` written as `'\''`.
#[must_use]
pub fn quote(s: &str) -> String {
    if !s.is_empty() && s.chars().all(is_safe) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

/// Quotes every word and joins them with single spaces.
#[must_use]
pub fn join<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| quote(w.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
