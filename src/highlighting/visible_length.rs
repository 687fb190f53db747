use crate::highlighting::style::ESCAPE;

/// Number of characters in `s` that are not part of an escape run.
///
/// An escape run starts at [`ESCAPE`] and ends at the first `'m'` after it,
/// both inclusive. An unterminated run swallows the rest of the string.
pub fn length_visible(s: &str) -> usize {
    let mut len = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else if c == ESCAPE {
            in_escape = true;
        } else {
            len += 1;
        }
    }
    len
}

/// Pad `s` with trailing spaces up to a visible width of `width`.
pub fn pad_visible(s: &str, width: usize) -> String {
    let visible = length_visible(s);
    let mut out = String::with_capacity(s.len() + width.saturating_sub(visible));
    out.push_str(s);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(visible)));
    out
}
