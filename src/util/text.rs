use std::borrow::Cow;
use unicode_width::UnicodeWidthChar;

/// Ellipsis appended when a cell is cut off.
const ELLIPSIS: char = '…';

/// Collapse a server-supplied string into a single display line.
///
/// Table cells are one line tall, so every control character, including
/// newlines and tabs, becomes a space, which also neutralizes terminal
/// escape sequences embedded in article text. Returns `Cow::Borrowed` when
/// the input is already a clean single line (the common case).
pub fn flatten_whitespace(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c.is_control()) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect(),
    )
}

/// Flatten and truncate a string to fit a table cell of `max_width` terminal
/// columns, appending an ellipsis when text was cut off.
///
/// Width accounting is Unicode-aware: CJK characters and most emoji occupy
/// two columns. For `max_width` of 0 or 1 there is no room for content plus
/// ellipsis, so the result is empty or a single narrow character.
pub fn cell_text(s: &str, max_width: usize) -> String {
    let flat = flatten_whitespace(s);

    let mut total = 0usize;
    let fits = flat.chars().all(|c| {
        total += UnicodeWidthChar::width(c).unwrap_or(0);
        total <= max_width
    });
    if fits {
        return flat.into_owned();
    }

    // Leave one column for the ellipsis.
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0usize;
    for c in flat.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > 0 {
        out.push(ELLIPSIS);
    }
    out
}
