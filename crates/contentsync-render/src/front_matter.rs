//! Helpers for emitting YAML front matter by hand.
//!
//! Every scalar is written as a double-quoted YAML string on a single line.
//! Line breaks are folded to spaces, which is what a YAML parser does with a
//! single break inside a quoted scalar anyway, so a scraped line starting
//! with `---` can never end the front matter early.

use std::fmt::Write;

/// Escape a value for use inside a double-quoted YAML scalar.
///
/// Backslashes and quotes are escaped, `\r\n`, `\r` and `\n` become one space
/// each, tabs pass through, and any other control character is written as
/// a `\xNN` escape.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push(' ');
            }
            '\n' => out.push(' '),
            '\t' => out.push('\t'),
            c if c.is_control() => {
                // Cc characters all sit below U+0100.
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Render `value` as a quoted YAML scalar.
pub fn quoted(value: &str) -> String {
    format!("\"{}\"", escape(value))
}

/// Render a flow sequence of quoted strings, dropping empty items.
pub fn quoted_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted_items: Vec<String> = items
        .into_iter()
        .filter(|item| !item.as_ref().is_empty())
        .map(|item| quoted(item.as_ref()))
        .collect();
    format!("[{}]", quoted_items.join(", "))
}
