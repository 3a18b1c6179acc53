//! Whitespace padding around control characters.
//!
//! After formatting, every unescaped control character (or doubled pair such
//! as `>>`) stands as its own whitespace-separated word, which lets the
//! partitioner and the command parser work on plain whitespace splitting.

use super::escape::is_escaped;

/// Characters that are separated from their neighbours.
pub const CONTROL_CHARS: &[char] = &['<', '>', '|', '&', ';', '#'];
/// Control characters that form a single unit when doubled (`>>`, `||`, `&&`).
pub const DOUBLING_CHARS: &[char] = &['>', '|', '&'];

/// Pad every unescaped control character with whitespace.
///
/// A space is only inserted where the neighbouring character is not already
/// whitespace, so formatting an already formatted line changes nothing.
pub fn format_line(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len() * 2 + 1);
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !CONTROL_CHARS.contains(&c) || is_escaped(bytes, idx) {
            out.push(c);
            continue;
        }

        if !out.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        out.push(c);
        let mut end = idx + 1;
        if DOUBLING_CHARS.contains(&c) && chars.peek().is_some_and(|&(_, next)| next == c) {
            chars.next();
            out.push(c);
            end += 1;
        }
        if !bytes.get(end).is_some_and(u8::is_ascii_whitespace) {
            out.push(' ');
        }
    }

    out
}
