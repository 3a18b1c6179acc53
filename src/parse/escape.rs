//! Backslash escape detection.

pub const ESCAPE: u8 = b'\\';

/// Whether the byte at `position` is escaped by a preceding odd-length run of
/// backslashes.
///
/// Position 0 is never escaped. `position` may equal `text.len()`, which asks
/// whether a character appended at the end would be escaped.
pub fn is_escaped(text: &[u8], position: usize) -> bool {
    let end = position.min(text.len());
    let run = text[..end]
        .iter()
        .rev()
        .take_while(|&&b| b == ESCAPE)
        .count();
    run % 2 == 1
}
