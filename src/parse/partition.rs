//! Split a formatted line into command segments and control operators.

use super::escape::is_escaped;
use super::types::{Operator, Token};

/// Partition `text` into segments interleaved with operators.
///
/// Operators are recognized in priority order `&&`, `||`, `|`, `;`, `#` so
/// two-character operators are never read as two single ones. The text
/// after the last operator always becomes a final segment, even when empty.
/// A single `&` is not an operator here; it stays in the segment as the
/// background marker.
pub fn partition(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut idx = 0;

    while idx < bytes.len() {
        if is_escaped(bytes, idx) {
            idx += 1;
            continue;
        }
        let (op, width) = match (bytes[idx], bytes.get(idx + 1)) {
            (b'&', Some(b'&')) => (Operator::And, 2),
            (b'|', Some(b'|')) => (Operator::Or, 2),
            (b'|', _) => (Operator::Pipe, 1),
            (b';', _) => (Operator::Seq, 1),
            (b'#', _) => (Operator::Comment, 1),
            _ => {
                idx += 1;
                continue;
            }
        };
        tokens.push(Token::segment(&text[start..idx]));
        tokens.push(Token::Op(op));
        idx += width;
        start = idx;
    }

    tokens.push(Token::segment(&text[start..]));
    tokens
}

/// Number of operator tokens in a partitioned line.
pub fn operator_count(tokens: &[Token]) -> usize {
    tokens.iter().filter(|t| t.operator().is_some()).count()
}
