//! Word-count and token-count bounds for an input line.

use super::types::Token;
use crate::config::Limits;
use crate::error::{Result, ShellError};

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Check that a command segment has between 1 and `max_args` words.
pub fn validate_segment(text: &str, limits: &Limits) -> Result<()> {
    match word_count(text) {
        0 => Err(ShellError::parse("missing command")),
        n if n > limits.max_args => Err(ShellError::parse(format!(
            "each command must have 1 to {} arguments: `{}`",
            limits.max_args,
            text.trim()
        ))),
        _ => Ok(()),
    }
}

/// Check the whole token sequence before anything runs.
///
/// At most `2 * max_pipes - 1` tokens are allowed and every segment must pass
/// [`validate_segment`].
pub fn validate_sequence(tokens: &[Token], limits: &Limits) -> Result<()> {
    if tokens.len() > limits.max_tokens() {
        return Err(ShellError::parse(format!(
            "too many special characters: at most {} commands per line",
            limits.max_pipes
        )));
    }

    for (idx, token) in tokens.iter().enumerate() {
        let Some(text) = token.as_segment() else {
            continue;
        };
        if word_count(text) == 0 {
            let near = tokens[idx.saturating_sub(1)..tokens.len().min(idx + 2)]
                .iter()
                .find_map(Token::operator);
            return Err(match near {
                Some(op) => ShellError::parse(format!("missing command near `{op}`")),
                None => ShellError::parse("missing command"),
            });
        }
        validate_segment(text, limits)?;
    }
    Ok(())
}

pub fn segment_is_valid(text: &str, limits: &Limits) -> bool {
    validate_segment(text, limits).is_ok()
}

pub fn sequence_is_valid(tokens: &[Token], limits: &Limits) -> bool {
    validate_sequence(tokens, limits).is_ok()
}
