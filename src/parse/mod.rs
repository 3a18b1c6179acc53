pub mod command;
pub mod escape;
pub mod format;
pub mod partition;
pub mod types;
pub mod validate;

pub use command::{parse_command, strip_background};
pub use escape::is_escaped;
pub use format::format_line;
pub use partition::partition;
pub use types::{Operator, OutputMode, OutputRedirect, ParsedCommand, Token};
pub use validate::{segment_is_valid, sequence_is_valid, validate_segment, validate_sequence};

use crate::config::Config;
use crate::error::Result;

/// Format, partition and validate a raw line.
///
/// With `shell.comment_ends_line` set, everything from the first unescaped
/// `#` on is dropped before validation. Returns the token sequence ready for
/// the evaluator (empty for a comment-only line), or a parse error that
/// discards the whole line.
pub fn parse_line(line: &str, config: &Config) -> Result<Vec<Token>> {
    let formatted = format_line(line);
    log::debug!("formatted line: {formatted:?}");
    let mut tokens = partition(&formatted);
    if config.shell.comment_ends_line {
        strip_comment(&mut tokens);
    }
    log::debug!("tokens: {tokens:?}");
    validate_sequence(&tokens, &config.limits)?;
    Ok(tokens)
}

/// Cut `tokens` at the first `#`. A line holding nothing but a comment ends
/// up with no tokens at all.
pub fn strip_comment(tokens: &mut Vec<Token>) {
    let Some(pos) = tokens.iter().position(|t| t.is_op(Operator::Comment)) else {
        return;
    };
    tokens.truncate(pos);
    if let [Token::Segment(text)] = tokens.as_slice()
        && text.trim().is_empty()
    {
        tokens.clear();
    }
}
