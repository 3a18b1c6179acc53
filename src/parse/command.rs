//! Parse one command segment into program, arguments and redirections.

use super::escape::is_escaped;
use super::types::{OutputMode, OutputRedirect, ParsedCommand};
use crate::error::{Result, ShellError};

/// Parse a (formatted) command segment.
///
/// Fails when no program is left, including a segment that is only `&`.
/// A trailing unescaped `&` sets the background flag. `<`, `>` and `>>` each
/// consume the following word as their target; a later redirection of the
/// same stream replaces an earlier one. All other words form `argv`.
pub fn parse_command(segment: &str) -> Result<ParsedCommand> {
    let (text, background) = strip_background(segment);
    let mut cmd = ParsedCommand {
        background,
        ..ParsedCommand::default()
    };

    let mut words = text.split_whitespace();
    while let Some(word) = words.next() {
        match word {
            "<" => cmd.input = Some(target(word, words.next())?.to_string()),
            ">" | ">>" => {
                let path = target(word, words.next())?.to_string();
                let mode = if word == ">" {
                    OutputMode::Truncate
                } else {
                    OutputMode::Append
                };
                cmd.output = Some(OutputRedirect { path, mode });
            }
            _ => cmd.argv.push(word.to_string()),
        }
    }

    if cmd.argv.is_empty() {
        return Err(if cmd.input.is_some() || cmd.output.is_some() {
            ShellError::parse("redirection without a command")
        } else {
            ShellError::parse("missing command")
        });
    }
    Ok(cmd)
}

/// Trim the segment and remove a trailing background marker.
pub fn strip_background(segment: &str) -> (&str, bool) {
    let text = segment.trim();
    match text.strip_suffix('&') {
        Some(rest) if !is_escaped(text.as_bytes(), rest.len()) => (rest.trim_end(), true),
        _ => (text, false),
    }
}

fn target<'a>(op: &str, next: Option<&'a str>) -> Result<&'a str> {
    match next {
        Some(word) if !matches!(word, "<" | ">" | ">>" | "&") => Ok(word),
        _ => Err(ShellError::parse(format!(
            "expected a file name after `{op}`"
        ))),
    }
}
