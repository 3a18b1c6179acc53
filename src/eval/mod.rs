//! Control flow over a partitioned line: `&&`, `||`, `;`, `#` and pipe runs.
//!
//! `;` and `#` simply move on to the next command. A line whose comment ends
//! it has already been cut at the `#` by the parser.

use crate::error::{Result, report};
use crate::exec::{run_pipeline, run_single};
use crate::parse::{Operator, Token, validate_segment};
use crate::session::Session;
use crate::{ExitCode, SUCCESS};

/// Walk `tokens` left to right, running commands and applying short-circuit
/// rules. Returns the status of the last command that ran.
///
/// After `||` on success (or `&&` on failure) the right-hand side is skipped
/// up to the next operator that ends it; when that operator is a pipe, the
/// pipe and the segment right after it are skipped too.
pub fn evaluate(session: &mut Session, tokens: &[Token]) -> Result<ExitCode> {
    let mut last = SUCCESS;
    let mut idx = 0;

    while idx < tokens.len() && session.exit_requested().is_none() {
        idx = match &tokens[idx] {
            Token::Op(Operator::Or) if last == SUCCESS => skip_operand(tokens, idx, Operator::Or),
            Token::Op(Operator::And) if last != SUCCESS => skip_operand(tokens, idx, Operator::And),
            Token::Op(_) => idx + 1,
            Token::Segment(text) => {
                let end = pipe_run_end(tokens, idx);
                last = if end > idx {
                    let run: Vec<String> = tokens[idx..=end]
                        .iter()
                        .filter_map(Token::as_segment)
                        .map(str::to_string)
                        .collect();
                    log::debug!("pipeline of {} stages", run.len());
                    settle(run_pipeline(session, &run))?
                } else {
                    validate_segment(text, &session.config().limits)?;
                    settle(run_single(session, text))?
                };
                session.set_last_status(last);
                end + 1
            }
        };
    }

    Ok(last)
}

/// Index after the operand skipped by a short-circuiting `op` at `idx`.
fn skip_operand(tokens: &[Token], idx: usize, op: Operator) -> usize {
    let stops: [Operator; 3] = match op {
        Operator::Or => [Operator::And, Operator::Pipe, Operator::Seq],
        _ => [Operator::Or, Operator::Pipe, Operator::Seq],
    };
    let mut next = idx + 1;
    while next < tokens.len() && !tokens[next].operator().is_some_and(|o| stops.contains(&o)) {
        next += 1;
    }
    if next < tokens.len() && tokens[next].is_op(Operator::Pipe) {
        next += 2;
    }
    next
}

/// Last index of the pipe run starting at segment `start` (`start` itself
/// when the segment is not followed by `|`).
fn pipe_run_end(tokens: &[Token], start: usize) -> usize {
    let mut end = start;
    while end + 2 < tokens.len()
        && tokens[end + 1].is_op(Operator::Pipe)
        && tokens[end + 2].as_segment().is_some()
    {
        end += 2;
    }
    end
}

/// Turn a command-scoped error into a failure status; line-scoped errors
/// propagate and abort the line.
fn settle(result: Result<ExitCode>) -> Result<ExitCode> {
    match result {
        Err(e) if e.is_command_scoped() => {
            report(&e);
            Ok(e.exit_code())
        }
        other => other,
    }
}
