//! shell24: a small interactive shell.
//!
//! A line of input is padded around its control characters, split into
//! command segments and operators, checked against line-size bounds, and then
//! evaluated: `&&` / `||` short-circuit, `;` sequences, `|` chains commands
//! through anonymous pipes, `<` `>` `>>` redirect, and a trailing `&` runs a
//! command in the background.
//!
//! # Architecture
//!
//! - **[`parse`]** — Escape scanning, formatting, partitioning, validation, command parsing.
//! - **[`eval`]** — Control-flow evaluator over the token sequence.
//! - **[`exec`]** — Single commands, pipelines, built-ins, background job slot.
//! - **[`session`]** — Per-process interpreter state.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — File logging to `~/.local/share/shell24/shell24.log`.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Error taxonomy and reporting.
pub mod error;
/// Control-flow evaluation of a token sequence.
pub mod eval;
/// Process spawning, pipelines and job tracking.
pub mod exec;
/// File-based logging setup.
pub mod logging;
/// Line parsing: formatter, partitioner, validator, command parser.
pub mod parse;
/// Interpreter session state.
pub mod session;

pub use config::Config;
pub use error::ShellError;
pub use session::Session;

/// Shell status code: 0 for success, anything else for failure.
pub type ExitCode = i32;

pub const SUCCESS: ExitCode = 0;
pub const FAILURE: ExitCode = 1;

/// Run one line in a fresh session built from the default config.
///
/// This is the main entry point for tests and simple usage. Interactive use
/// keeps a [`Session`] across lines so `cd` and background jobs persist.
pub fn run_line(line: &str) -> error::Result<ExitCode> {
    Session::default().execute_line(line)
}
