//! The interpreter's per-process state.

use crate::config::Config;
use crate::error::{Result, report};
use crate::exec::{Builtin, JobSlot};
use crate::parse::{self, Token};
use crate::{ExitCode, FAILURE, SUCCESS, eval};

/// Owns everything that outlives a single input line: configuration, the
/// background job slot, the last status and a pending exit request.
#[derive(Debug)]
pub struct Session {
    config: Config,
    jobs: JobSlot,
    last_status: ExitCode,
    exit: Option<ExitCode>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            jobs: JobSlot::new(),
            last_status: SUCCESS,
            exit: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and run one line of input.
    ///
    /// The whole line is checked before anything runs: a parse error
    /// discards it without spawning a process.
    pub fn execute_line(&mut self, line: &str) -> Result<ExitCode> {
        self.jobs.reap();
        let line = line.trim();
        if line.is_empty() {
            return Ok(self.last_status);
        }

        let result = parse::parse_line(line, &self.config).and_then(|tokens| {
            if tokens.is_empty() {
                return Ok(self.last_status);
            }
            check_commands(&tokens)?;
            eval::evaluate(self, &tokens)
        });
        match result {
            Ok(code) => {
                self.last_status = code;
                Ok(code)
            }
            Err(e) => {
                self.last_status = e.exit_code();
                Err(e)
            }
        }
    }

    /// Wait for the background job, if any, and clear the slot.
    pub fn foreground(&mut self) -> ExitCode {
        let Some(job) = self.jobs.take() else {
            println!("No background process to bring to the foreground");
            return FAILURE;
        };
        println!("Bringing process {} to the foreground", job.pid);
        match job.wait() {
            Ok(code) => code,
            Err(e) => {
                report(&e);
                e.exit_code()
            }
        }
    }

    /// Status of the most recently completed command.
    pub fn last_status(&self) -> ExitCode {
        self.last_status
    }

    pub(crate) fn set_last_status(&mut self, code: ExitCode) {
        self.last_status = code;
    }

    /// Set once an `exit` built-in has run.
    pub fn exit_requested(&self) -> Option<ExitCode> {
        self.exit
    }

    pub(crate) fn request_exit(&mut self, code: ExitCode) {
        self.exit = Some(code);
    }

    pub fn jobs(&self) -> &JobSlot {
        &self.jobs
    }

    pub(crate) fn jobs_mut(&mut self) -> &mut JobSlot {
        &mut self.jobs
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default_config())
    }
}

/// Parse every segment ahead of execution so malformed redirections and
/// built-in arguments reject the line before anything starts.
fn check_commands(tokens: &[Token]) -> Result<()> {
    for text in tokens.iter().filter_map(Token::as_segment) {
        let cmd = parse::parse_command(text)?;
        Builtin::from_command(&cmd)?;
    }
    Ok(())
}
