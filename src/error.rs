//! Error types for shell24.
//!
//! Errors fall into two scopes. Line-scoped errors (`Parse`, `Spawn`, `Wait`)
//! abort whatever is left of the current input line. Command-scoped errors
//! (`Redirect`, `Exec`, `ChangeDirectory`) only fail the command that raised
//! them; the evaluator reports them and carries on with a failure status.

use std::io;

use thiserror::Error;

use crate::ExitCode;

/// Result type alias using [`ShellError`].
pub type Result<T> = std::result::Result<T, ShellError>;

#[derive(Error, Debug)]
pub enum ShellError {
    /// Malformed operator sequence, too many words or too many tokens.
    #[error("parse error: {0}")]
    Parse(String),

    /// The OS refused to create a process.
    #[error("cannot spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A redirection target could not be opened.
    #[error("{path}: {source}")]
    Redirect {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Program not found or not executable.
    #[error("{program}: {}", exec_reason(.source))]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cd: {path}: {source}")]
    ChangeDirectory {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Waiting on a child process failed.
    #[error("wait failed: {0}")]
    Wait(#[source] io::Error),
}

fn exec_reason(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "command not found".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => err.to_string(),
    }
}

impl ShellError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Classify a failed `Command::spawn`.
    ///
    /// A missing or non-executable program only fails that command; anything
    /// else means the OS could not create a process at all.
    pub fn from_spawn(program: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => Self::Exec {
                program: program.to_string(),
                source,
            },
            _ => Self::Spawn {
                program: program.to_string(),
                source,
            },
        }
    }

    /// Whether the error only fails the command that raised it.
    pub fn is_command_scoped(&self) -> bool {
        matches!(
            self,
            Self::Redirect { .. } | Self::Exec { .. } | Self::ChangeDirectory { .. }
        )
    }

    /// Status reported for a command that failed with this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Exec { source, .. } if source.kind() == io::ErrorKind::NotFound => 127,
            Self::Exec { .. } => 126,
            Self::Parse(_) => 2,
            _ => crate::FAILURE,
        }
    }
}

/// Show an error to the user and record it in the log.
pub fn report(err: &ShellError) {
    log::warn!("{err}");
    eprintln!("shell24: {err}");
}
