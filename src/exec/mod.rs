//! Process execution: single commands, pipelines, built-ins and background jobs.

pub mod builtin;
pub mod jobs;
pub mod pipeline;
pub mod single;

pub use builtin::Builtin;
pub use jobs::{Job, JobSlot};
pub use pipeline::run_pipeline;
pub use single::{prepare_stage, run_single};

use std::io;
use std::process::{Child, Command, ExitStatus};

use crate::ExitCode;
use crate::error::{Result, ShellError};

/// Convert a process exit status to a shell status code.
///
/// A process killed by a signal reports `128 + signal`.
pub fn status_code(status: ExitStatus) -> ExitCode {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    crate::FAILURE
}

pub(crate) fn spawn(command: &mut Command, program: &str) -> Result<Child> {
    let child = command
        .spawn()
        .map_err(|e| ShellError::from_spawn(program, e))?;
    log::info!("spawned {program} (pid {})", child.id());
    Ok(child)
}

pub(crate) fn wait_child(mut child: Child) -> Result<ExitCode> {
    let status = child.wait().map_err(ShellError::Wait)?;
    log::debug!("pid {} exited: {status}", child.id());
    Ok(status_code(status))
}

/// Wait for every child in order and return the last one's status.
///
/// A failed wait does not stop the rest from being reaped; the first failure
/// is returned once all of them have been waited for.
pub(crate) fn wait_all(children: Vec<Child>) -> Result<ExitCode> {
    last_status(children.into_iter().map(|mut child| child.wait()))
}

fn last_status(waits: impl Iterator<Item = io::Result<ExitStatus>>) -> Result<ExitCode> {
    let mut code = crate::SUCCESS;
    let mut failure = None;
    for wait in waits {
        match wait {
            Ok(status) => code = status_code(status),
            Err(e) => {
                failure.get_or_insert(ShellError::Wait(e));
            }
        }
    }
    failure.map_or(Ok(code), Err)
}

pub(crate) fn announce_background(pid: u32) {
    println!("Background process running with PID: {pid}");
}
