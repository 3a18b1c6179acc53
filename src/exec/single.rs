//! Run one command segment: built-ins in process, everything else spawned
//! with its redirections applied.

use std::fs::{File, OpenOptions};
use std::process::Command;

use super::builtin::Builtin;
use super::jobs::Job;
use super::{announce_background, spawn, wait_child};
use crate::error::{Result, ShellError};
use crate::parse::{OutputMode, OutputRedirect, ParsedCommand, parse_command};
use crate::session::Session;
use crate::{ExitCode, SUCCESS};

/// Execute a single command segment.
///
/// Foreground commands are waited for and their status returned. Background
/// commands are recorded in the session's job slot and report success at
/// once.
pub fn run_single(session: &mut Session, segment: &str) -> Result<ExitCode> {
    let cmd = parse_command(segment)?;
    if let Some(builtin) = Builtin::from_command(&cmd)? {
        log::debug!("builtin {}", builtin.name());
        return builtin.run(session);
    }

    let mut command = prepare_stage(&cmd)?;
    let child = spawn(&mut command, cmd.program())?;
    // Drop the redirection handles held by the builder before blocking.
    drop(command);

    if !cmd.background {
        return wait_child(child);
    }
    announce_background(child.id());
    if let Some(job) = Job::new(vec![child]) {
        session.jobs_mut().register(job);
    }
    Ok(SUCCESS)
}

/// Build the process for a parsed command with its file redirections.
///
/// Streams without a redirection are left for the caller to set; the
/// pipeline builder uses this to attach pipe ends.
pub fn prepare_stage(cmd: &ParsedCommand) -> Result<Command> {
    let mut command = Command::new(cmd.program());
    command.args(cmd.args());
    if let Some(path) = &cmd.input {
        command.stdin(open_input(path)?);
    }
    if let Some(redirect) = &cmd.output {
        command.stdout(open_output(redirect)?);
    }
    Ok(command)
}

pub fn open_input(path: &str) -> Result<File> {
    File::open(path).map_err(|source| ShellError::Redirect {
        path: path.to_string(),
        source,
    })
}

pub fn open_output(redirect: &OutputRedirect) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true);
    match redirect.mode {
        OutputMode::Truncate => options.truncate(true),
        OutputMode::Append => options.append(true),
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    options.open(&redirect.path).map_err(|source| ShellError::Redirect {
        path: redirect.path.clone(),
        source,
    })
}
