//! Pipelines: a chain of commands connected stdout → stdin.
//!
//! Stages are spawned left to right, all before any wait. Each adjacent pair
//! shares one anonymous pipe. Every pipe end is moved into exactly one child's
//! stdio and the interpreter's copy is closed as soon as that child has been
//! spawned, so a reader sees end-of-stream when its writer exits.

use std::process::Child;

use os_pipe::{PipeReader, PipeWriter};

use super::builtin::is_builtin;
use super::jobs::Job;
use super::single::prepare_stage;
use super::{announce_background, spawn, wait_all};
use crate::error::{Result, ShellError, report};
use crate::parse::{ParsedCommand, parse_command};
use crate::session::Session;
use crate::{ExitCode, SUCCESS};

/// Run `segments` as one pipeline and return the final stage's status.
///
/// The background marker is taken from the final stage. A stage that cannot
/// start (bad redirection, unknown program) is reported and skipped; its
/// neighbours still run and are waited for.
pub fn run_pipeline(session: &mut Session, segments: &[String]) -> Result<ExitCode> {
    let stages = segments
        .iter()
        .map(|s| parse_command(s))
        .collect::<Result<Vec<_>>>()?;
    let Some(last_idx) = stages.len().checked_sub(1) else {
        return Ok(SUCCESS);
    };
    let background = stages[last_idx].background;

    let mut children: Vec<Child> = Vec::with_capacity(stages.len());
    let mut upstream: Option<PipeReader> = None;
    let mut final_started = false;
    let mut final_code = SUCCESS;

    for (idx, stage) in stages.iter().enumerate() {
        let stdin = upstream.take();
        let stdout = if idx < last_idx {
            match os_pipe::pipe() {
                Ok((reader, writer)) => {
                    upstream = Some(reader);
                    Some(writer)
                }
                Err(source) => {
                    reap_all(children);
                    return Err(ShellError::Spawn {
                        program: "pipe".into(),
                        source,
                    });
                }
            }
        } else {
            None
        };

        match start_stage(stage, stdin, stdout) {
            Ok(Some(child)) => {
                children.push(child);
                final_started = idx == last_idx;
            }
            Ok(None) => {}
            Err(e) if e.is_command_scoped() => {
                report(&e);
                if idx == last_idx {
                    final_code = e.exit_code();
                }
            }
            Err(e) => {
                reap_all(children);
                return Err(e);
            }
        }
    }

    if background {
        if let Some(job) = Job::new(children) {
            announce_background(job.pid);
            session.jobs_mut().register(job);
        }
        return Ok(SUCCESS);
    }

    let code = wait_all(children)?;
    Ok(if final_started { code } else { final_code })
}

/// Spawn one stage with the given pipe ends.
///
/// A stage's own `<` or `>` redirection takes precedence over the pipe; the
/// unused pipe end is dropped here, closing it. Returns `None` for built-ins,
/// which spawn nothing.
fn start_stage(
    stage: &ParsedCommand,
    stdin: Option<PipeReader>,
    stdout: Option<PipeWriter>,
) -> Result<Option<Child>> {
    if is_builtin(stage.program()) {
        log::warn!("{} has no effect inside a pipeline", stage.program());
        eprintln!("shell24: {}: has no effect inside a pipeline", stage.program());
        return Ok(None);
    }

    let mut command = prepare_stage(stage)?;
    if stage.input.is_none()
        && let Some(reader) = stdin
    {
        command.stdin(reader);
    }
    if stage.output.is_none()
        && let Some(writer) = stdout
    {
        command.stdout(writer);
    }
    spawn(&mut command, stage.program()).map(Some)
}

/// Wait for already spawned stages after the pipeline was abandoned.
fn reap_all(children: Vec<Child>) {
    if let Err(e) = wait_all(children) {
        log::warn!("reaping abandoned pipeline: {e}");
    }
}
