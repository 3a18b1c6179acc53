//! Commands that run inside the interpreter process instead of being spawned.

use crate::error::{Result, ShellError};
use crate::parse::ParsedCommand;
use crate::session::Session;
use crate::{ExitCode, SUCCESS};

pub const BUILTINS: &[&str] = &["exit", "cd", "fg"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Builtin {
    /// `exit [code]` — stop the interpreter.
    Exit(ExitCode),
    /// `cd [dir]` — change directory, `$HOME` by default.
    Cd(Option<String>),
    /// `fg` — wait for the most recent background job.
    Fg,
}

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

impl Builtin {
    /// Recognize a built-in, checking its arguments.
    ///
    /// Returns `Ok(None)` for anything that must be spawned.
    pub fn from_command(cmd: &ParsedCommand) -> Result<Option<Self>> {
        let args = cmd.args();
        let builtin = match cmd.program() {
            "exit" => match args {
                [] => Builtin::Exit(SUCCESS),
                [code] => Builtin::Exit(code.parse().map_err(|_| {
                    ShellError::parse(format!("exit: {code}: numeric argument required"))
                })?),
                _ => return Err(ShellError::parse("exit: too many arguments")),
            },
            "cd" => match args {
                [] => Builtin::Cd(None),
                [dir] => Builtin::Cd(Some(dir.clone())),
                _ => return Err(ShellError::parse("cd: too many arguments")),
            },
            "fg" => Builtin::Fg,
            _ => return Ok(None),
        };
        Ok(Some(builtin))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Exit(_) => "exit",
            Builtin::Cd(_) => "cd",
            Builtin::Fg => "fg",
        }
    }

    pub fn run(self, session: &mut Session) -> Result<ExitCode> {
        match self {
            Builtin::Exit(code) => {
                session.request_exit(code);
                Ok(code)
            }
            Builtin::Cd(target) => {
                change_directory(target.as_deref())?;
                Ok(SUCCESS)
            }
            Builtin::Fg => Ok(session.foreground()),
        }
    }
}

/// Change the interpreter's working directory; `None` means home.
pub fn change_directory(target: Option<&str>) -> Result<()> {
    let path = shellexpand::tilde(target.unwrap_or("~")).into_owned();
    std::env::set_current_dir(&path)
        .map_err(|source| ShellError::ChangeDirectory { path: path.clone(), source })?;
    log::debug!("cwd now {path}");
    Ok(())
}
