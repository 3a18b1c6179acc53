//! shell24: interactive shell.
//!
//! Reads a line at a time, expands `~`, and hands it to the session.
//! With `-c` it runs a single line and exits with its status.

use argh::FromArgs;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use shell24::parse::format_line;
use shell24::{Config, ExitCode, Session, error::report, logging};

/// A small shell with pipelines, redirection and background jobs.
#[derive(FromArgs)]
struct Cli {
    /// run a single command line and exit
    #[argh(option, short = 'c')]
    command: Option<String>,

    /// print the effective configuration and exit
    #[argh(switch)]
    dump_config: bool,

    /// do not write a log file
    #[argh(switch)]
    no_log: bool,
}

fn main() -> anyhow::Result<()> {
    let cli: Cli = argh::from_env();
    let config = Config::load();

    if cli.dump_config {
        print!("{}", config.to_toml());
        return Ok(());
    }
    if !cli.no_log
        && let Some(path) = logging::init(&config.logging)
    {
        log::info!("shell24 started, logging to {}", path.display());
    }

    let mut session = Session::new(config);

    if let Some(line) = cli.command {
        let code = run(&mut session, &line);
        std::process::exit(session.exit_requested().unwrap_or(code));
    }

    let mut editor = DefaultEditor::new()?;
    let prompt = session.config().shell.prompt.clone();
    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                run(&mut session, line);
                if let Some(code) = session.exit_requested() {
                    log::info!("exit {code}");
                    std::process::exit(code);
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn run(session: &mut Session, line: &str) -> ExitCode {
    let expanded = expand_tilde(line);
    match session.execute_line(&expanded) {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            e.exit_code()
        }
    }
}

/// Expand a leading `~` in every word.
///
/// The line is formatted first so redirection and pipe targets written
/// without spaces (`cat<~/f`) are words of their own.
fn expand_tilde(line: &str) -> String {
    format_line(line)
        .split(' ')
        .map(shellexpand::tilde)
        .collect::<Vec<_>>()
        .join(" ")
}
