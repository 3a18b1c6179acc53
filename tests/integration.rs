use std::path::Path;
use std::time::{Duration, Instant};

use serial_test::serial;
use shell24::{Config, Session, ShellError};
use tempfile::TempDir;

/// Scratch directory; commands write their output here so tests can read it.
struct Scratch {
    dir: TempDir,
}

impl Scratch {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    /// Absolute path of `name` inside the scratch directory.
    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name))
            .unwrap_or_else(|e| panic!("reading {name}: {e}"))
    }

    fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }
}

fn run(session: &mut Session, line: &str) -> i32 {
    session
        .execute_line(line)
        .unwrap_or_else(|e| panic!("line `{line}` failed: {e}"))
}

macro_rules! output_test {
    ($name:ident, $line:literal, $status:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let s = Scratch::new();
            let line = format!($line, out = s.path("out"));
            let mut session = Session::default();
            assert_eq!(run(&mut session, &line), $status, "line: {line}");
            assert_eq!(s.read("out"), $expected, "line: {line}");
        }
    };
}

macro_rules! skipped_test {
    ($name:ident, $line:literal, $status:expr) => {
        #[test]
        fn $name() {
            let s = Scratch::new();
            let line = format!($line, out = s.path("out"));
            let mut session = Session::default();
            assert_eq!(run(&mut session, &line), $status, "line: {line}");
            assert!(!s.exists("out"), "`out` must not be written by: {line}");
        }
    };
}

// ── Single commands and redirection ──

output_test!(echo_hi, "echo hi > {out}", 0, "hi\n");
output_test!(redirect_before_program, "> {out} echo hi", 0, "hi\n");
output_test!(append_twice, "echo a >> {out} ; echo b >> {out}", 0, "a\nb\n");
output_test!(truncate_after_append, "echo a >> {out} ; echo b > {out}", 0, "b\n");
output_test!(failed_command_status, "false ; echo after > {out}", 0, "after\n");

#[test]
fn redirect_then_read_back() {
    let s = Scratch::new();
    let mut session = Session::default();
    assert_eq!(run(&mut session, &format!("echo x > {}", s.path("out.txt"))), 0);
    assert_eq!(s.read("out.txt"), "x\n");
    assert_eq!(
        run(
            &mut session,
            &format!("cat {} > {}", s.path("out.txt"), s.path("copy.txt"))
        ),
        0
    );
    assert_eq!(s.read("copy.txt"), "x\n");
    assert_eq!(
        run(
            &mut session,
            &format!("cat < {} > {}", s.path("out.txt"), s.path("in.txt"))
        ),
        0
    );
    assert_eq!(s.read("in.txt"), "x\n");
}

#[test]
fn unspaced_operators_are_formatted() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("echo a|tr a b>{}", s.path("out"));
    assert_eq!(run(&mut session, &line), 0);
    assert_eq!(s.read("out"), "b\n");
}

// ── && / || short-circuit ──

skipped_test!(false_and_skips, "false && echo no > {out}", 1);
skipped_test!(true_or_skips, "true || echo no > {out}", 0);
output_test!(false_or_runs, "false || echo yes > {out}", 0, "yes\n");
output_test!(true_and_runs, "true && echo yes > {out}", 0, "yes\n");
output_test!(
    and_failure_falls_through_to_or,
    "false && echo no || echo yes > {out}",
    0,
    "yes\n"
);
output_test!(
    or_success_reaches_and,
    "true || echo no && echo yes > {out}",
    0,
    "yes\n"
);
skipped_test!(or_chain_skipped_entirely, "true || false || echo no > {out}", 0);
output_test!(seq_resets_skip, "false && echo no ; echo yes > {out}", 0, "yes\n");

// ── Pipelines ──

output_test!(two_stage_pipe, "echo a | tr a b > {out}", 0, "b\n");
output_test!(
    six_stage_pipe,
    "echo abc | cat | cat | cat | cat | tr a z > {out}",
    0,
    "zbc\n"
);
output_test!(pipe_with_input_file, "echo q | tr q r > {out} ; cat < {out}", 0, "r\n");

#[test]
fn stage_with_own_output_closes_pipe() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("echo a > {} | cat > {}", s.path("first"), s.path("second"));
    assert_eq!(run(&mut session, &line), 0);
    assert_eq!(s.read("first"), "a\n");
    assert_eq!(s.read("second"), "");
}

skipped_test!(pipeline_failure_short_circuits, "true | false && echo no > {out}", 1);
output_test!(
    pipeline_success_continues,
    "false | true && echo yes > {out}",
    0,
    "yes\n"
);

// Skipping into a pipe drops the pipe and its right-hand stage; a longer
// pipe keeps its tail, which then runs on its own.
skipped_test!(skip_swallows_two_stage_pipe, "false && echo a | tr a b > {out}", 1);
skipped_test!(or_skip_swallows_two_stage_pipe, "true || echo a | tr a b > {out}", 0);
output_test!(
    or_skip_leaves_pipe_tail,
    "true || echo a | cat | echo tail > {out}",
    0,
    "tail\n"
);
output_test!(
    skip_leaves_pipe_tail,
    "false && echo a | cat | echo tail > {out}",
    0,
    "tail\n"
);

#[test]
fn failed_stage_does_not_block_neighbours() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("cat < {} | echo ok > {}", s.path("missing"), s.path("out"));
    assert_eq!(run(&mut session, &line), 0);
    assert_eq!(s.read("out"), "ok\n");
}

// ── Errors scoped to one command ──

#[test]
fn missing_input_file_fails_command_only() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("cat < {} || echo fallback > {}", s.path("nope"), s.path("out"));
    assert_eq!(run(&mut session, &line), 0);
    assert_eq!(s.read("out"), "fallback\n");
}

#[test]
fn unknown_program_fails_command_only() {
    let s = Scratch::new();
    let mut session = Session::default();
    assert_eq!(run(&mut session, "no-such-program-shell24"), 127);
    let line = format!("no-such-program-shell24 || echo ok > {}", s.path("out"));
    assert_eq!(run(&mut session, &line), 0);
    assert_eq!(s.read("out"), "ok\n");
}

// ── Whole-line parse errors ──

#[test]
fn six_words_rejects_line_before_running() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("echo x > {} ; echo 1 2 3 4 5", s.path("out"));
    assert!(matches!(session.execute_line(&line), Err(ShellError::Parse(_))));
    assert!(!s.exists("out"));
}

#[test]
fn too_many_commands_rejects_line() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("echo x > {} ; true ; true ; true ; true ; true ; true", s.path("out"));
    assert!(matches!(session.execute_line(&line), Err(ShellError::Parse(_))));
    assert!(!s.exists("out"));
}

#[test]
fn six_commands_accepted() {
    let mut session = Session::default();
    assert_eq!(run(&mut session, "true ; true ; true ; true ; true ; false"), 1);
}

#[test]
fn bare_background_marker_rejects_line() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("echo x > {} ; &", s.path("out"));
    assert!(matches!(session.execute_line(&line), Err(ShellError::Parse(_))));
    assert!(!s.exists("out"));
}

#[test]
fn pipe_into_bare_background_marker_rejects_line() {
    let mut session = Session::default();
    assert!(matches!(
        session.execute_line("echo a | &"),
        Err(ShellError::Parse(_))
    ));
    assert!(session.jobs().current_pid().is_none());
}

#[test]
fn trailing_operator_rejects_line() {
    let mut session = Session::default();
    assert!(session.execute_line("true ;").is_err());
    assert!(session.execute_line("&& true").is_err());
}

// ── Comments ──

#[test]
fn comment_passes_through_by_default() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("echo a > {} # echo b > {}", s.path("a"), s.path("b"));
    assert_eq!(run(&mut session, &line), 0);
    assert!(s.exists("a"));
    assert!(s.exists("b"));
}

#[test]
fn comment_can_end_the_line() {
    let s = Scratch::new();
    let config = Config::from_toml_str("[shell]\ncomment_ends_line = true").unwrap();
    let mut session = Session::new(config);
    let line = format!("echo a > {} # echo b > {}", s.path("a"), s.path("b"));
    assert_eq!(run(&mut session, &line), 0);
    assert!(s.exists("a"));
    assert!(!s.exists("b"));
}

fn comment_session() -> Session {
    Session::new(Config::from_toml_str("[shell]\ncomment_ends_line = true").unwrap())
}

#[test]
fn long_trailing_comment_is_ignored() {
    let s = Scratch::new();
    let mut session = comment_session();
    let line = format!("echo a > {} # this is a long trailing comment here", s.path("out"));
    assert_eq!(run(&mut session, &line), 0);
    assert_eq!(s.read("out"), "a\n");
}

#[test]
fn comment_only_line_is_a_no_op() {
    let mut session = comment_session();
    run(&mut session, "false");
    assert_eq!(run(&mut session, "# just a note"), 1);
    assert_eq!(session.last_status(), 1);
}

#[test]
fn trailing_bare_comment() {
    let mut session = comment_session();
    assert_eq!(run(&mut session, "true #"), 0);
    assert_eq!(run(&mut session, "false#"), 1);
}

// ── Background jobs ──

#[test]
fn background_returns_immediately_and_fg_waits() {
    let mut session = Session::default();
    let start = Instant::now();
    assert_eq!(run(&mut session, "sleep 1 &"), 0);
    assert!(start.elapsed() < Duration::from_millis(900));
    assert!(session.jobs().current_pid().is_some());

    assert_eq!(run(&mut session, "fg"), 0);
    assert!(start.elapsed() >= Duration::from_secs(1));
    assert!(session.jobs().current_pid().is_none());
}

#[test]
fn fg_without_background_job() {
    let mut session = Session::default();
    assert_eq!(run(&mut session, "fg"), 1);
}

#[test]
fn new_background_job_replaces_slot() {
    let mut session = Session::default();
    run(&mut session, "sleep 0.3 &");
    let first = session.jobs().current_pid();
    run(&mut session, "sleep 0.3 &");
    let second = session.jobs().current_pid();
    assert!(first.is_some() && second.is_some());
    assert_ne!(first, second);
    assert_eq!(run(&mut session, "fg"), 0);
    assert_eq!(run(&mut session, "fg"), 1);
}

#[test]
fn background_pipeline() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("echo a | cat > {} &", s.path("out"));
    assert_eq!(run(&mut session, &line), 0);
    assert!(session.jobs().current_pid().is_some());
    // The job may already be done; a new line would reap it, so wait directly.
    assert_eq!(session.foreground(), 0);
    assert_eq!(s.read("out"), "a\n");
}

// ── Built-ins ──

#[test]
fn exit_stops_the_line() {
    let s = Scratch::new();
    let mut session = Session::default();
    let line = format!("exit 3 ; echo no > {}", s.path("out"));
    assert_eq!(run(&mut session, &line), 3);
    assert_eq!(session.exit_requested(), Some(3));
    assert!(!s.exists("out"));
}

#[test]
#[serial]
fn cd_changes_working_directory() {
    let s = Scratch::new();
    let original = std::env::current_dir().unwrap();
    let mut session = Session::default();

    assert_eq!(run(&mut session, &format!("cd {}", s.dir.path().display())), 0);
    assert_eq!(run(&mut session, "echo here > rel.txt"), 0);
    std::env::set_current_dir(&original).unwrap();

    assert_eq!(s.read("rel.txt"), "here\n");
}

#[test]
#[serial]
fn cd_to_missing_directory_keeps_cwd() {
    let original = std::env::current_dir().unwrap();
    let mut session = Session::default();
    assert_eq!(run(&mut session, "cd /definitely/not/here"), 1);
    assert_eq!(std::env::current_dir().unwrap(), original);
}

#[test]
#[serial]
fn cd_without_argument_goes_home() {
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    if !Path::new(&home).is_dir() {
        return;
    }
    let original = std::env::current_dir().unwrap();
    let mut session = Session::default();
    assert_eq!(run(&mut session, "cd"), 0);
    let now = std::env::current_dir().unwrap();
    std::env::set_current_dir(&original).unwrap();
    assert_eq!(now.canonicalize().unwrap(), Path::new(&home).canonicalize().unwrap());
}

// ── Session state ──

#[test]
fn last_status_tracks_foreground_command() {
    let mut session = Session::default();
    run(&mut session, "false");
    assert_eq!(session.last_status(), 1);
    run(&mut session, "true");
    assert_eq!(session.last_status(), 0);
}

#[test]
fn run_line_convenience() {
    assert_eq!(shell24::run_line("true").unwrap(), 0);
    assert_eq!(shell24::run_line("false").unwrap(), 1);
}
