//! Types produced by the line parser and consumed by the evaluator.

use std::fmt;

/// Control operator separating consecutive command segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `&&` — run next only if previous succeeded
    And,
    /// `||` — run next only if previous failed
    Or,
    /// `|` — pipe stdout into the next command
    Pipe,
    /// `;` — run next unconditionally
    Seq,
    /// `#` — comment marker
    Comment,
}

impl Operator {
    /// The operator's shell syntax.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Pipe => "|",
            Operator::Seq => ";",
            Operator::Comment => "#",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a partitioned line: either a command segment or an operator.
///
/// A partitioned line never holds two operators back to back; the partitioner
/// emits a (possibly empty) segment between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Raw command text between two operators, untrimmed.
    Segment(String),
    Op(Operator),
}

impl Token {
    pub fn segment(text: impl Into<String>) -> Self {
        Token::Segment(text.into())
    }

    pub fn as_segment(&self) -> Option<&str> {
        match self {
            Token::Segment(text) => Some(text),
            Token::Op(_) => None,
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Token::Segment(_) => None,
            Token::Op(op) => Some(*op),
        }
    }

    pub fn is_op(&self, op: Operator) -> bool {
        self.operator() == Some(op)
    }
}

/// How an output redirection opens its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `>` — create or truncate
    Truncate,
    /// `>>` — create or append
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRedirect {
    pub path: String,
    pub mode: OutputMode,
}

/// A single command segment broken into program, arguments and redirections.
///
/// `argv[0]` is the program name. Redirection operators and their targets
/// never appear in `argv`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCommand {
    pub argv: Vec<String>,
    /// `< path`
    pub input: Option<String>,
    /// `> path` or `>> path`
    pub output: Option<OutputRedirect>,
    /// Trailing `&`.
    pub background: bool,
}

impl ParsedCommand {
    /// The program to execute.
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("")
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }

    /// Serialize back to a single-spaced command line.
    pub fn to_line(&self) -> String {
        let mut words: Vec<&str> = self.argv.iter().map(String::as_str).collect();
        if let Some(input) = &self.input {
            words.push("<");
            words.push(input);
        }
        if let Some(output) = &self.output {
            words.push(match output.mode {
                OutputMode::Truncate => ">",
                OutputMode::Append => ">>",
            });
            words.push(&output.path);
        }
        if self.background {
            words.push("&");
        }
        words.join(" ")
    }
}
