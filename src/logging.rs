use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::config::LoggingConfig;

/// Install a file logger as configured.
///
/// Best-effort: if the log file cannot be opened logging stays disabled and
/// the shell keeps working. Returns the path being written to, if any.
pub fn init(config: &LoggingConfig) -> Option<PathBuf> {
    let level = parse_level(&config.level);
    if level == LevelFilter::Off {
        return None;
    }

    let path = log_path(config)?;
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, log_config, file).ok()?;
    Some(path)
}

/// Parse a level name, falling back to `info` for unknown names.
pub fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Configured log file, or ~/.local/share/shell24/shell24.log.
fn log_path(config: &LoggingConfig) -> Option<PathBuf> {
    if !config.file.is_empty() {
        return Some(PathBuf::from(shellexpand::tilde(&config.file).into_owned()));
    }
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".local/share/shell24/shell24.log"))
}
