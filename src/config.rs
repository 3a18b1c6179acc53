use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub shell: ShellSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bounds on the size of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Limits {
    /// Maximum commands per line (`MAX_PIPES`).
    pub max_pipes: usize,
    /// Maximum words per command (`MAX_ARGS`).
    pub max_args: usize,
}

impl Limits {
    pub const DEFAULT_MAX_PIPES: usize = 6;
    pub const DEFAULT_MAX_ARGS: usize = 5;

    /// Maximum tokens (segments plus operators) per line.
    pub fn max_tokens(&self) -> usize {
        (2 * self.max_pipes).saturating_sub(1)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_pipes: Self::DEFAULT_MAX_PIPES,
            max_args: Self::DEFAULT_MAX_ARGS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShellSettings {
    pub prompt: String,
    /// Stop evaluating a line at its first `#` instead of passing through.
    #[serde(default)]
    pub comment_ends_line: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            prompt: "shell24$ ".into(),
            comment_ends_line: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file path; empty selects the default location.
    #[serde(default)]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: String::new(),
        }
    }
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    limits: LimitsOverlay,
    #[serde(default)]
    shell: ShellOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct LimitsOverlay {
    max_pipes: Option<usize>,
    max_args: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
struct ShellOverlay {
    prompt: Option<String>,
    comment_ends_line: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    level: Option<String>,
    file: Option<String>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!("embedded default config does not parse: {e}");
            Self::default()
        })
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/shell24/config.toml (if exists)
    ///
    /// Scalars present in the overlay replace the defaults.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Defaults with an overlay given as TOML text applied on top.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        let overlay: ConfigOverlay = toml::from_str(toml_str)?;
        let mut config = Self::default_config();
        config.apply_overlay(overlay);
        Ok(config)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Try to load user overlay from ~/.config/shell24/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/shell24/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("shell24: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Limits: zero would reject every line, keep the previous value
        let l = overlay.limits;
        if let Some(v) = l.max_pipes.filter(|&v| v > 0) {
            self.limits.max_pipes = v;
        }
        if let Some(v) = l.max_args.filter(|&v| v > 0) {
            self.limits.max_args = v;
        }

        let s = overlay.shell;
        if let Some(v) = s.prompt {
            self.shell.prompt = v;
        }
        if let Some(v) = s.comment_ends_line {
            self.shell.comment_ends_line = v;
        }

        let lg = overlay.logging;
        if let Some(v) = lg.level {
            self.logging.level = v;
        }
        if let Some(v) = lg.file {
            self.logging.file = v;
        }
    }
}
