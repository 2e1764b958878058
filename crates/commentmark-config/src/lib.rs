//! Configuration management for commentmark.
//!
//! Parses `commentmark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [comment]
//! width = 80
//! gutter = " *"
//!
//! [markdown]
//! tables = true
//! tasklists = true
//! ```

use commentmark_renderer::CommentStyle;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override comment block width.
    pub width: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "commentmark.toml";

/// Upper bound for `comment.width`.
const MAX_WIDTH: usize = 1000;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comment block layout.
    pub comment: CommentConfig,
    /// Markdown parser extensions.
    pub markdown: MarkdownConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Comment block layout.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommentConfig {
    /// Width of frame and rule lines.
    pub width: usize,
    /// Spaces before the first line of a text run.
    pub text_indent: usize,
    /// Spaces before list item markers and links.
    pub item_indent: usize,
    /// Left-margin prefix of body lines.
    pub gutter: String,
    /// Opening comment line.
    pub open: String,
    /// Closing comment line.
    pub close: String,
    /// Frame line character (single character).
    pub frame_char: String,
    /// Horizontal rule character (single character).
    pub rule_char: String,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            width: 100,
            text_indent: 3,
            item_indent: 4,
            gutter: " *".to_owned(),
            open: "/*".to_owned(),
            close: " */".to_owned(),
            frame_char: "=".to_owned(),
            rule_char: "-".to_owned(),
        }
    }
}

impl CommentConfig {
    /// Frame line character.
    ///
    /// Only meaningful after validation, which guarantees a single character.
    #[must_use]
    pub fn frame_char(&self) -> char {
        self.frame_char.chars().next().unwrap_or('=')
    }

    /// Horizontal rule character.
    #[must_use]
    pub fn rule_char(&self) -> char {
        self.rule_char.chars().next().unwrap_or('-')
    }

    /// Validate layout values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_width = CommentStyle::min_width(self.text_indent);
        if self.width <= min_width {
            return Err(ConfigError::Validation(format!(
                "comment.width must be greater than {min_width}"
            )));
        }
        if self.width > MAX_WIDTH {
            return Err(ConfigError::Validation(format!(
                "comment.width cannot exceed {MAX_WIDTH}"
            )));
        }
        require_non_empty(&self.gutter, "comment.gutter")?;
        require_non_empty(&self.open, "comment.open")?;
        require_non_empty(&self.close, "comment.close")?;
        require_single_char(&self.frame_char, "comment.frame_char")?;
        require_single_char(&self.rule_char, "comment.rule_char")?;
        Ok(())
    }
}

/// Markdown parser extensions.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MarkdownConfig {
    /// Pipe tables.
    pub tables: bool,
    /// `~~strikethrough~~` spans.
    pub strikethrough: bool,
    /// `- [ ]` task list markers.
    pub tasklists: bool,
    /// `[^note]` footnotes.
    pub footnotes: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: false,
            footnotes: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a string field to hold exactly one character.
fn require_single_char(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.chars().count() != 1 {
        return Err(ConfigError::Validation(format!(
            "{field} must be a single character"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `commentmark.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and take precedence over config
    /// file values. The merged result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(width) = settings.width {
            self.comment.width = width;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.comment.validate()
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}
