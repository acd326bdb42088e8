//! Runtime configuration types for the logger
//!
//! These are the validated forms of `LoggerSettings`; string fields from the
//! configuration file have already been parsed into enums here.

use std::path::PathBuf;
use std::str::FromStr;

use jiff::{Span, Timestamp, ToSpan};
use tracing::Level;

use super::error::LoggerError;

const VALID_LEVELS: &str = "trace, debug, info, warn, error";

/// Main logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    /// A level name or any `EnvFilter` directive string
    pub level: String,
}

impl LoggerConfig {
    /// Create a new logger configuration with validation
    pub fn new(
        console: ConsoleConfig,
        file: FileConfig,
        level: String,
    ) -> Result<Self, LoggerError> {
        let config = Self {
            console,
            file,
            level,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        self.parse_level()?;
        self.file.validate()?;
        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }
        Ok(())
    }

    /// The most verbose level named in `level`.
    ///
    /// Accepts plain names (`debug`) and directive lists
    /// (`info,shop_rs=debug`).
    pub fn parse_level(&self) -> Result<Level, LoggerError> {
        let invalid = || {
            LoggerError::config(format!(
                "Invalid log level '{}'. Valid levels are: {}",
                self.level, VALID_LEVELS
            ))
        };

        let mut most_verbose: Option<Level> = None;
        for directive in self.level.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let name = directive.rsplit('=').next().unwrap_or(directive);
            let level = Level::from_str(name).map_err(|_| invalid())?;
            most_verbose = Some(most_verbose.map_or(level, |current| current.max(level)));
        }
        most_verbose.ok_or_else(invalid)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colors; only honored when stdout is a terminal
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
    pub rotation: RotationConfig,
}

impl FileConfig {
    /// Create a new file configuration with validation
    pub fn new(
        enabled: bool,
        path: PathBuf,
        append: bool,
        format: LogFormat,
        rotation: RotationConfig,
    ) -> Result<Self, LoggerError> {
        let config = Self {
            enabled,
            path,
            append,
            format,
            rotation,
        };
        config.validate()?;
        Ok(config)
    }

    /// Pure check; the writer creates missing directories.
    pub fn validate(&self) -> Result<(), LoggerError> {
        if !self.enabled {
            return Ok(());
        }
        if self.path.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "File path cannot be empty when file output is enabled",
            ));
        }
        self.rotation.validate()
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/shop.log"),
            append: true,
            format: LogFormat::Json,
            rotation: RotationConfig::default(),
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::config(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

/// File rotation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    pub strategy: RotationStrategy,
    /// Bytes; used by `Size` and `Combined`
    pub max_size: u64,
    /// Rotated files kept next to the live one
    pub max_files: usize,
    pub compress: bool,
}

impl RotationConfig {
    pub fn new(
        strategy: RotationStrategy,
        max_size: u64,
        max_files: usize,
        compress: bool,
    ) -> Result<Self, LoggerError> {
        let config = Self {
            strategy,
            max_size,
            max_files,
            compress,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.max_size == 0 {
            return Err(LoggerError::config("Maximum file size must be greater than 0"));
        }
        if self.max_files == 0 {
            return Err(LoggerError::config(
                "Maximum number of files must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            strategy: RotationStrategy::Size,
            max_size: 10 * 1024 * 1024,
            max_files: 5,
            compress: false,
        }
    }
}

/// When the live log file is rotated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RotationStrategy {
    #[default]
    Size,
    Time(TimeUnit),
    /// Size limit or a daily boundary, whichever comes first
    Combined,
}

impl FromStr for RotationStrategy {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "size" => Ok(RotationStrategy::Size),
            "combined" => Ok(RotationStrategy::Combined),
            "time" | "daily" | "time_daily" => Ok(RotationStrategy::Time(TimeUnit::Daily)),
            "hourly" | "time_hourly" => Ok(RotationStrategy::Time(TimeUnit::Hourly)),
            "weekly" | "time_weekly" => Ok(RotationStrategy::Time(TimeUnit::Weekly)),
            _ => Err(LoggerError::config(format!(
                "Invalid rotation strategy '{}'. Valid strategies are: size, time, daily, \
                hourly, weekly, combined",
                s
            ))),
        }
    }
}

/// Time units for time-based rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hourly,
    Daily,
    Weekly,
}

impl TimeUnit {
    pub fn span(&self) -> Span {
        match self {
            TimeUnit::Hourly => 1.hour(),
            TimeUnit::Daily => 24.hours(),
            TimeUnit::Weekly => (7 * 24).hours(),
        }
    }

    /// Whether a full unit has passed between `since` and `now`.
    pub fn elapsed(&self, since: Timestamp, now: Timestamp) -> bool {
        since
            .checked_add(self.span())
            .map(|deadline| now >= deadline)
            .unwrap_or(false)
    }
}
