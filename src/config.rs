//! Typed runtime configuration.
//!
//! Configuration is read from a JSON document; every field is optional and
//! falls back to [`TaskmateConfig::default`]. The database URL may be
//! overridden from the environment via [`DATABASE_URL_ENV`].

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides [`TaskmateConfig::database_url`].
pub const DATABASE_URL_ENV: &str = "TASKMATE_DATABASE_URL";

/// Points awarded each time a task is marked completed.
pub const DEFAULT_COMPLETION_REWARD: u64 = 10;

/// Per-connection notification buffer length.
pub const DEFAULT_NOTIFICATION_BUFFER: usize = 32;

/// Look-ahead window for deadline reminders, in hours.
pub const DEFAULT_REMINDER_WINDOW_HOURS: u32 = 24;

/// Largest accepted reminder window, in hours (one leap year).
pub const MAX_REMINDER_WINDOW_HOURS: u32 = 24 * 366;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON for this schema.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds an unusable value.
    #[error("invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Runtime configuration for the taskmate services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskmateConfig {
    /// Points credited to a task owner per completion.
    pub completion_reward: u64,
    /// Buffered events per notification connection before drops occur.
    pub notification_buffer: usize,
    /// Hours ahead of now that a deadline must fall within to be reminded.
    pub reminder_window_hours: u32,
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Directory that receives uploaded avatar images.
    pub avatar_dir: Option<Utf8PathBuf>,
}

impl Default for TaskmateConfig {
    fn default() -> Self {
        Self {
            completion_reward: DEFAULT_COMPLETION_REWARD,
            notification_buffer: DEFAULT_NOTIFICATION_BUFFER,
            reminder_window_hours: DEFAULT_REMINDER_WINDOW_HOURS,
            database_url: None,
            avatar_dir: None,
        }
    }
}

impl TaskmateConfig {
    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_json_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let read_error = |source| ConfigError::Read {
            path: path.to_owned(),
            source,
        };
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::other("path must include a file name"))
        })?;
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let contents = dir.read_to_string(file_name).map_err(read_error)?;
        Self::from_json_str(&contents)
    }

    /// Applies environment overrides using the supplied lookup.
    ///
    /// Production callers pass `|key| std::env::var(key).ok()`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.database_url = Some(url);
        }
        self
    }

    /// Returns the reminder look-ahead window.
    #[must_use]
    pub fn reminder_window(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.reminder_window_hours))
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.notification_buffer == 0 {
            return Err(ConfigError::Invalid {
                field: "notification_buffer",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.reminder_window_hours == 0 {
            return Err(ConfigError::Invalid {
                field: "reminder_window_hours",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.reminder_window_hours > MAX_REMINDER_WINDOW_HOURS {
            return Err(ConfigError::Invalid {
                field: "reminder_window_hours",
                reason: format!("must be at most {MAX_REMINDER_WINDOW_HOURS}"),
            });
        }
        Ok(self)
    }
}
