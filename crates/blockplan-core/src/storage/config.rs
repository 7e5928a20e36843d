//! TOML-based application configuration.
//!
//! Stores the scheduling preferences used by the CLI:
//! - Working hours
//! - Focus block and break lengths
//! - Lunch policy
//! - Morning prioritization and energy level
//!
//! Configuration is stored at `~/.config/blockplan/config.toml`.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::preferences::{LunchPolicy, SchedulingPreferences};
use crate::time_of_day::hhmm;

/// Scheduling section of the configuration file. Durations are minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    #[serde(default = "default_start_time", with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(default = "default_end_time", with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default = "default_break_duration")]
    pub break_duration: u32,
    #[serde(default = "default_focus_block_duration")]
    pub focus_block_duration: u32,
    #[serde(default)]
    pub lunch_break: bool,
    #[serde(default = "default_lunch_time", with = "hhmm")]
    pub lunch_time: NaiveTime,
    #[serde(default = "default_lunch_duration")]
    pub lunch_duration: u32,
    #[serde(default)]
    pub prioritize_mornings: bool,
    #[serde(default = "default_energy_level")]
    pub energy_level: u8,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/blockplan/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

// Default functions
fn default_start_time() -> NaiveTime {
    SchedulingPreferences::default().work_start
}
fn default_end_time() -> NaiveTime {
    SchedulingPreferences::default().work_end
}
fn default_break_duration() -> u32 {
    SchedulingPreferences::default().break_minutes
}
fn default_focus_block_duration() -> u32 {
    SchedulingPreferences::default().focus_block_minutes
}
fn default_lunch_time() -> NaiveTime {
    LunchPolicy::default().start
}
fn default_lunch_duration() -> u32 {
    LunchPolicy::default().duration_minutes
}
fn default_energy_level() -> u8 {
    SchedulingPreferences::default().energy_level
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self::from(&SchedulingPreferences::default())
    }
}

impl From<&SchedulingPreferences> for SchedulingConfig {
    fn from(prefs: &SchedulingPreferences) -> Self {
        Self {
            start_time: prefs.work_start,
            end_time: prefs.work_end,
            break_duration: prefs.break_minutes,
            focus_block_duration: prefs.focus_block_minutes,
            lunch_break: prefs.lunch.enabled,
            lunch_time: prefs.lunch.start,
            lunch_duration: prefs.lunch.duration_minutes,
            prioritize_mornings: prefs.prioritize_mornings,
            energy_level: prefs.energy_level,
        }
    }
}

impl From<&SchedulingConfig> for SchedulingPreferences {
    fn from(cfg: &SchedulingConfig) -> Self {
        Self {
            work_start: cfg.start_time,
            work_end: cfg.end_time,
            break_minutes: cfg.break_duration,
            focus_block_minutes: cfg.focus_block_duration,
            lunch: LunchPolicy {
                enabled: cfg.lunch_break,
                start: cfg.lunch_time,
                duration_minutes: cfg.lunch_duration,
            },
            prioritize_mornings: cfg.prioritize_mornings,
            energy_level: cfg.energy_level,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as bool: {e}")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        toml::from_str(&content).map_err(|e| load_failed(e.to_string()))
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, in memory. Call [`save`](Self::save) to
    /// persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting preferences would be invalid. On error the config
    /// is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated
            .preferences()
            .validate()
            .map_err(|e| invalid(e.to_string()))?;

        *self = updated;
        Ok(())
    }

    /// The scheduling preferences described by this config.
    pub fn preferences(&self) -> SchedulingPreferences {
        SchedulingPreferences::from(&self.scheduling)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
