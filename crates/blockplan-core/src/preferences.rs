//! Run-time configuration for a scheduling pass.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time_of_day::hhmm;

/// Optional lunch break that is treated as busy time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchPolicy {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_lunch_time", with = "hhmm")]
    pub start: NaiveTime,
    #[serde(default = "default_lunch_duration")]
    pub duration_minutes: u32,
}

/// Scheduling preferences.
///
/// All fields are optional when deserialized; missing ones take the defaults
/// below (09:00-17:00, 90 minute blocks, 15 minute breaks, energy 70).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingPreferences {
    #[serde(default = "default_work_start", with = "hhmm")]
    pub work_start: NaiveTime,
    #[serde(default = "default_work_end", with = "hhmm")]
    pub work_end: NaiveTime,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default = "default_focus_block_minutes")]
    pub focus_block_minutes: u32,
    #[serde(default)]
    pub lunch: LunchPolicy,
    #[serde(default)]
    pub prioritize_mornings: bool,
    /// 0-100
    #[serde(default = "default_energy_level")]
    pub energy_level: u8,
}

fn default_work_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}
fn default_work_end() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default()
}
fn default_lunch_time() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}
fn default_lunch_duration() -> u32 {
    60
}
fn default_break_minutes() -> u32 {
    15
}
fn default_focus_block_minutes() -> u32 {
    90
}
fn default_energy_level() -> u8 {
    70
}

impl Default for LunchPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            start: default_lunch_time(),
            duration_minutes: default_lunch_duration(),
        }
    }
}

impl Default for SchedulingPreferences {
    fn default() -> Self {
        Self {
            work_start: default_work_start(),
            work_end: default_work_end(),
            break_minutes: default_break_minutes(),
            focus_block_minutes: default_focus_block_minutes(),
            lunch: LunchPolicy::default(),
            prioritize_mornings: false,
            energy_level: default_energy_level(),
        }
    }
}

impl SchedulingPreferences {
    pub fn break_duration(&self) -> Duration {
        Duration::minutes(self.break_minutes.into())
    }

    pub fn focus_block_duration(&self) -> Duration {
        Duration::minutes(self.focus_block_minutes.into())
    }

    pub fn lunch_duration(&self) -> Duration {
        Duration::minutes(self.lunch.duration_minutes.into())
    }

    /// Hard validation for callers that want it. The scheduler itself
    /// tolerates invalid preferences and produces empty results.
    ///
    /// # Errors
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.work_start >= self.work_end {
            return Err(ValidationError::invalid(
                "work_start",
                format!(
                    "must be before work_end ({} >= {})",
                    self.work_start.format("%H:%M"),
                    self.work_end.format("%H:%M")
                ),
            ));
        }
        if self.focus_block_minutes == 0 {
            return Err(ValidationError::invalid("focus_block_minutes", "must be positive"));
        }
        if self.break_minutes == 0 {
            return Err(ValidationError::invalid("break_minutes", "must be positive"));
        }
        if self.lunch.enabled && self.lunch.duration_minutes == 0 {
            return Err(ValidationError::invalid("lunch.duration_minutes", "must be positive"));
        }
        if self.energy_level > 100 {
            return Err(ValidationError::invalid("energy_level", "must be within 0..=100"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let prefs = SchedulingPreferences::default();
        assert_eq!(prefs.work_start.format("%H:%M").to_string(), "09:00");
        assert_eq!(prefs.work_end.format("%H:%M").to_string(), "17:00");
        assert_eq!(prefs.break_duration(), Duration::minutes(15));
        assert_eq!(prefs.focus_block_duration(), Duration::minutes(90));
        assert!(!prefs.lunch.enabled);
        assert_eq!(prefs.lunch_duration(), Duration::minutes(60));
        assert!(!prefs.prioritize_mornings);
        assert_eq!(prefs.energy_level, 70);
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let prefs: SchedulingPreferences =
            serde_json::from_str(r#"{"work_start":"08:30","lunch":{"enabled":true}}"#).unwrap();
        assert_eq!(prefs.work_start.format("%H:%M").to_string(), "08:30");
        assert_eq!(prefs.work_end, default_work_end());
        assert!(prefs.lunch.enabled);
        assert_eq!(prefs.lunch.start, default_lunch_time());
    }

    #[test]
    fn validate_rejects_inverted_hours_and_zero_durations() {
        let mut prefs = SchedulingPreferences::default();
        prefs.work_end = prefs.work_start;
        assert!(prefs.validate().is_err());

        let mut prefs = SchedulingPreferences::default();
        prefs.focus_block_minutes = 0;
        assert!(prefs.validate().is_err());

        let mut prefs = SchedulingPreferences::default();
        prefs.energy_level = 101;
        assert!(prefs.validate().is_err());
    }
}
