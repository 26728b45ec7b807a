use serde::{Deserialize, Serialize};

use super::ConfigError;

const DEFAULT_ALERT_THRESHOLD_PERCENT: u8 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Share of a budget's limit, in percent, at which a category is reported
    /// as at risk.
    pub alert_threshold_percent: u8,
    /// Show remaining budget clamped at zero instead of going negative.
    pub floor_remaining: bool,
    pub export_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alert_threshold_percent: DEFAULT_ALERT_THRESHOLD_PERCENT,
            floor_remaining: false,
            export_file_name: "transactions.csv".into(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.alert_threshold_percent) {
            return Err(ConfigError::Invalid(format!(
                "alert_threshold_percent must be between 1 and 100, got {}",
                self.alert_threshold_percent
            )));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "export_file_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
