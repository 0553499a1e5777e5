//! Watch duration input and its validation

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shortest watch the control will request
pub const MIN_DURATION_SECONDS: u64 = 60;

/// Upper limit advertised by the watch service. Not enforced here.
pub const SERVICE_MAX_TIMEOUT_MINUTES: u64 = 1440;

/// Duration as entered by the user. Absent fields count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
}

impl Default for DurationSpec {
    fn default() -> Self {
        Self::new(2, 0, 0)
    }
}

impl DurationSpec {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            hours: Some(hours),
            minutes: Some(minutes),
            seconds: Some(seconds),
        }
    }

    /// Split a std duration into hours, minutes and seconds, rounding
    /// fractional seconds to the nearest second (halves up)
    pub fn from_duration(duration: Duration) -> Self {
        let total = duration
            .as_secs()
            .saturating_add(u64::from(duration.subsec_millis() >= 500));
        Self::new(total / 3600, (total % 3600) / 60, total % 60)
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours
            .unwrap_or(0)
            .saturating_mul(3600)
            .saturating_add(self.minutes.unwrap_or(0).saturating_mul(60))
            .saturating_add(self.seconds.unwrap_or(0))
    }

    /// Total seconds, or `DurationTooShort` below one minute
    pub fn validate(&self) -> Result<u64, ValidationError> {
        let total = self.total_seconds();
        if total < MIN_DURATION_SECONDS {
            tracing::debug!("Rejecting duration of {}s", total);
            return Err(ValidationError::DurationTooShort);
        }
        Ok(total)
    }
}

/// Seconds to whole minutes, halves rounding up
pub fn round_to_minutes(total_seconds: u64) -> u64 {
    total_seconds.saturating_add(30) / 60
}
