//! Time-of-day values rendered as zero-padded `HH:mm`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::constants::MINUTES_PER_DAY;
use crate::error::{RotaError, RotaResult};

/// Minutes since midnight, always below 24:00.
///
/// Serialized as the `HH:mm` string so agenda anchors read naturally in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    pub fn new(hour: u32, minute: u32) -> RotaResult<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(RotaError::InvalidTime(format!("{}:{}", hour, minute)));
        }
        Ok(TimeOfDay(hour * 60 + minute))
    }

    /// Build a time from an arbitrary minute count, wrapping past midnight.
    pub fn wrapping_from_minutes(minutes: u64) -> Self {
        TimeOfDay((minutes % u64::from(MINUTES_PER_DAY)) as u32)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        TimeOfDay(time.hour() * 60 + time.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = RotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| RotaError::InvalidTime(s.to_string()))?;
        Ok(TimeOfDay::from(time))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = RotaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_zero_padded() {
        let time: TimeOfDay = "09:05".parse().unwrap();
        assert_eq!(time.minutes(), 9 * 60 + 5);
        assert_eq!(time.to_string(), "09:05");
    }

    #[test]
    fn test_parse_rejects_malformed_values() {
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("10:60".parse::<TimeOfDay>().is_err());
        assert!("ten past".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_wrapping_past_midnight() {
        assert_eq!(TimeOfDay::wrapping_from_minutes(24 * 60 + 15).to_string(), "00:15");
        assert_eq!(TimeOfDay::wrapping_from_minutes(23 * 60 + 59).to_string(), "23:59");
    }

    #[test]
    fn test_serializes_as_string() {
        let time = TimeOfDay::new(10, 45).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"10:45\"");

        let parsed: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, time);
        assert!(serde_json::from_str::<TimeOfDay>("\"7pm\"").is_err());
    }
}
