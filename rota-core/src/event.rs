//! Event templates.
//!
//! An event is the steady-state definition of a (possibly recurring) gathering.
//! Its child records (agenda, staffing, tasks) live in the fork store; the event
//! itself is edited in place and never forked.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RotaError;
use crate::time::TimeOfDay;

/// An event template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// Anchor of the recurrence: first date and daily start time
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub recurrence: Recurrence,
    pub status: EventStatus,
    #[serde(default)]
    pub group_ids: Vec<String>,
}

impl Event {
    pub fn new(name: &str, start: NaiveDateTime, end: NaiveDateTime, recurrence: Recurrence) -> Self {
        Event {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: String::new(),
            location: String::new(),
            start,
            end,
            recurrence,
            status: EventStatus::Planned,
            group_ids: Vec::new(),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn start_time(&self) -> TimeOfDay {
        TimeOfDay::from(self.start.time())
    }

    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Fixed set of supported recurrence rules.
/// The anchor date and time come from the owning event's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recurrence {
    None,
    Weekly,
    BiWeekly,
    TriWeekly,
    QuadWeekly,
    /// First occurrence of the anchor weekday in each month
    Monthly,
}

impl Recurrence {
    /// Week interval for the weekly family
    pub fn interval_weeks(self) -> Option<u32> {
        match self {
            Recurrence::Weekly => Some(1),
            Recurrence::BiWeekly => Some(2),
            Recurrence::TriWeekly => Some(3),
            Recurrence::QuadWeekly => Some(4),
            Recurrence::None | Recurrence::Monthly => None,
        }
    }

    pub fn is_recurring(self) -> bool {
        self != Recurrence::None
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recurrence::None => "once",
            Recurrence::Weekly => "weekly",
            Recurrence::BiWeekly => "every 2 weeks",
            Recurrence::TriWeekly => "every 3 weeks",
            Recurrence::QuadWeekly => "every 4 weeks",
            Recurrence::Monthly => "monthly",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Recurrence {
    type Err = RotaError;

    /// Accepts wire names (`BI_WEEKLY`) and friendlier spellings (`biweekly`, `bi-weekly`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "none" | "once" => Ok(Recurrence::None),
            "weekly" => Ok(Recurrence::Weekly),
            "biweekly" => Ok(Recurrence::BiWeekly),
            "triweekly" => Ok(Recurrence::TriWeekly),
            "quadweekly" => Ok(Recurrence::QuadWeekly),
            "monthly" => Ok(Recurrence::Monthly),
            _ => Err(RotaError::Recurrence(format!(
                "Unknown recurrence '{}'. Expected none, weekly, bi-weekly, tri-weekly, quad-weekly or monthly",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}
