use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker that one date of an event has been forked from its template.
///
/// At most one exists per (event, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOccurrence {
    pub id: String,
    pub event_id: String,
    pub instance_date: NaiveDate,
    /// Display title override for this date
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: OccurrenceStatus,
}

impl EventOccurrence {
    pub fn is_cancelled(&self) -> bool {
        self.status == OccurrenceStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceStatus {
    Active,
    Cancelled,
}

impl fmt::Display for OccurrenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccurrenceStatus::Active => write!(f, "active"),
            OccurrenceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}
