use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::EntityKind;
use crate::records::Forkable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub origin_id: Option<String>,
    pub event_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Person id or group id
    pub assigned_to: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    #[serde(default)]
    pub history: Vec<TaskHistoryEntry>,
    pub occurrence_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub actor_id: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "TODO"),
            TaskStatus::InProgress => write!(f, "IN_PROGRESS"),
            TaskStatus::Done => write!(f, "DONE"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!(
                "Unknown task status '{}'. Expected todo, in-progress or done",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: NaiveDate,
}

impl NewTask {
    pub fn new(event_id: &str, title: &str, assigned_to: &str, due_date: NaiveDate) -> Self {
        NewTask {
            event_id: event_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            assigned_to: assigned_to.to_string(),
            due_date,
        }
    }

    pub(crate) fn into_record(
        self,
        id: String,
        origin_id: Option<String>,
        occurrence_id: Option<String>,
    ) -> Task {
        Task {
            id,
            origin_id,
            event_id: self.event_id,
            title: self.title,
            description: self.description,
            assigned_to: self.assigned_to,
            due_date: self.due_date,
            status: TaskStatus::Todo,
            history: Vec::new(),
            occurrence_id,
        }
    }
}

impl Forkable for Task {
    const ENTITY: EntityKind = EntityKind::Task;

    fn id(&self) -> &str {
        &self.id
    }

    fn event_id(&self) -> &str {
        &self.event_id
    }

    fn origin_id(&self) -> Option<&str> {
        self.origin_id.as_deref()
    }

    fn occurrence_id(&self) -> Option<&str> {
        self.occurrence_id.as_deref()
    }

    fn label(&self) -> String {
        format!("'{}'", self.title)
    }

    fn rekey(&mut self, id: String, origin_id: Option<String>, occurrence_id: Option<String>) {
        self.id = id;
        self.origin_id = origin_id;
        self.occurrence_id = occurrence_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_lenient_about_separators() {
        assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Done));
        assert_eq!("in-progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("IN_PROGRESS".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert!("later".parse::<TaskStatus>().is_err());
    }
}
