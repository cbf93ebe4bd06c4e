//! Mutation outcomes and the activity log.
//!
//! Store mutations return a [`Mutation`] describing what changed. Hosts turn these
//! into [`ActivityRecord`]s (adding who and when) for an external audit trail.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Create,
    Edit,
    Delete,
}

impl ActivityKind {
    pub fn symbol(self) -> &'static str {
        match self {
            ActivityKind::Create => "+",
            ActivityKind::Edit => "~",
            ActivityKind::Delete => "-",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Kinds of entity a mutation (or an edit check) can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Event,
    Group,
    AgendaItem,
    Assignment,
    Task,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Event => "Event",
            EntityKind::Group => "Group",
            EntityKind::AgendaItem => "Agenda item",
            EntityKind::Assignment => "Assignment",
            EntityKind::Task => "Task",
        };
        write!(f, "{}", name)
    }
}

/// What a store mutation did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub kind: ActivityKind,
    pub entity: EntityKind,
    pub entity_id: String,
    pub event_id: String,
    pub occurrence_id: Option<String>,
    pub description: String,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind, self.entity, self.description)
    }
}

/// A mutation attributed to an actor at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub actor_id: String,
    pub event_id: String,
    pub occurrence_id: Option<String>,
    pub kind: ActivityKind,
    pub entity: EntityKind,
    pub entity_id: String,
    pub description: String,
}

impl ActivityRecord {
    pub fn from_mutation(actor_id: &str, timestamp: DateTime<Utc>, mutation: Mutation) -> Self {
        ActivityRecord {
            id: Uuid::new_v4().to_string(),
            timestamp,
            actor_id: actor_id.to_string(),
            event_id: mutation.event_id,
            occurrence_id: mutation.occurrence_id,
            kind: mutation.kind,
            entity: mutation.entity,
            entity_id: mutation.entity_id,
            description: mutation.description,
        }
    }
}

/// Append-only, bounded in-memory activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    capacity: usize,
    records: VecDeque<ActivityRecord>,
}

impl Default for ActivityLog {
    fn default() -> Self {
        ActivityLog::with_capacity(500)
    }
}

impl ActivityLog {
    pub fn with_capacity(capacity: usize) -> Self {
        ActivityLog {
            capacity,
            records: VecDeque::new(),
        }
    }

    /// Record a mutation, evicting the oldest entry when full.
    pub fn record(&mut self, actor_id: &str, timestamp: DateTime<Utc>, mutation: Mutation) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records
            .push_back(ActivityRecord::from_mutation(actor_id, timestamp, mutation));
    }

    /// Newest first
    pub fn recent(&self, limit: usize) -> Vec<&ActivityRecord> {
        self.records.iter().rev().take(limit).collect()
    }

    pub fn for_event<'a>(&'a self, event_id: &'a str) -> impl Iterator<Item = &'a ActivityRecord> {
        self.records.iter().filter(move |r| r.event_id == event_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mutation(n: usize) -> Mutation {
        Mutation {
            kind: ActivityKind::Create,
            entity: EntityKind::Task,
            entity_id: format!("task-{}", n),
            event_id: "e1".to_string(),
            occurrence_id: None,
            description: format!("created task {}", n),
        }
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut log = ActivityLog::default();
        let at = Utc.with_ymd_and_hms(2025, 2, 16, 9, 0, 0).unwrap();
        log.record("p1", at, mutation(1));
        log.record("p1", at, mutation(2));

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].entity_id, "task-2");
        assert_eq!(recent[1].actor_id, "p1");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = ActivityLog::with_capacity(2);
        let at = Utc.with_ymd_and_hms(2025, 2, 16, 9, 0, 0).unwrap();
        for n in 0..3 {
            log.record("p1", at, mutation(n));
        }

        assert_eq!(log.len(), 2);
        let ids: Vec<_> = log.recent(5).iter().map(|r| r.entity_id.clone()).collect();
        assert_eq!(ids, vec!["task-2", "task-1"]);
    }

    #[test]
    fn test_mutation_display() {
        assert_eq!(mutation(7).to_string(), "+ Task: created task 7");
    }
}
