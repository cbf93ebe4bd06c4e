//! Child records of an event that can live in the template set or in a fork.
//!
//! A record with no `occurrence_id` belongs to its event's template set. A record
//! with an `occurrence_id` belongs only to that occurrence's fork set.

mod agenda_item;
mod assignment;
mod occurrence;
mod task;

pub use agenda_item::{AgendaItem, NewAgendaItem, Responsible};
pub use assignment::{Assignment, NewAssignment};
pub use occurrence::{EventOccurrence, OccurrenceStatus};
pub use task::{NewTask, Task, TaskHistoryEntry, TaskStatus};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::activity::EntityKind;

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Which sibling set a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Template,
    Occurrence(String),
}

impl Scope {
    pub fn from_occurrence(occurrence_id: Option<&str>) -> Self {
        match occurrence_id {
            Some(id) => Scope::Occurrence(id.to_string()),
            None => Scope::Template,
        }
    }

    pub fn occurrence_id(&self) -> Option<&str> {
        match self {
            Scope::Template => None,
            Scope::Occurrence(id) => Some(id),
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Scope::Template)
    }
}

/// Shared shape of agenda items, assignments and tasks.
pub trait Forkable: Clone {
    const ENTITY: EntityKind;

    fn id(&self) -> &str;
    fn event_id(&self) -> &str;
    /// Provenance: own id for template records, the template's id for forked
    /// copies, `None` for records created directly inside a fork.
    fn origin_id(&self) -> Option<&str>;
    fn occurrence_id(&self) -> Option<&str>;
    /// Short human-readable name for activity descriptions
    fn label(&self) -> String;

    /// Replace identity and ownership fields.
    fn rekey(&mut self, id: String, origin_id: Option<String>, occurrence_id: Option<String>);

    fn scope(&self) -> Scope {
        Scope::from_occurrence(self.occurrence_id())
    }

    fn is_template(&self) -> bool {
        self.occurrence_id().is_none()
    }

    /// Whether this record is a member of the given sibling set of `event_id`.
    fn in_set(&self, event_id: &str, scope: &Scope) -> bool {
        match scope {
            Scope::Template => self.event_id() == event_id && self.is_template(),
            Scope::Occurrence(occurrence_id) => self.occurrence_id() == Some(occurrence_id.as_str()),
        }
    }

    /// Snapshot copy of a template record for an occurrence's fork set.
    /// The copy gets a fresh id and keeps the template's provenance.
    fn fork_into(&self, occurrence_id: &str) -> Self {
        let origin = self.origin_id().unwrap_or(self.id()).to_string();
        let mut copy = self.clone();
        copy.rekey(new_id(), Some(origin), Some(occurrence_id.to_string()));
        copy
    }
}

/// Any forkable record, for id-addressed updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    AgendaItem(AgendaItem),
    Assignment(Assignment),
    Task(Task),
}

impl Record {
    pub fn entity(&self) -> EntityKind {
        match self {
            Record::AgendaItem(_) => EntityKind::AgendaItem,
            Record::Assignment(_) => EntityKind::Assignment,
            Record::Task(_) => EntityKind::Task,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::AgendaItem(r) => r.id(),
            Record::Assignment(r) => r.id(),
            Record::Task(r) => r.id(),
        }
    }
}

impl From<AgendaItem> for Record {
    fn from(item: AgendaItem) -> Self {
        Record::AgendaItem(item)
    }
}

impl From<Assignment> for Record {
    fn from(assignment: Assignment) -> Self {
        Record::Assignment(assignment)
    }
}

impl From<Task> for Record {
    fn from(task: Task) -> Self {
        Record::Task(task)
    }
}
