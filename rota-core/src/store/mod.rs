//! Template and fork storage for event child records.
//!
//! The store is the single owner of agenda items, assignments, tasks and
//! occurrences. Template records (no `occurrence_id`) are the event's defaults;
//! an occurrence owns a full, independent snapshot of them for one date.
//! Reverting a date is deletion of the snapshot, never a merge.

mod create;
mod delete;
mod fork;
mod resolve;
mod update;

pub use fork::ResetOutcome;
pub use resolve::EventData;

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityKind, Mutation};
use crate::error::{RotaError, RotaResult};
use crate::records::{AgendaItem, Assignment, EventOccurrence, Forkable, Scope, Task};

/// In-memory collections of forkable records.
///
/// Mutations must be serialized per event by the host; reads are plain projections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForkStore {
    #[serde(default)]
    occurrences: Vec<EventOccurrence>,
    #[serde(default)]
    agenda_items: Vec<AgendaItem>,
    #[serde(default)]
    assignments: Vec<Assignment>,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl ForkStore {
    pub fn new() -> Self {
        ForkStore::default()
    }

    pub fn occurrences(&self) -> &[EventOccurrence] {
        &self.occurrences
    }

    pub fn agenda_items(&self) -> &[AgendaItem] {
        &self.agenda_items
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn occurrence(&self, id: &str) -> Option<&EventOccurrence> {
        self.occurrences.iter().find(|o| o.id == id)
    }

    /// The fork for (event, date), if that date has been forked.
    pub fn occurrence_for(&self, event_id: &str, date: NaiveDate) -> Option<&EventOccurrence> {
        self.occurrences
            .iter()
            .find(|o| o.event_id == event_id && o.instance_date == date)
    }

    pub fn occurrences_for_event<'a>(
        &'a self,
        event_id: &'a str,
    ) -> impl Iterator<Item = &'a EventOccurrence> {
        self.occurrences.iter().filter(move |o| o.event_id == event_id)
    }

    /// One sibling set of agenda items, ordered by `order_index` (stable).
    pub fn agenda_for(&self, event_id: &str, scope: &Scope) -> Vec<AgendaItem> {
        let mut items = sibling_set(&self.agenda_items, event_id, scope);
        items.sort_by_key(|item| item.order_index);
        items
    }

    pub fn assignments_for(&self, event_id: &str, scope: &Scope) -> Vec<Assignment> {
        sibling_set(&self.assignments, event_id, scope)
    }

    pub fn tasks_for(&self, event_id: &str, scope: &Scope) -> Vec<Task> {
        sibling_set(&self.tasks, event_id, scope)
    }

    /// Tasks assigned to `person_id` due on or before `today + days_ahead`, soonest first.
    ///
    /// A template task that has been forked is listed through its forked copies only.
    pub fn tasks_due_for(&self, person_id: &str, today: NaiveDate, days_ahead: i64) -> Vec<&Task> {
        let limit = today + Duration::days(days_ahead);
        let forked: HashSet<&str> = self
            .tasks
            .iter()
            .filter(|t| t.occurrence_id.is_some())
            .filter_map(|t| t.origin_id.as_deref())
            .collect();

        let mut tasks: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.occurrence_id.is_some() || !forked.contains(t.id.as_str()))
            .filter(|t| t.assigned_to == person_id && t.due_date <= limit)
            .collect();
        tasks.sort_by_key(|t| t.due_date);
        tasks
    }

    /// Resolve the sibling set a write targets, rejecting unknown or foreign occurrences.
    pub(crate) fn scope_for(&self, event_id: &str, occurrence_id: Option<&str>) -> RotaResult<Scope> {
        let Some(occurrence_id) = occurrence_id else {
            return Ok(Scope::Template);
        };

        let occurrence = self
            .occurrence(occurrence_id)
            .ok_or_else(|| RotaError::OccurrenceNotFound(occurrence_id.to_string()))?;

        if occurrence.event_id != event_id {
            return Err(RotaError::OccurrenceMismatch {
                occurrence_id: occurrence_id.to_string(),
                event_id: event_id.to_string(),
            });
        }

        Ok(Scope::Occurrence(occurrence_id.to_string()))
    }
}

fn sibling_set<R: Forkable>(records: &[R], event_id: &str, scope: &Scope) -> Vec<R> {
    records
        .iter()
        .filter(|r| r.in_set(event_id, scope))
        .cloned()
        .collect()
}

fn mutation_for<R: Forkable>(kind: ActivityKind, record: &R, description: String) -> Mutation {
    Mutation {
        kind,
        entity: R::ENTITY,
        entity_id: record.id().to_string(),
        event_id: record.event_id().to_string(),
        occurrence_id: record.occurrence_id().map(String::from),
        description,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use super::ForkStore;
    use crate::records::{NewAgendaItem, NewAssignment, NewTask};

    pub const EVENT: &str = "e-sunday";

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Template with three agenda items, one assignment and one task.
    pub fn store_with_template() -> ForkStore {
        let mut store = ForkStore::new();
        for (title, minutes) in [("Welcome", 15), ("Worship", 30), ("Sermon", 25)] {
            store
                .insert_agenda_item(NewAgendaItem::new(EVENT, title, minutes), None)
                .unwrap();
        }
        store
            .insert_assignment(
                NewAssignment::new(EVENT, "g-music").role("rd-worship").person("p-lisa"),
                None,
            )
            .unwrap();
        store
            .insert_task(NewTask::new(EVENT, "Send set list", "p-lisa", date(2025, 2, 14)), None)
            .unwrap();
        store
    }
}
