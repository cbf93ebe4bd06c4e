//! Read-side projection of an event for a date.

use chrono::NaiveDate;
use tracing::debug;

use super::ForkStore;
use crate::records::{AgendaItem, Assignment, EventOccurrence, Scope, Task};
use crate::time::TimeOfDay;
use crate::timeline::{self, TimelineEntry};

/// The records in effect for one event on one date (or for the template).
#[derive(Debug, Clone, PartialEq)]
pub struct EventData {
    pub occurrence: Option<EventOccurrence>,
    /// Working set: the fork's records if the date is forked, otherwise the template's
    pub agenda_items: Vec<AgendaItem>,
    pub assignments: Vec<Assignment>,
    pub tasks: Vec<Task>,
    pub template_agenda_items: Vec<AgendaItem>,
    pub template_assignments: Vec<Assignment>,
    pub template_tasks: Vec<Task>,
}

impl EventData {
    pub fn is_forked(&self) -> bool {
        self.occurrence.is_some()
    }

    /// Sibling set that edits to this view should target.
    pub fn scope(&self) -> Scope {
        Scope::from_occurrence(self.occurrence.as_ref().map(|o| o.id.as_str()))
    }

    /// Compiled run sheet of the working agenda.
    pub fn timeline(&self, anchor: TimeOfDay) -> Vec<TimelineEntry> {
        timeline::compile(anchor, &self.agenda_items)
    }
}

impl ForkStore {
    /// Records for `event_id` on `date`.
    ///
    /// Without a date, or when the date has no fork, the working sets are the
    /// template sets. A forked date sees exactly its own snapshot, never merged
    /// with the template. Template sets are always returned alongside.
    pub fn resolve_for_date(&self, event_id: &str, date: Option<NaiveDate>) -> EventData {
        let occurrence = date.and_then(|d| self.occurrence_for(event_id, d)).cloned();

        let template_agenda_items = self.agenda_for(event_id, &Scope::Template);
        let template_assignments = self.assignments_for(event_id, &Scope::Template);
        let template_tasks = self.tasks_for(event_id, &Scope::Template);

        let (agenda_items, assignments, tasks) = match &occurrence {
            Some(occ) => {
                let scope = Scope::Occurrence(occ.id.clone());
                (
                    self.agenda_for(event_id, &scope),
                    self.assignments_for(event_id, &scope),
                    self.tasks_for(event_id, &scope),
                )
            }
            None => (
                template_agenda_items.clone(),
                template_assignments.clone(),
                template_tasks.clone(),
            ),
        };

        debug!(
            event_id,
            date = ?date,
            forked = occurrence.is_some(),
            agenda_items = agenda_items.len(),
            "Resolved event data"
        );

        EventData {
            occurrence,
            agenda_items,
            assignments,
            tasks,
            template_agenda_items,
            template_assignments,
            template_tasks,
        }
    }
}
