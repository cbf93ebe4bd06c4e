//! Fork lifecycle: absent -> active via `ensure_fork`, active -> absent via `reset_to_template`.

use chrono::NaiveDate;
use tracing::{info, warn};

use super::ForkStore;
use crate::error::{RotaError, RotaResult};
use crate::records::{EventOccurrence, Forkable, OccurrenceStatus, Scope, new_id};

/// What a reset removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetOutcome {
    pub occurrence: EventOccurrence,
    pub agenda_items: usize,
    pub assignments: usize,
    pub tasks: usize,
}

impl ForkStore {
    /// Return the occurrence id for (event, date), forking the template if needed.
    ///
    /// Forking snapshots every current template agenda item, assignment and task
    /// into the new occurrence. Later template edits do not reach the fork.
    pub fn ensure_fork(&mut self, event_id: &str, date: NaiveDate) -> String {
        if let Some(existing) = self.occurrence_for(event_id, date) {
            return existing.id.clone();
        }

        let occurrence_id = new_id();

        let agenda_items = fork_template(&self.agenda_items, event_id, &occurrence_id);
        let assignments = fork_template(&self.assignments, event_id, &occurrence_id);
        let tasks = fork_template(&self.tasks, event_id, &occurrence_id);

        info!(
            event_id,
            %date,
            occurrence_id = %occurrence_id,
            agenda_items = agenda_items.len(),
            assignments = assignments.len(),
            tasks = tasks.len(),
            "Forked occurrence from template"
        );

        self.occurrences.push(EventOccurrence {
            id: occurrence_id.clone(),
            event_id: event_id.to_string(),
            instance_date: date,
            title: None,
            description: None,
            status: OccurrenceStatus::Active,
        });
        self.agenda_items.extend(agenda_items);
        self.assignments.extend(assignments);
        self.tasks.extend(tasks);

        occurrence_id
    }

    /// Discard the fork for (event, date) and every record it owns.
    ///
    /// Irreversible. Returns `None` when the date was not forked.
    pub fn reset_to_template(&mut self, event_id: &str, date: NaiveDate) -> Option<ResetOutcome> {
        let Some(position) = self
            .occurrences
            .iter()
            .position(|o| o.event_id == event_id && o.instance_date == date)
        else {
            warn!(event_id, %date, "Reset requested for a date that is not forked");
            return None;
        };

        let occurrence = self.occurrences.remove(position);
        let scope = Scope::Occurrence(occurrence.id.clone());

        let outcome = ResetOutcome {
            agenda_items: remove_set(&mut self.agenda_items, event_id, &scope),
            assignments: remove_set(&mut self.assignments, event_id, &scope),
            tasks: remove_set(&mut self.tasks, event_id, &scope),
            occurrence,
        };

        info!(
            event_id,
            %date,
            occurrence_id = %outcome.occurrence.id,
            agenda_items = outcome.agenda_items,
            assignments = outcome.assignments,
            tasks = outcome.tasks,
            "Reset occurrence to template"
        );

        Some(outcome)
    }

    /// Set the per-date title and description overrides of an existing fork.
    pub fn set_occurrence_details(
        &mut self,
        occurrence_id: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> RotaResult<()> {
        let occurrence = self.occurrence_mut(occurrence_id)?;
        occurrence.title = title;
        occurrence.description = description;
        Ok(())
    }

    pub fn set_occurrence_status(
        &mut self,
        occurrence_id: &str,
        status: OccurrenceStatus,
    ) -> RotaResult<()> {
        let occurrence = self.occurrence_mut(occurrence_id)?;
        info!(occurrence_id, %status, "Occurrence status changed");
        occurrence.status = status;
        Ok(())
    }

    fn occurrence_mut(&mut self, occurrence_id: &str) -> RotaResult<&mut EventOccurrence> {
        self.occurrences
            .iter_mut()
            .find(|o| o.id == occurrence_id)
            .ok_or_else(|| RotaError::OccurrenceNotFound(occurrence_id.to_string()))
    }
}

fn fork_template<R: Forkable>(records: &[R], event_id: &str, occurrence_id: &str) -> Vec<R> {
    records
        .iter()
        .filter(|r| r.in_set(event_id, &Scope::Template))
        .map(|r| r.fork_into(occurrence_id))
        .collect()
}

fn remove_set<R: Forkable>(records: &mut Vec<R>, event_id: &str, scope: &Scope) -> usize {
    let before = records.len();
    records.retain(|r| !r.in_set(event_id, scope));
    before - records.len()
}
