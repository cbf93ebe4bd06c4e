//! In-place edits: record replacement, task status, agenda reordering.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{ForkStore, mutation_for};
use crate::activity::{ActivityKind, EntityKind, Mutation};
use crate::error::{RotaError, RotaResult};
use crate::records::{Forkable, Record, TaskHistoryEntry, TaskStatus};

impl ForkStore {
    /// Replace a stored record by id.
    ///
    /// The caller has already picked the right set; a record may not switch
    /// event or move between template and fork.
    pub fn update_record(&mut self, record: impl Into<Record>) -> RotaResult<Mutation> {
        match record.into() {
            Record::AgendaItem(item) => replace(&mut self.agenda_items, item),
            Record::Assignment(assignment) => replace(&mut self.assignments, assignment),
            Record::Task(task) => replace(&mut self.tasks, task),
        }
    }

    /// Change a task's status and append the transition to its history.
    pub fn update_task_status(
        &mut self,
        task_id: &str,
        status: TaskStatus,
        actor_id: &str,
        at: DateTime<Utc>,
    ) -> RotaResult<Mutation> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| RotaError::RecordNotFound {
                kind: EntityKind::Task,
                id: task_id.to_string(),
            })?;

        let action = format!("status: {} -> {}", task.status, status);
        task.status = status;
        task.history.push(TaskHistoryEntry {
            timestamp: at,
            actor_id: actor_id.to_string(),
            action: action.clone(),
        });

        Ok(mutation_for(
            ActivityKind::Edit,
            &*task,
            format!("Task {} {}", task.label(), action),
        ))
    }

    /// Move one agenda item within a single sibling set.
    ///
    /// The set (template, or the given fork) is sorted by `order_index`, the item
    /// at `old_index` is spliced to `new_index`, then the whole set is renumbered
    /// from 0. Both indices are positions in the sorted set.
    pub fn reorder_agenda(
        &mut self,
        event_id: &str,
        old_index: usize,
        new_index: usize,
        occurrence_id: Option<&str>,
    ) -> RotaResult<Mutation> {
        let scope = self.scope_for(event_id, occurrence_id)?;

        let mut positions: Vec<usize> = self
            .agenda_items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.in_set(event_id, &scope))
            .map(|(position, _)| position)
            .collect();
        positions.sort_by_key(|&position| self.agenda_items[position].order_index);

        let len = positions.len();
        for index in [old_index, new_index] {
            if index >= len {
                return Err(RotaError::ReorderOutOfRange { index, len });
            }
        }

        let moved = positions.remove(old_index);
        positions.insert(new_index, moved);

        for (order_index, &position) in positions.iter().enumerate() {
            self.agenda_items[position].order_index = order_index as u32;
        }

        let item = &self.agenda_items[moved];
        debug!(event_id, old_index, new_index, id = %item.id, "Reordered agenda");

        Ok(mutation_for(
            ActivityKind::Edit,
            item,
            format!("Moved {} from position {} to {}", item.label(), old_index + 1, new_index + 1),
        ))
    }
}

fn replace<R: Forkable>(records: &mut [R], record: R) -> RotaResult<Mutation> {
    let existing = records
        .iter_mut()
        .find(|r| r.id() == record.id())
        .ok_or_else(|| RotaError::RecordNotFound {
            kind: R::ENTITY,
            id: record.id().to_string(),
        })?;

    if existing.event_id() != record.event_id() || existing.occurrence_id() != record.occurrence_id() {
        return Err(RotaError::ScopeChange {
            kind: R::ENTITY,
            id: record.id().to_string(),
        });
    }

    let mutation = mutation_for(
        ActivityKind::Edit,
        &record,
        format!("Updated {}", record.label()),
    );
    *existing = record;

    Ok(mutation)
}
