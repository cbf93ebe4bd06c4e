//! Remove records by id.

use tracing::debug;

use super::{ForkStore, mutation_for};
use crate::activity::{ActivityKind, Mutation};
use crate::error::{RotaError, RotaResult};
use crate::records::{Forkable, Scope};

impl ForkStore {
    /// Delete an agenda item, assignment or task by id.
    ///
    /// Deleting an agenda item renumbers its remaining siblings from 0, so the
    /// next insert at the set's size lands after every existing item.
    pub fn delete_record(&mut self, id: &str) -> RotaResult<Mutation> {
        if let Some(position) = self.agenda_items.iter().position(|r| r.id == id) {
            let item = self.agenda_items.remove(position);
            let scope = Scope::from_occurrence(item.occurrence_id.as_deref());
            self.renumber_agenda(&item.event_id, &scope);

            debug!(id, event_id = %item.event_id, "Deleted agenda item");
            return Ok(mutation_for(
                ActivityKind::Delete,
                &item,
                format!("Removed {}", item.label()),
            ));
        }

        let mutation = take(&mut self.assignments, id)
            .or_else(|| take(&mut self.tasks, id))
            .ok_or_else(|| RotaError::UnknownRecord(id.to_string()))?;

        debug!(id, entity = %mutation.entity, "Deleted record");
        Ok(mutation)
    }

    fn renumber_agenda(&mut self, event_id: &str, scope: &Scope) {
        let mut siblings: Vec<_> = self
            .agenda_items
            .iter_mut()
            .filter(|item| item.in_set(event_id, scope))
            .collect();
        siblings.sort_by_key(|item| item.order_index);

        for (order_index, item) in siblings.into_iter().enumerate() {
            item.order_index = order_index as u32;
        }
    }
}

fn take<R: Forkable>(records: &mut Vec<R>, id: &str) -> Option<Mutation> {
    let position = records.iter().position(|r| r.id() == id)?;
    let record = records.remove(position);

    Some(mutation_for(
        ActivityKind::Delete,
        &record,
        format!("Removed {}", record.label()),
    ))
}
