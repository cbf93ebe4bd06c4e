//! Insert new records into a template set or a fork set.

use tracing::debug;

use super::{ForkStore, mutation_for};
use crate::activity::{ActivityKind, Mutation};
use crate::error::RotaResult;
use crate::records::{Forkable, NewAgendaItem, NewAssignment, NewTask, Scope, new_id};

impl ForkStore {
    /// Append an agenda item to the template (`occurrence_id` = None) or to a fork.
    ///
    /// The item joins the end of its sibling set: `order_index` is the set's size.
    pub fn insert_agenda_item(
        &mut self,
        item: NewAgendaItem,
        occurrence_id: Option<&str>,
    ) -> RotaResult<Mutation> {
        let scope = self.scope_for(&item.event_id, occurrence_id)?;
        let order_index = self
            .agenda_items
            .iter()
            .filter(|i| i.in_set(&item.event_id, &scope))
            .count() as u32;

        let (id, origin_id) = identity_for(&scope);
        let record = item.into_record(id, origin_id, owner(&scope), order_index);

        let mutation = mutation_for(
            ActivityKind::Create,
            &record,
            format!("Added {} ({} min)", record.label(), record.duration_minutes),
        );
        debug!(event_id = %record.event_id, id = %record.id, order_index, "Inserted agenda item");
        self.agenda_items.push(record);

        Ok(mutation)
    }

    pub fn insert_assignment(
        &mut self,
        assignment: NewAssignment,
        occurrence_id: Option<&str>,
    ) -> RotaResult<Mutation> {
        let scope = self.scope_for(&assignment.event_id, occurrence_id)?;

        let (id, origin_id) = identity_for(&scope);
        let record = assignment.into_record(id, origin_id, owner(&scope));

        let mutation = mutation_for(
            ActivityKind::Create,
            &record,
            format!("Assigned {}", record.label()),
        );
        debug!(event_id = %record.event_id, id = %record.id, "Inserted assignment");
        self.assignments.push(record);

        Ok(mutation)
    }

    pub fn insert_task(&mut self, task: NewTask, occurrence_id: Option<&str>) -> RotaResult<Mutation> {
        let scope = self.scope_for(&task.event_id, occurrence_id)?;

        let (id, origin_id) = identity_for(&scope);
        let record = task.into_record(id, origin_id, owner(&scope));

        let mutation = mutation_for(
            ActivityKind::Create,
            &record,
            format!("Created task {} for {}", record.label(), record.assigned_to),
        );
        debug!(event_id = %record.event_id, id = %record.id, "Inserted task");
        self.tasks.push(record);

        Ok(mutation)
    }
}

/// Fresh id plus provenance: template records are their own origin,
/// records created directly in a fork have none.
fn identity_for(scope: &Scope) -> (String, Option<String>) {
    let id = new_id();
    let origin_id = scope.is_template().then(|| id.clone());
    (id, origin_id)
}

fn owner(scope: &Scope) -> Option<String> {
    scope.occurrence_id().map(String::from)
}

#[cfg(test)]
mod tests {
    use crate::error::RotaError;
    use crate::records::{NewAgendaItem, NewAssignment, NewTask, Scope};
    use crate::store::ForkStore;
    use crate::store::fixtures::{EVENT, date, store_with_template};

    #[test]
    fn test_template_records_are_their_own_origin() {
        let store = store_with_template();

        for item in store.agenda_items() {
            assert_eq!(item.origin_id.as_deref(), Some(item.id.as_str()));
        }
        let assignment = &store.assignments()[0];
        assert_eq!(assignment.origin_id.as_deref(), Some(assignment.id.as_str()));
    }

    #[test]
    fn test_fork_records_created_directly_have_no_origin() {
        let mut store = store_with_template();
        let occ = store.ensure_fork(EVENT, date(2025, 2, 16));

        let mutation = store
            .insert_task(NewTask::new(EVENT, "Print programs", "p-tom", date(2025, 2, 15)), Some(&occ))
            .unwrap();

        let task = store.tasks().iter().find(|t| t.id == mutation.entity_id).unwrap();
        assert_eq!(task.origin_id, None);
        assert_eq!(task.occurrence_id.as_deref(), Some(occ.as_str()));
        assert_eq!(mutation.occurrence_id.as_deref(), Some(occ.as_str()));
    }

    #[test]
    fn test_agenda_item_appends_to_its_sibling_set() {
        let mut store = store_with_template();
        let occ = store.ensure_fork(EVENT, date(2025, 2, 16));

        store
            .insert_agenda_item(NewAgendaItem::new(EVENT, "Baptism", 10), Some(&occ))
            .unwrap();
        store
            .insert_agenda_item(NewAgendaItem::new(EVENT, "Coffee", 30), None)
            .unwrap();

        let forked = store.agenda_for(EVENT, &Scope::Occurrence(occ));
        assert_eq!(forked.last().map(|i| (i.title.as_str(), i.order_index)), Some(("Baptism", 3)));

        let template = store.agenda_for(EVENT, &Scope::Template);
        assert_eq!(template.last().map(|i| (i.title.as_str(), i.order_index)), Some(("Coffee", 3)));
    }

    #[test]
    fn test_insert_into_unknown_occurrence_writes_nothing() {
        let mut store = ForkStore::new();

        let result = store.insert_assignment(NewAssignment::new(EVENT, "g-music"), Some("nope"));
        assert!(matches!(result, Err(RotaError::OccurrenceNotFound(_))));
        assert!(store.assignments().is_empty());
    }

    #[test]
    fn test_insert_into_foreign_occurrence_is_rejected() {
        let mut store = store_with_template();
        let occ = store.ensure_fork(EVENT, date(2025, 2, 16));

        let result = store.insert_agenda_item(NewAgendaItem::new("e-other", "Prayer", 5), Some(&occ));
        assert!(matches!(result, Err(RotaError::OccurrenceMismatch { .. })));
    }
}
