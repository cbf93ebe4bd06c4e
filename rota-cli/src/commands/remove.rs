use anyhow::{Result, bail};
use rota_core::EditTarget;

use crate::session::Session;

/// Delete an agenda item, assignment or task by id.
pub fn run(session: &mut Session, record_id: &str) -> Result<()> {
    let store = &session.state.store;

    let target = if let Some(item) = store.agenda_items().iter().find(|r| r.id == record_id) {
        EditTarget::AgendaItem(item)
    } else if let Some(assignment) = store.assignments().iter().find(|r| r.id == record_id) {
        EditTarget::Assignment(assignment)
    } else if let Some(task) = store.tasks().iter().find(|r| r.id == record_id) {
        EditTarget::Task(task)
    } else {
        bail!("No agenda item, assignment or task with id {}", record_id);
    };

    let allowed = session
        .identity()?
        .can_edit(target, &session.state.directory);
    session.require(allowed, &format!("remove this {}", target.kind()))?;

    let mutation = session.state.store.delete_record(record_id)?;
    session.record(mutation);
    session.save()
}
