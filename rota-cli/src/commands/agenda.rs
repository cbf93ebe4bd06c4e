use anyhow::{Result, bail};
use chrono::NaiveDate;
use rota_core::EditTarget;
use rota_core::records::{NewAgendaItem, Responsible};

use crate::commands::edit_target;
use crate::session::Session;

pub struct AddArgs {
    pub event_id: String,
    pub title: String,
    pub minutes: u32,
    pub at: Option<String>,
    pub group: Option<String>,
    pub role: Option<String>,
    pub date: Option<NaiveDate>,
}

pub fn add(session: &mut Session, args: AddArgs) -> Result<()> {
    session.state.directory.require_event(&args.event_id)?;

    let responsible = match (args.group, args.role) {
        (Some(group), _) => Responsible::Group(group),
        (None, Some(role)) => Responsible::Role(role),
        (None, None) => Responsible::None,
    };

    let allowed = session
        .identity()?
        .can_take_responsibility(&responsible, &session.state.directory);
    session.require(allowed, "add this agenda item")?;

    let mut item = NewAgendaItem::new(&args.event_id, &args.title, args.minutes).responsible(responsible);
    if let Some(at) = args.at {
        item = item.anchored_at(at.parse()?);
    }

    let occurrence_id = edit_target(session, &args.event_id, args.date)?;
    let mutation = session
        .state
        .store
        .insert_agenda_item(item, occurrence_id.as_deref())?;

    session.record(mutation);
    session.save()
}

/// Move the item at position `from` to position `to` (1-based).
pub fn move_item(
    session: &mut Session,
    event_id: &str,
    from: usize,
    to: usize,
    date: Option<NaiveDate>,
) -> Result<()> {
    let (Some(old_index), Some(new_index)) = (from.checked_sub(1), to.checked_sub(1)) else {
        bail!("Positions start at 1");
    };

    session.state.directory.require_event(event_id)?;

    // Forking copies the template, so the template decides permissions on unforked dates
    let agenda = session.state.store.resolve_for_date(event_id, date).agenda_items;
    let Some(item) = agenda.get(old_index) else {
        bail!("No agenda item at position {} ({} items)", from, agenda.len());
    };

    let allowed = session
        .identity()?
        .can_edit(EditTarget::AgendaItem(item), &session.state.directory);
    session.require(allowed, &format!("move '{}'", item.title))?;

    let occurrence_id = edit_target(session, event_id, date)?;
    let mutation = session.state.store.reorder_agenda(
        event_id,
        old_index,
        new_index,
        occurrence_id.as_deref(),
    )?;

    session.record(mutation);
    session.save()
}
