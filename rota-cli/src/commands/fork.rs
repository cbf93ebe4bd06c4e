use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use rota_core::records::OccurrenceStatus;

use crate::commands::require_instance;
use crate::session::Session;

pub fn run(
    session: &mut Session,
    event_id: &str,
    date: NaiveDate,
    title: Option<String>,
    cancel: bool,
) -> Result<()> {
    let event = session.state.directory.require_event(event_id)?.clone();
    require_instance(&event, date)?;

    let allowed = session.identity()?.can_fork(&event);
    session.require(allowed, &format!("customize {} on {}", event.name, date))?;

    let existed = session.state.store.occurrence_for(event_id, date).is_some();
    let occurrence_id = session.state.store.ensure_fork(event_id, date);

    if title.is_some() {
        let description = session
            .state
            .store
            .occurrence(&occurrence_id)
            .and_then(|o| o.description.clone());
        session
            .state
            .store
            .set_occurrence_details(&occurrence_id, title, description)?;
    }
    if cancel {
        session
            .state
            .store
            .set_occurrence_status(&occurrence_id, OccurrenceStatus::Cancelled)?;
    }

    session.save()?;

    if existed {
        println!("{} on {} was already customized", event.name, date);
    } else {
        println!("Customizing {} on {}", event.name, date);
    }
    println!("{}", format!("occurrence {}", occurrence_id).dimmed());

    Ok(())
}
