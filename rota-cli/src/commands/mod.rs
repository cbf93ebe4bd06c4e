pub mod agenda;
pub mod fill;
pub mod fork;
pub mod instances;
pub mod log;
pub mod remove;
pub mod reset;
pub mod roster;
pub mod setup;
pub mod show;
pub mod tasks;
pub mod whoami;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use rota_core::recurrence::instance_dates;
use rota_core::{DateRange, Event};

use crate::session::Session;

/// Fail unless `date` is one of the dates `event` recurs on.
pub fn require_instance(event: &Event, date: NaiveDate) -> Result<()> {
    if instance_dates(event, &DateRange::days(date, date))?.is_empty() {
        bail!(
            "'{}' does not take place on {} ({}, from {})",
            event.name,
            date,
            event.recurrence,
            event.start_date()
        );
    }
    Ok(())
}

/// Occurrence that an edit for `date` should go to, forking the date on first edit.
/// Without a date, edits go to the template.
pub fn edit_target(
    session: &mut Session,
    event_id: &str,
    date: Option<NaiveDate>,
) -> Result<Option<String>> {
    let Some(date) = date else {
        return Ok(None);
    };

    let event = session.state.directory.require_event(event_id)?.clone();
    require_instance(&event, date)?;

    let existed = session.state.store.occurrence_for(event_id, date).is_some();
    if !existed {
        let allowed = session.identity()?.can_fork(&event);
        session.require(allowed, &format!("customize {} on {}", event.name, date))?;
    }

    let occurrence_id = session.state.store.ensure_fork(event_id, date);
    if !existed {
        println!("{}", format!("Customizing {} on {} only", event.name, date).dimmed());
    }

    Ok(Some(occurrence_id))
}
