use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::render::pluralize;
use crate::session::Session;

pub fn run(session: &mut Session, event_id: &str, date: NaiveDate, force: bool) -> Result<()> {
    let event = session.state.directory.require_event(event_id)?.clone();

    let allowed = session.identity()?.can_fork(&event);
    session.require(allowed, &format!("reset {} on {}", event.name, date))?;

    let data = session.state.store.resolve_for_date(event_id, Some(date));
    if !data.is_forked() {
        println!("{}", "Nothing to reset".dimmed());
        return Ok(());
    }

    // Show what will be discarded
    let items = data.agenda_items.len() + data.assignments.len() + data.tasks.len();
    println!(
        "{} on {} has {} customized {}",
        event.name,
        date,
        items,
        pluralize("record", items)
    );

    if !force {
        let confirmed = Confirm::new()
            .with_prompt("Discard them and go back to the template?")
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    if let Some(outcome) = session.state.store.reset_to_template(event_id, date) {
        session.save()?;
        println!(
            "\nReset: {} agenda {}, {} {}, {} {} discarded",
            outcome.agenda_items,
            pluralize("item", outcome.agenda_items),
            outcome.assignments,
            pluralize("assignment", outcome.assignments),
            outcome.tasks,
            pluralize("task", outcome.tasks)
        );
    }

    Ok(())
}
