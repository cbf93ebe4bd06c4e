use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::commands::require_instance;
use crate::render::{Render, pluralize, render_assignment};
use crate::session::Session;

pub fn run(session: &Session, event_id: &str, date: Option<NaiveDate>) -> Result<()> {
    let directory = &session.state.directory;
    let event = directory.require_event(event_id)?;
    if let Some(date) = date {
        require_instance(event, date)?;
    }

    let data = session.state.store.resolve_for_date(event_id, date);

    let title = data
        .occurrence
        .as_ref()
        .and_then(|o| o.title.clone())
        .unwrap_or_else(|| event.name.clone());
    let when = match date {
        Some(date) => date.format("%a %b %-d %Y").to_string(),
        None => format!("{} from {}", event.recurrence, event.start_date()),
    };
    println!("{} {}", title.bold(), when.dimmed());

    match &data.occurrence {
        Some(occurrence) if occurrence.is_cancelled() => println!("{}", "Cancelled".red()),
        Some(_) => println!("{}", "Customized for this date".yellow()),
        None if date.is_some() => println!("{}", "Following the template".dimmed()),
        None => println!("{}", "Template".dimmed()),
    }
    if let Some(description) = data.occurrence.as_ref().and_then(|o| o.description.as_deref()) {
        println!("{}", description);
    }

    println!();
    let timeline = data.timeline(event.start_time());
    let total: u32 = data.agenda_items.iter().map(|i| i.duration_minutes).sum();
    println!(
        "{} {}",
        "Agenda".bold(),
        format!("({} {}, {} min)", timeline.len(), pluralize("item", timeline.len()), total).dimmed()
    );
    for entry in &timeline {
        println!("{}", entry.render());
    }

    println!();
    println!("{}", "Staffing".bold());
    if data.assignments.is_empty() {
        println!("  {}", "Nobody assigned".dimmed());
    }
    for assignment in &data.assignments {
        println!("{}", render_assignment(assignment, directory));
    }

    println!();
    println!("{}", "Tasks".bold());
    if data.tasks.is_empty() {
        println!("  {}", "No tasks".dimmed());
    }
    for task in &data.tasks {
        println!("{}", task.render());
    }

    Ok(())
}
