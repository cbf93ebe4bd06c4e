use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, Utc};
use owo_colors::OwoColorize;
use rota_core::records::{NewTask, TaskStatus};

use crate::commands::edit_target;
use crate::render::Render;
use crate::session::Session;

/// Open tasks of the acting person, soonest first.
pub fn list(session: &Session, days: Option<i64>) -> Result<()> {
    let identity = session.identity()?;
    let days = days.unwrap_or(session.rota.config().task_horizon_days);
    let today = Local::now().date_naive();

    let tasks: Vec<_> = session
        .state
        .store
        .tasks_due_for(&identity.person_id, today, days)
        .into_iter()
        .filter(|t| t.status != TaskStatus::Done)
        .collect();

    if tasks.is_empty() {
        println!("{}", format!("No open tasks in the next {} days", days).dimmed());
        return Ok(());
    }

    for task in tasks {
        let event = session
            .state
            .directory
            .event(&task.event_id)
            .map_or(task.event_id.as_str(), |e| e.name.as_str());
        println!("{} {}", task.render(), event.dimmed());
    }

    Ok(())
}

pub fn add(
    session: &mut Session,
    event_id: &str,
    title: &str,
    assigned_to: &str,
    due: NaiveDate,
    date: Option<NaiveDate>,
) -> Result<()> {
    session.state.directory.require_event(event_id)?;

    let identity = session.identity()?;
    let allowed =
        identity.is_admin || identity.person_id == assigned_to || identity.leads(assigned_to);
    session.require(allowed, &format!("assign tasks to {}", assigned_to))?;

    let occurrence_id = edit_target(session, event_id, date)?;
    let mutation = session.state.store.insert_task(
        NewTask::new(event_id, title, assigned_to, due),
        occurrence_id.as_deref(),
    )?;

    session.record(mutation);
    session.save()
}

pub fn set_status(session: &mut Session, task_id: &str, status: &str) -> Result<()> {
    let status: TaskStatus = status.parse().map_err(|e: String| anyhow!(e))?;

    let task = session
        .state
        .store
        .tasks()
        .iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| anyhow!("Task not found: {}", task_id))?;

    let allowed = session
        .identity()?
        .can_edit(rota_core::EditTarget::Task(task), &session.state.directory);
    session.require(allowed, &format!("update '{}'", task.title))?;

    let actor = session.actor().to_string();
    let mutation = session
        .state
        .store
        .update_task_status(task_id, status, &actor, Utc::now())?;

    session.record(mutation);
    session.save()
}
