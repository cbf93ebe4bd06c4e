use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use rota_core::{DateRange, roster_for};

use crate::render::format_date_label;
use crate::session::Session;

pub fn run(session: &Session, days: Option<i64>) -> Result<()> {
    let identity = session.identity()?;
    let today = Local::now().date_naive();
    let range = DateRange::upcoming(today, days.unwrap_or(session.rota.config().view_days));

    let state = &session.state;
    let duties = roster_for(&identity.person_id, &state.directory, &state.store, &range)?;

    if duties.is_empty() {
        println!("{}", "You're not scheduled in this period".dimmed());
        return Ok(());
    }

    for duty in &duties {
        let group = state
            .directory
            .group(&duty.assignment.group_id)
            .map_or(duty.assignment.group_id.as_str(), |g| g.name.as_str());
        let role = duty.role.as_ref().map_or("member", |r| r.name.as_str());

        let mut line = format!(
            "{} {} {} {}",
            format_date_label(duty.instance.date, today).bold(),
            duty.instance.start_time,
            duty.instance.title,
            format!("as {} ({})", role, group).dimmed()
        );
        if duty.instance.cancelled {
            line.push_str(&format!(" {}", "cancelled".red()));
        }
        println!("{}", line);

        // Checklist of the role
        if let Some(role) = &duty.role {
            for task in &role.tasks {
                let deadline = task.deadline.as_deref().unwrap_or("");
                println!("    - {} {}", task.title, deadline.dimmed());
            }
        }
    }

    Ok(())
}
