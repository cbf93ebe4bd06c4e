use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::session::Session;

pub fn run(session: &Session, limit: usize, event_id: Option<&str>) -> Result<()> {
    let activity = &session.state.activity;

    let records: Vec<_> = match event_id {
        Some(event_id) => {
            let mut records: Vec<_> = activity.for_event(event_id).collect();
            records.reverse();
            records.truncate(limit);
            records
        }
        None => activity.recent(limit),
    };

    if records.is_empty() {
        println!("{}", "No activity yet".dimmed());
        return Ok(());
    }

    for record in records {
        println!("{}", record.render());
    }

    Ok(())
}
