use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use rota_core::{DateRange, expand_with_overrides};

use crate::render::{Render, format_date_label};
use crate::session::Session;

pub fn run(session: &Session, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let range = DateRange::from_args(from, to, session.rota.config().view_days)?;
    let state = &session.state;
    let instances = expand_with_overrides(state.directory.events(), &range, &state.store)?;

    if instances.is_empty() {
        println!("{}", "No events in range".dimmed());
        return Ok(());
    }

    let today = Local::now().date_naive();
    let mut current_date = None;

    for instance in &instances {
        if current_date != Some(instance.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(instance.date, today).bold());
            current_date = Some(instance.date);
        }
        println!("{}", instance.render());
    }

    Ok(())
}
