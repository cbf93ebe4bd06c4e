use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use rota_core::{EditTarget, FillOptions};

use crate::commands::edit_target;
use crate::render::pluralize;
use crate::session::Session;

pub fn run(
    session: &mut Session,
    event_id: &str,
    group_id: &str,
    date: Option<NaiveDate>,
    overwrite: bool,
    all: bool,
) -> Result<()> {
    session.state.directory.require_event(event_id)?;
    let group = session
        .state
        .directory
        .group(group_id)
        .ok_or_else(|| anyhow!("Group not found: {}", group_id))?;

    let allowed = session
        .identity()?
        .can_edit(EditTarget::Group(group), &session.state.directory);
    session.require(allowed, &format!("staff {}", group.name))?;

    let occurrence_id = edit_target(session, event_id, date)?;
    let options = FillOptions {
        fill_only_empty: !all,
        overwrite_filled: overwrite,
    };

    let report = {
        let state = &mut session.state;
        state.store.fill_defaults(
            &state.directory,
            event_id,
            group_id,
            options,
            occurrence_id.as_deref(),
        )?
    };

    for mutation in report.mutations {
        session.record(mutation);
    }
    if !report.skipped_roles.is_empty() {
        let count = report.skipped_roles.len();
        println!("{}", format!("{} {} already filled", count, pluralize("role", count)).dimmed());
    }
    for role_id in &report.unstaffed_roles {
        let name = session
            .state
            .directory
            .role(role_id)
            .map_or(role_id.as_str(), |r| r.name.as_str());
        println!("{} {}", "No one available for".red(), name);
    }

    session.save()
}
