use anyhow::Result;
use owo_colors::OwoColorize;

use crate::session::Session;

pub fn run(session: &Session) -> Result<()> {
    let Some(identity) = &session.identity else {
        println!("{}", "Not acting as anyone. Pass --as <person-id or e-mail>".dimmed());
        println!("{}", format!("Data: {}", session.display_path()).dimmed());
        return Ok(());
    };

    let directory = &session.state.directory;
    let name = directory
        .person(&identity.person_id)
        .map_or(identity.person_id.as_str(), |p| p.full_name.as_str());

    let access = if identity.is_admin {
        "administrator".green().to_string()
    } else if identity.is_read_only() {
        "read-only".dimmed().to_string()
    } else {
        "group leader".yellow().to_string()
    };
    println!("{} ({})", name.bold(), access);

    let mut led: Vec<&str> = identity
        .led_groups
        .iter()
        .map(|id| directory.group(id).map_or(id.as_str(), |g| g.name.as_str()))
        .collect();
    led.sort();
    for group in led {
        println!("  leads {}", group);
    }

    println!("{}", format!("Data: {}", session.display_path()).dimmed());
    Ok(())
}
