use anyhow::{Result, anyhow};
use chrono::Duration;
use clap::Subcommand;
use owo_colors::OwoColorize;
use rota_core::date_range::parse_datetime;
use rota_core::directory::MembershipRole;
use rota_core::{EntityKind, Event, Recurrence};

use crate::session::Session;

#[derive(Subcommand)]
pub enum AddCommand {
    /// Add an event template
    Event {
        name: String,

        /// First date and start time (e.g. "2025-02-16T11:00")
        #[arg(short, long)]
        start: String,

        /// Length in minutes
        #[arg(short, long, default_value_t = 90)]
        minutes: i64,

        /// none, weekly, bi-weekly, tri-weekly, quad-weekly or monthly
        #[arg(short, long, default_value = "weekly")]
        recurrence: String,

        /// Group serving at this event (repeatable)
        #[arg(short, long = "group")]
        groups: Vec<String>,

        #[arg(long)]
        location: Option<String>,
    },
    /// Add a person
    Person { name: String, email: String },
    /// Add a group
    Group {
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Add a role to a group
    Role { group_id: String, name: String },
    /// Add a person to a group
    Member {
        group_id: String,
        person_id: String,

        #[arg(long)]
        leader: bool,
    },
    /// Make an e-mail address an administrator
    Admin { email: String },
}

impl AddCommand {
    fn entity(&self) -> EntityKind {
        match self {
            AddCommand::Event { .. } => EntityKind::Event,
            _ => EntityKind::Group,
        }
    }
}

/// Setup commands run unchecked for the local operator (no `--as`);
/// an acting person must be an administrator.
pub fn run(session: &mut Session, command: AddCommand) -> Result<()> {
    if let Some(identity) = &session.identity {
        let allowed = identity.can_probe(command.entity());
        session.require(allowed, "change the setup")?;
    }

    let directory = &mut session.state.directory;

    match command {
        AddCommand::Event {
            name,
            start,
            minutes,
            recurrence,
            groups,
            location,
        } => {
            let start = parse_datetime(&start)?;
            let recurrence: Recurrence = recurrence.parse()?;
            let mut event = Event::new(&name, start, start + Duration::minutes(minutes), recurrence);
            event.group_ids = groups;
            event.location = location.unwrap_or_default();

            println!("{} {} ({})", "+".green(), event.name, event.recurrence);
            println!("{}", format!("event {}", event.id).dimmed());
            directory.add_event(event);
        }
        AddCommand::Person { name, email } => {
            let person = directory.add_person(&name, &email);
            println!("{} {} <{}>", "+".green(), person.full_name, person.email);
            println!("{}", format!("person {}", person.id).dimmed());
        }
        AddCommand::Group { name, description } => {
            let group = directory.add_group(&name, &description);
            println!("{} {}", "+".green(), group.name);
            println!("{}", format!("group {}", group.id).dimmed());
        }
        AddCommand::Role { group_id, name } => {
            directory
                .group(&group_id)
                .ok_or_else(|| anyhow!("Group not found: {}", group_id))?;
            let role = directory.add_role(&group_id, &name);
            println!("{} {}", "+".green(), role.name);
            println!("{}", format!("role {}", role.id).dimmed());
        }
        AddCommand::Member {
            group_id,
            person_id,
            leader,
        } => {
            let group = directory
                .group(&group_id)
                .ok_or_else(|| anyhow!("Group not found: {}", group_id))?
                .name
                .clone();
            let person = directory
                .person(&person_id)
                .ok_or_else(|| anyhow!("Person not found: {}", person_id))?
                .full_name
                .clone();
            let role = if leader {
                MembershipRole::Leader
            } else {
                MembershipRole::Member
            };
            directory.add_member(&group_id, &person_id, role);
            println!("{} {} joined {}", "+".green(), person, group);
        }
        AddCommand::Admin { email } => {
            if session.rota.add_admin_email(&email)? {
                println!("{} {} is an administrator", "+".green(), email);
            } else {
                println!("{}", format!("{} is already an administrator", email).dimmed());
            }
            return Ok(());
        }
    }

    session.save()
}
