mod commands;
mod render;
mod session;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rota_core::date_range::parse_date;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Parser)]
#[command(name = "rota")]
#[command(about = "Plan recurring services: agendas, staffing and tasks, customized per date")]
struct Cli {
    /// Act as this person (id or e-mail)
    #[arg(long = "as", global = true)]
    acting: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming dates of all events
    Instances {
        /// First day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        from: Option<String>,

        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show the agenda, staffing and tasks of an event
    Show {
        event_id: String,

        /// Date of one instance (YYYY-MM-DD); omit to show the template
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Customize one date of an event
    Fork {
        event_id: String,
        date: String,

        /// Title override for this date
        #[arg(long)]
        title: Option<String>,

        /// Mark this date as cancelled
        #[arg(long)]
        cancel: bool,
    },
    /// Drop the customizations of one date
    Reset {
        event_id: String,
        date: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Edit an event's agenda
    Agenda {
        #[command(subcommand)]
        command: AgendaCommand,
    },
    /// Assign group members to the group's roles
    Fill {
        event_id: String,
        group_id: String,

        /// Fill a single date instead of the template
        #[arg(short, long)]
        date: Option<String>,

        /// Add assignments for roles that are already filled
        #[arg(long)]
        overwrite: bool,

        /// Also consider filled roles (without --overwrite they are kept)
        #[arg(long)]
        all: bool,
    },
    /// Delete an agenda item, assignment or task
    Remove { record_id: String },
    /// Your open tasks
    Tasks {
        /// Look-ahead in days
        #[arg(long)]
        days: Option<i64>,
    },
    /// Add a task or change its status
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Services you're scheduled for
    Roster {
        /// Look-ahead in days
        #[arg(long)]
        days: Option<i64>,
    },
    /// Recent changes
    Log {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Only changes to this event
        #[arg(long)]
        event: Option<String>,
    },
    /// Show the acting identity
    Whoami,
    /// Set up events, people, groups and roles
    #[command(subcommand)]
    Add(commands::setup::AddCommand),
}

#[derive(Subcommand)]
enum AgendaCommand {
    /// Append a segment
    Add {
        event_id: String,
        title: String,

        #[arg(short, long)]
        minutes: u32,

        /// Fixed start time (HH:mm)
        #[arg(long)]
        at: Option<String>,

        /// Group responsible for the segment
        #[arg(long)]
        group: Option<String>,

        /// Role responsible for the segment
        #[arg(long, conflicts_with = "group")]
        role: Option<String>,

        /// Edit this date only (forks it if needed)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Move a segment (positions start at 1)
    Move {
        event_id: String,
        from: usize,
        to: usize,

        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Add a task to an event
    Add {
        event_id: String,
        title: String,

        /// Person or group id
        #[arg(long = "for")]
        assigned_to: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        /// Add to this date only (forks it if needed)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Set the status: todo, in-progress or done
    Status { task_id: String, status: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = Session::open(cli.acting.as_deref())?;

    match cli.command {
        Commands::Instances { from, to } => {
            commands::instances::run(&session, from.as_deref(), to.as_deref())
        }
        Commands::Show { event_id, date } => {
            commands::show::run(&session, &event_id, parse_optional_date(date)?)
        }
        Commands::Fork {
            event_id,
            date,
            title,
            cancel,
        } => commands::fork::run(&mut session, &event_id, parse_date(&date)?, title, cancel),
        Commands::Reset {
            event_id,
            date,
            force,
        } => commands::reset::run(&mut session, &event_id, parse_date(&date)?, force),
        Commands::Agenda { command } => match command {
            AgendaCommand::Add {
                event_id,
                title,
                minutes,
                at,
                group,
                role,
                date,
            } => commands::agenda::add(
                &mut session,
                commands::agenda::AddArgs {
                    event_id,
                    title,
                    minutes,
                    at,
                    group,
                    role,
                    date: parse_optional_date(date)?,
                },
            ),
            AgendaCommand::Move {
                event_id,
                from,
                to,
                date,
            } => commands::agenda::move_item(
                &mut session,
                &event_id,
                from,
                to,
                parse_optional_date(date)?,
            ),
        },
        Commands::Fill {
            event_id,
            group_id,
            date,
            overwrite,
            all,
        } => commands::fill::run(
            &mut session,
            &event_id,
            &group_id,
            parse_optional_date(date)?,
            overwrite,
            all,
        ),
        Commands::Remove { record_id } => commands::remove::run(&mut session, &record_id),
        Commands::Tasks { days } => commands::tasks::list(&session, days),
        Commands::Task { command } => match command {
            TaskCommand::Add {
                event_id,
                title,
                assigned_to,
                due,
                date,
            } => commands::tasks::add(
                &mut session,
                &event_id,
                &title,
                &assigned_to,
                parse_date(&due)?,
                parse_optional_date(date)?,
            ),
            TaskCommand::Status { task_id, status } => {
                commands::tasks::set_status(&mut session, &task_id, &status)
            }
        },
        Commands::Roster { days } => commands::roster::run(&session, days),
        Commands::Log { limit, event } => commands::log::run(&session, limit, event.as_deref()),
        Commands::Whoami => commands::whoami::run(&session),
        Commands::Add(command) => commands::setup::run(&mut session, command),
    }
}

fn parse_optional_date(date: Option<String>) -> Result<Option<chrono::NaiveDate>> {
    Ok(date.as_deref().map(parse_date).transpose()?)
}
