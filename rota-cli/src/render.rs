//! Terminal rendering for rota-core types.
//!
//! Extension traits that add colored output using owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use rota_core::records::{Assignment, Task, TaskStatus};
use rota_core::timeline::TimelineEntry;
use rota_core::{ActivityKind, ActivityRecord, Directory, Instance, Mutation};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for ActivityKind {
    fn render(&self) -> String {
        let symbol = self.symbol();
        match self {
            ActivityKind::Create => symbol.green().to_string(),
            ActivityKind::Edit => symbol.yellow().to_string(),
            ActivityKind::Delete => symbol.red().to_string(),
        }
    }
}

impl Render for Mutation {
    fn render(&self) -> String {
        format!("{} {}: {}", self.kind.render(), self.entity, self.description)
    }
}

impl Render for ActivityRecord {
    fn render(&self) -> String {
        let when = self.timestamp.format("%Y-%m-%d %H:%M").to_string();
        format!(
            "{} {} {}: {} {}",
            when.dimmed(),
            self.kind.render(),
            self.entity,
            self.description,
            format!("by {}", self.actor_id).dimmed()
        )
    }
}

impl Render for Instance {
    fn render(&self) -> String {
        let mut line = format!("  {:>5} {}", self.start_time, self.title);
        if self.cancelled {
            line = format!("  {:>5} {}", self.start_time, self.title.strikethrough());
            line.push_str(&format!(" {}", "cancelled".red()));
        } else if self.occurrence_id.is_some() {
            line.push_str(&format!(" {}", "customized".yellow()));
        }
        format!("{} {}", line, format!("[{}]", self.event_id).dimmed())
    }
}

impl Render for TimelineEntry {
    fn render(&self) -> String {
        let times = format!("{}-{}", self.start, self.end);
        let anchor = if self.item.manual_start_time.is_some() { "*" } else { " " };
        format!(
            "  {}{} {} {}",
            times.cyan(),
            anchor,
            self.item.title,
            format!("({} min)", self.item.duration_minutes).dimmed()
        )
    }
}

impl Render for TaskStatus {
    fn render(&self) -> String {
        let label = self.to_string();
        match self {
            TaskStatus::Todo => label.red().to_string(),
            TaskStatus::InProgress => label.yellow().to_string(),
            TaskStatus::Done => label.green().to_string(),
        }
    }
}

impl Render for Task {
    fn render(&self) -> String {
        format!(
            "  {} {} {} {}",
            self.due_date.format("%a %b %-d"),
            self.status.render(),
            self.title,
            format!("[{}]", self.id).dimmed()
        )
    }
}

/// Assignment line with names looked up in the directory.
pub fn render_assignment(assignment: &Assignment, directory: &Directory) -> String {
    let who = match (&assignment.person_id, &assignment.legacy_person_name) {
        (Some(id), _) => directory
            .person(id)
            .map_or_else(|| id.clone(), |p| p.full_name.clone()),
        (None, Some(name)) => name.clone(),
        (None, None) => "unassigned".dimmed().to_string(),
    };
    let group = directory
        .group(&assignment.group_id)
        .map_or(assignment.group_id.as_str(), |g| g.name.as_str());
    let role = assignment
        .role_id
        .as_deref()
        .map(|id| directory.role(id).map_or(id, |r| r.name.as_str()));

    match role {
        Some(role) => format!("  {} {} {}", who, format!("as {}", role).dimmed(), format!("({})", group).dimmed()),
        None => format!("  {} {}", who, format!("({})", group).dimmed()),
    }
}

/// "Today", "Tomorrow", or e.g. "Sun Feb 16"
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_labels() {
        let today = date(2025, 2, 16);
        assert_eq!(format_date_label(today, today), "Today");
        assert_eq!(format_date_label(date(2025, 2, 17), today), "Tomorrow");
        assert_eq!(format_date_label(date(2025, 2, 23), today), "Sun Feb 23");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("item", 1), "item");
        assert_eq!(pluralize("item", 3), "items");
    }
}
