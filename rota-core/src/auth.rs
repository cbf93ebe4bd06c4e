//! Acting identity and edit permissions.
//!
//! Permissions are advisory: callers ask before mutating, the store never checks.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::activity::EntityKind;
use crate::directory::{Directory, Group, Person};
use crate::event::Event;
use crate::records::{AgendaItem, Assignment, Responsible, Task};

/// Who is acting, and what that person leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub person_id: String,
    pub is_admin: bool,
    /// Groups in which the person holds an active leader membership
    pub led_groups: HashSet<String>,
}

/// A concrete record an edit would touch.
#[derive(Debug, Clone, Copy)]
pub enum EditTarget<'a> {
    Event(&'a Event),
    Group(&'a Group),
    Assignment(&'a Assignment),
    AgendaItem(&'a AgendaItem),
    Task(&'a Task),
}

impl EditTarget<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EditTarget::Event(_) => EntityKind::Event,
            EditTarget::Group(_) => EntityKind::Group,
            EditTarget::Assignment(_) => EntityKind::Assignment,
            EditTarget::AgendaItem(_) => EntityKind::AgendaItem,
            EditTarget::Task(_) => EntityKind::Task,
        }
    }
}

impl Identity {
    /// Resolve `person` into an acting identity.
    ///
    /// A person is an administrator when their e-mail appears in `admin_emails`
    /// (case-insensitive).
    pub fn resolve(person: &Person, directory: &Directory, admin_emails: &[String]) -> Self {
        let is_admin = admin_emails
            .iter()
            .any(|email| email.trim().eq_ignore_ascii_case(person.email.trim()));
        let led_groups = directory.led_group_ids(&person.id);

        debug!(
            person_id = %person.id,
            is_admin,
            led_groups = led_groups.len(),
            "Resolved identity"
        );

        Identity {
            person_id: person.id.clone(),
            is_admin,
            led_groups,
        }
    }

    /// Neither an administrator nor a leader of any group.
    pub fn is_read_only(&self) -> bool {
        !self.is_admin && self.led_groups.is_empty()
    }

    pub fn leads(&self, group_id: &str) -> bool {
        self.led_groups.contains(group_id)
    }

    /// Whether this identity may edit `target`.
    pub fn can_edit(&self, target: EditTarget<'_>, directory: &Directory) -> bool {
        if self.is_admin {
            return true;
        }

        match target {
            EditTarget::Event(_) => false,
            EditTarget::Group(group) => self.leads(&group.id),
            EditTarget::Assignment(assignment) => self.leads(&assignment.group_id),
            EditTarget::AgendaItem(item) => self.can_take_responsibility(&item.responsible, directory),
            EditTarget::Task(task) => {
                task.assigned_to == self.person_id || self.leads(&task.assigned_to)
            }
        }
    }

    /// Whether an agenda segment owned by `responsible` falls under this identity.
    /// Applies to existing segments and to ones about to be added.
    pub fn can_take_responsibility(&self, responsible: &Responsible, directory: &Directory) -> bool {
        if self.is_admin {
            return true;
        }

        match responsible {
            Responsible::Group(group_id) => self.leads(group_id),
            Responsible::Role(role_id) => directory
                .role(role_id)
                .is_some_and(|role| self.leads(&role.group_id)),
            Responsible::None | Responsible::Person(_) | Responsible::Assignment(_) => false,
        }
    }

    /// Forking or resetting a date: administrators, or leaders of a group serving the event.
    pub fn can_fork(&self, event: &Event) -> bool {
        self.is_admin || event.group_ids.iter().any(|g| self.leads(g))
    }

    /// Capability probe with no concrete record. Only administrators pass.
    pub fn can_probe(&self, _kind: EntityKind) -> bool {
        self.is_admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{MembershipRole, RoleDefinition};
    use crate::records::{NewAgendaItem, NewAssignment, NewTask};
    use chrono::NaiveDate;

    struct Fixture {
        directory: Directory,
        leader: Person,
        volunteer: Person,
        admin: Person,
    }

    fn fixture() -> Fixture {
        let mut directory = Directory::default();
        let leader = directory.add_person("Lena Leader", "lena@example.org").clone();
        let volunteer = directory.add_person("Victor Volunteer", "victor@example.org").clone();
        let admin = directory.add_person("Anna Admin", "anna@example.org").clone();

        directory.add_member("g-music", &leader.id, MembershipRole::Leader);
        directory.add_member("g-tech", &leader.id, MembershipRole::Member);
        directory.add_member("g-music", &volunteer.id, MembershipRole::Member);
        directory.insert_role(RoleDefinition {
            id: "rd-keys".to_string(),
            name: "Keys".to_string(),
            description: String::new(),
            group_id: "g-music".to_string(),
            tasks: Vec::new(),
        });

        Fixture {
            directory,
            leader,
            volunteer,
            admin,
        }
    }

    fn admins() -> Vec<String> {
        vec!["ANNA@example.org".to_string()]
    }

    fn assignment(group_id: &str) -> Assignment {
        NewAssignment::new("e1", group_id).into_record("a1".to_string(), None, None)
    }

    fn agenda_item(responsible: Responsible) -> AgendaItem {
        NewAgendaItem::new("e1", "Worship", 30)
            .responsible(responsible)
            .into_record("i1".to_string(), None, None, 0)
    }

    fn task(assigned_to: &str) -> Task {
        let due = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
        NewTask::new("e1", "Send set list", assigned_to, due).into_record(
            "t1".to_string(),
            None,
            None,
        )
    }

    #[test]
    fn test_resolve_derives_admin_and_leadership() {
        let f = fixture();

        let admin = Identity::resolve(&f.admin, &f.directory, &admins());
        assert!(admin.is_admin);
        assert!(!admin.is_read_only());

        let leader = Identity::resolve(&f.leader, &f.directory, &admins());
        assert!(!leader.is_admin);
        assert!(leader.leads("g-music"));
        assert!(!leader.leads("g-tech"));

        let volunteer = Identity::resolve(&f.volunteer, &f.directory, &admins());
        assert!(volunteer.is_read_only());
    }

    #[test]
    fn test_leader_edits_only_assignments_of_led_group() {
        let f = fixture();
        let leader = Identity::resolve(&f.leader, &f.directory, &admins());

        assert!(leader.can_edit(EditTarget::Assignment(&assignment("g-music")), &f.directory));
        // Plain membership in g-tech grants nothing
        assert!(!leader.can_edit(EditTarget::Assignment(&assignment("g-tech")), &f.directory));
    }

    #[test]
    fn test_admin_can_edit_anything() {
        let f = fixture();
        let admin = Identity::resolve(&f.admin, &f.directory, &admins());

        assert!(admin.can_edit(EditTarget::Assignment(&assignment("g-tech")), &f.directory));
        assert!(admin.can_edit(EditTarget::AgendaItem(&agenda_item(Responsible::None)), &f.directory));
        assert!(admin.can_probe(EntityKind::Event));
    }

    #[test]
    fn test_agenda_item_permissions_follow_responsible() {
        let f = fixture();
        let leader = Identity::resolve(&f.leader, &f.directory, &admins());
        let can = |responsible: Responsible| {
            leader.can_edit(EditTarget::AgendaItem(&agenda_item(responsible)), &f.directory)
        };

        assert!(can(Responsible::Group("g-music".to_string())));
        assert!(!can(Responsible::Group("g-tech".to_string())));
        assert!(can(Responsible::Role("rd-keys".to_string())));
        assert!(!can(Responsible::Role("rd-unknown".to_string())));
        assert!(!can(Responsible::Person(f.leader.id.clone())));
        assert!(!can(Responsible::None));
    }

    #[test]
    fn test_task_permissions() {
        let f = fixture();
        let volunteer = Identity::resolve(&f.volunteer, &f.directory, &admins());
        let leader = Identity::resolve(&f.leader, &f.directory, &admins());

        assert!(volunteer.can_edit(EditTarget::Task(&task(&f.volunteer.id)), &f.directory));
        assert!(!volunteer.can_edit(EditTarget::Task(&task(&f.leader.id)), &f.directory));
        assert!(leader.can_edit(EditTarget::Task(&task("g-music")), &f.directory));
    }

    #[test]
    fn test_groups_and_events() {
        let f = fixture();
        let leader = Identity::resolve(&f.leader, &f.directory, &admins());
        let music = Group {
            id: "g-music".to_string(),
            name: "Music".to_string(),
            description: String::new(),
            active: true,
        };

        assert!(leader.can_edit(EditTarget::Group(&music), &f.directory));
        assert!(!leader.can_probe(EntityKind::Group));

        let start = NaiveDate::from_ymd_opt(2025, 2, 16)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        let mut event = Event::new("Service", start, start, crate::event::Recurrence::Weekly);
        assert!(!leader.can_edit(EditTarget::Event(&event), &f.directory));
        assert!(!leader.can_fork(&event));

        event.group_ids.push("g-music".to_string());
        assert!(leader.can_fork(&event));
        let volunteer = Identity::resolve(&f.volunteer, &f.directory, &admins());
        assert!(!volunteer.can_fork(&event));
    }
}
