//! People, groups, memberships, role definitions and event templates.
//!
//! None of these take part in forking; child records refer to them by id.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RotaError, RotaResult};
use crate::event::Event;
use crate::records::new_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipRole {
    Member,
    Leader,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: String,
    pub group_id: String,
    pub person_id: String,
    pub membership_role: MembershipRole,
    pub active: bool,
    pub joined_at: DateTime<Utc>,
}

/// A checklist entry attached to a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleTask {
    pub id: String,
    pub title: String,
    pub deadline: Option<String>,
    pub channel: Option<String>,
}

/// A named duty within a group, e.g. "Sound technician".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub group_id: String,
    #[serde(default)]
    pub tasks: Vec<RoleTask>,
}

/// In-memory collections of the non-forked entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directory {
    #[serde(default)]
    people: Vec<Person>,
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    members: Vec<GroupMember>,
    #[serde(default)]
    roles: Vec<RoleDefinition>,
    #[serde(default)]
    events: Vec<Event>,
}

impl Directory {
    // PEOPLE + GROUPS:

    pub fn add_person(&mut self, full_name: &str, email: &str) -> &Person {
        push_entry(&mut self.people, Person {
            id: new_id(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: None,
            active: true,
        })
    }

    pub fn insert_person(&mut self, person: Person) {
        self.people.push(person);
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn person_by_email(&self, email: &str) -> Option<&Person> {
        self.people
            .iter()
            .find(|p| p.email.eq_ignore_ascii_case(email))
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn add_group(&mut self, name: &str, description: &str) -> &Group {
        push_entry(&mut self.groups, Group {
            id: new_id(),
            name: name.to_string(),
            description: description.to_string(),
            active: true,
        })
    }

    pub fn insert_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    // MEMBERSHIP:

    pub fn add_member(
        &mut self,
        group_id: &str,
        person_id: &str,
        membership_role: MembershipRole,
    ) -> &GroupMember {
        push_entry(&mut self.members, GroupMember {
            id: new_id(),
            group_id: group_id.to_string(),
            person_id: person_id.to_string(),
            membership_role,
            active: true,
            joined_at: Utc::now(),
        })
    }

    pub fn members_of<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a GroupMember> {
        self.members.iter().filter(move |m| m.group_id == group_id)
    }

    /// Groups in which `person_id` holds an active leader membership.
    pub fn led_group_ids(&self, person_id: &str) -> HashSet<String> {
        self.members
            .iter()
            .filter(|m| {
                m.person_id == person_id && m.membership_role == MembershipRole::Leader && m.active
            })
            .map(|m| m.group_id.clone())
            .collect()
    }

    /// First active plain member of a group, used for default staffing.
    pub fn first_available_member<'a>(&'a self, group_id: &'a str) -> Option<&'a GroupMember> {
        self.members_of(group_id)
            .find(|m| m.membership_role == MembershipRole::Member && m.active)
    }

    // ROLES:

    pub fn add_role(&mut self, group_id: &str, name: &str) -> &RoleDefinition {
        push_entry(&mut self.roles, RoleDefinition {
            id: new_id(),
            name: name.to_string(),
            description: String::new(),
            group_id: group_id.to_string(),
            tasks: Vec::new(),
        })
    }

    pub fn insert_role(&mut self, role: RoleDefinition) {
        self.roles.push(role);
    }

    pub fn role(&self, id: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.id == id)
    }

    pub fn roles_for_group<'a>(
        &'a self,
        group_id: &'a str,
    ) -> impl Iterator<Item = &'a RoleDefinition> {
        self.roles.iter().filter(move |r| r.group_id == group_id)
    }

    // EVENTS:

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn update_event(&mut self, event: Event) -> RotaResult<()> {
        let existing = self
            .events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or_else(|| RotaError::EventNotFound(event.id.clone()))?;
        *existing = event;
        Ok(())
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn require_event(&self, id: &str) -> RotaResult<&Event> {
        self.event(id)
            .ok_or_else(|| RotaError::EventNotFound(id.to_string()))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

/// Append `entry` and borrow it back from its slot.
fn push_entry<T>(entries: &mut Vec<T>, entry: T) -> &T {
    let index = entries.len();
    entries.push(entry);
    &entries[index]
}
