use serde::{Deserialize, Serialize};

use crate::activity::EntityKind;
use crate::records::Forkable;

/// A person (or a free-text name) serving in a group, optionally in a specific role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub origin_id: Option<String>,
    pub event_id: String,
    pub group_id: String,
    pub role_id: Option<String>,
    pub person_id: Option<String>,
    /// Name recorded when no person record exists
    pub legacy_person_name: Option<String>,
    pub occurrence_id: Option<String>,
}

impl Assignment {
    /// Person id, or the legacy name, for display.
    pub fn assignee(&self) -> Option<&str> {
        self.person_id
            .as_deref()
            .or(self.legacy_person_name.as_deref())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewAssignment {
    pub event_id: String,
    pub group_id: String,
    pub role_id: Option<String>,
    pub person_id: Option<String>,
    pub legacy_person_name: Option<String>,
}

impl NewAssignment {
    pub fn new(event_id: &str, group_id: &str) -> Self {
        NewAssignment {
            event_id: event_id.to_string(),
            group_id: group_id.to_string(),
            ..Default::default()
        }
    }

    pub fn role(mut self, role_id: &str) -> Self {
        self.role_id = Some(role_id.to_string());
        self
    }

    pub fn person(mut self, person_id: &str) -> Self {
        self.person_id = Some(person_id.to_string());
        self
    }

    pub fn legacy_name(mut self, name: &str) -> Self {
        self.legacy_person_name = Some(name.to_string());
        self
    }

    pub(crate) fn into_record(
        self,
        id: String,
        origin_id: Option<String>,
        occurrence_id: Option<String>,
    ) -> Assignment {
        Assignment {
            id,
            origin_id,
            event_id: self.event_id,
            group_id: self.group_id,
            role_id: self.role_id,
            person_id: self.person_id,
            legacy_person_name: self.legacy_person_name,
            occurrence_id,
        }
    }
}

impl Forkable for Assignment {
    const ENTITY: EntityKind = EntityKind::Assignment;

    fn id(&self) -> &str {
        &self.id
    }

    fn event_id(&self) -> &str {
        &self.event_id
    }

    fn origin_id(&self) -> Option<&str> {
        self.origin_id.as_deref()
    }

    fn occurrence_id(&self) -> Option<&str> {
        self.occurrence_id.as_deref()
    }

    fn label(&self) -> String {
        let who = self.assignee().unwrap_or("nobody");
        match &self.role_id {
            Some(role) => format!("{} as {}", who, role),
            None => format!("{} in {}", who, self.group_id),
        }
    }

    fn rekey(&mut self, id: String, origin_id: Option<String>, occurrence_id: Option<String>) {
        self.id = id;
        self.origin_id = origin_id;
        self.occurrence_id = occurrence_id;
    }
}
