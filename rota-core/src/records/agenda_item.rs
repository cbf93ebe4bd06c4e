use serde::{Deserialize, Serialize};

use crate::activity::EntityKind;
use crate::records::Forkable;
use crate::time::TimeOfDay;

/// Who is responsible for an agenda segment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Responsible {
    #[default]
    None,
    Person(String),
    Role(String),
    Group(String),
    Assignment(String),
}

/// One segment of an event's agenda (run sheet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: String,
    pub origin_id: Option<String>,
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Stage cues / practical notes
    pub cues: Option<String>,
    pub duration_minutes: u32,
    /// Position among siblings in the same set
    pub order_index: u32,
    /// Time-of-day anchor: resets the timeline cursor
    pub manual_start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub responsible: Responsible,
    pub occurrence_id: Option<String>,
}

/// Caller-supplied fields for a new agenda item.
#[derive(Debug, Clone, Default)]
pub struct NewAgendaItem {
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    pub cues: Option<String>,
    pub duration_minutes: u32,
    pub manual_start_time: Option<TimeOfDay>,
    pub responsible: Responsible,
}

impl NewAgendaItem {
    pub fn new(event_id: &str, title: &str, duration_minutes: u32) -> Self {
        NewAgendaItem {
            event_id: event_id.to_string(),
            title: title.to_string(),
            duration_minutes,
            ..Default::default()
        }
    }

    pub fn anchored_at(mut self, time: TimeOfDay) -> Self {
        self.manual_start_time = Some(time);
        self
    }

    pub fn responsible(mut self, responsible: Responsible) -> Self {
        self.responsible = responsible;
        self
    }

    pub(crate) fn into_record(
        self,
        id: String,
        origin_id: Option<String>,
        occurrence_id: Option<String>,
        order_index: u32,
    ) -> AgendaItem {
        AgendaItem {
            id,
            origin_id,
            event_id: self.event_id,
            title: self.title,
            description: self.description,
            cues: self.cues,
            duration_minutes: self.duration_minutes,
            order_index,
            manual_start_time: self.manual_start_time,
            responsible: self.responsible,
            occurrence_id,
        }
    }
}

impl Forkable for AgendaItem {
    const ENTITY: EntityKind = EntityKind::AgendaItem;

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
        format!("'{}'", self.title)
    }

    fn rekey(&mut self, id: String, origin_id: Option<String>, occurrence_id: Option<String>) {
        self.id = id;
        self.origin_id = origin_id;
        self.occurrence_id = occurrence_id;
    }
}
