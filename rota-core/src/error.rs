//! Error types for the rota ecosystem.

use thiserror::Error;

use crate::activity::EntityKind;

/// Errors that can occur in rota operations.
#[derive(Error, Debug)]
pub enum RotaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid time of day '{0}'. Expected HH:mm")]
    InvalidTime(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Reorder index {index} out of range for {len} agenda items")]
    ReorderOutOfRange { index: usize, len: usize },

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Occurrence not found: {0}")]
    OccurrenceNotFound(String),

    #[error("Occurrence '{occurrence_id}' does not belong to event '{event_id}'")]
    OccurrenceMismatch {
        occurrence_id: String,
        event_id: String,
    },

    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: EntityKind, id: String },

    #[error("No agenda item, assignment or task with id {0}")]
    UnknownRecord(String),

    #[error("{kind} '{id}' cannot move between template and occurrence")]
    ScopeChange { kind: EntityKind, id: String },

    #[error("Recurrence error: {0}")]
    Recurrence(String),
}

/// Result type alias for rota operations.
pub type RotaResult<T> = Result<T, RotaError>;
