//! Core types and logic for rota.
//!
//! Events are templates: their agenda, staffing and tasks are defined once and
//! apply to every date the event recurs on. Any single date can be forked into an
//! independent snapshot, edited freely, and reset back to the template.
//!
//! - `recurrence` expands events into dated instances
//! - `store` holds template and fork records (`ForkStore`)
//! - `timeline` compiles an agenda into start and end times
//! - `auth` decides who may edit what
//! - `staffing` fills a group's roles with available members

pub mod activity;
pub mod auth;
pub mod config;
pub mod constants;
pub mod date_range;
pub mod directory;
pub mod error;
pub mod event;
pub mod records;
pub mod recurrence;
pub mod roster;
pub mod rota;
pub mod staffing;
pub mod store;
pub mod time;
pub mod timeline;

pub use activity::{ActivityKind, ActivityLog, ActivityRecord, EntityKind, Mutation};
pub use auth::{EditTarget, Identity};
pub use date_range::DateRange;
pub use directory::Directory;
pub use error::{RotaError, RotaResult};
pub use event::{Event, EventStatus, Recurrence};
pub use recurrence::{Instance, expand, expand_with_overrides};
pub use roster::{Duty, roster_for};
pub use rota::Rota;
pub use staffing::{FillOptions, FillReport};
pub use store::{EventData, ForkStore, ResetOutcome};
pub use time::TimeOfDay;
