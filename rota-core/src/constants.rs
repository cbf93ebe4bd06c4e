/// Default forward window (in days) for instance listings.
pub const DEFAULT_VIEW_DAYS: i64 = 90;

/// Default look-ahead (in days) when listing a person's open tasks.
pub const DEFAULT_TASK_HORIZON_DAYS: i64 = 60;

/// Upper bound on instances generated for a single event in one expansion.
pub const MAX_INSTANCES_PER_EVENT: u16 = 1000;

pub const MINUTES_PER_DAY: u32 = 24 * 60;
