//! Recurrence expansion for event templates.
//!
//! Expands each event's recurrence rule into the concrete dates it falls on
//! within a viewing window. Instances are computed on every call and never stored.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use rrule::RRuleSet;
use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::MAX_INSTANCES_PER_EVENT;
use crate::date_range::DateRange;
use crate::error::{RotaError, RotaResult};
use crate::event::{Event, Recurrence};
use crate::store::ForkStore;
use crate::time::TimeOfDay;

/// One dated appearance of an event, enough to drive navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    pub event_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub start_time: TimeOfDay,
    pub group_ids: Vec<String>,
    /// Set when this date has been forked
    pub occurrence_id: Option<String>,
    pub cancelled: bool,
}

impl Instance {
    fn new(event: &Event, date: NaiveDate) -> Self {
        Instance {
            event_id: event.id.clone(),
            date,
            title: event.name.clone(),
            start_time: event.start_time(),
            group_ids: event.group_ids.clone(),
            occurrence_id: None,
            cancelled: false,
        }
    }
}

/// Expand all `events` within `range`, ordered by date then start time.
pub fn expand(events: &[Event], range: &DateRange) -> RotaResult<Vec<Instance>> {
    expand_events(events, range, None)
}

/// Like [`expand`], but annotates forked dates with their occurrence id,
/// title override and cancellation.
pub fn expand_with_overrides(
    events: &[Event],
    range: &DateRange,
    store: &ForkStore,
) -> RotaResult<Vec<Instance>> {
    expand_events(events, range, Some(store))
}

fn expand_events(
    events: &[Event],
    range: &DateRange,
    store: Option<&ForkStore>,
) -> RotaResult<Vec<Instance>> {
    let mut instances = Vec::new();

    if range.is_empty() {
        return Ok(instances);
    }

    for event in events {
        for date in instance_dates(event, range)? {
            let mut instance = Instance::new(event, date);

            if let Some(occurrence) = store.and_then(|s| s.occurrence_for(&event.id, date)) {
                instance.occurrence_id = Some(occurrence.id.clone());
                instance.cancelled = occurrence.is_cancelled();
                if let Some(title) = &occurrence.title {
                    instance.title = title.clone();
                }
            }

            instances.push(instance);
        }
    }

    // Stable: same date and time keep event order
    instances.sort_by(|a, b| a.date.cmp(&b.date).then(a.start_time.cmp(&b.start_time)));

    debug!(
        events = events.len(),
        instances = instances.len(),
        from = %range.from,
        to = %range.to,
        "Expanded recurrences"
    );

    Ok(instances)
}

/// Dates on which `event` occurs within `range`.
pub fn instance_dates(event: &Event, range: &DateRange) -> RotaResult<Vec<NaiveDate>> {
    let Some(rrule_str) = build_rrule_string(event) else {
        let dates = if range.contains(event.start) {
            vec![event.start_date()]
        } else {
            Vec::new()
        };
        return Ok(dates);
    };

    let rrule_set: RRuleSet = rrule_str.parse().map_err(|e| {
        RotaError::Recurrence(format!(
            "Failed to parse recurrence for event '{}': {}",
            event.id, e
        ))
    })?;

    // Event times are floating; treat them as UTC for the rule engine.
    // Widen by a second each side since after/before are exclusive.
    let tz: rrule::Tz = Utc.into();
    let after = (range.from.and_utc() - Duration::seconds(1)).with_timezone(&tz);
    let before = (range.to.and_utc() + Duration::seconds(1)).with_timezone(&tz);

    let result = rrule_set
        .after(after)
        .before(before)
        .all(MAX_INSTANCES_PER_EVENT);

    if result.limited {
        warn!(
            event_id = %event.id,
            limit = MAX_INSTANCES_PER_EVENT,
            "Recurrence expansion truncated"
        );
    }

    let anchor = event.start_date();
    let dates = result
        .dates
        .iter()
        .map(|dt| dt.naive_utc())
        .filter(|start| range.contains(*start))
        .map(|start| start.date())
        .filter(|date| match event.recurrence {
            // First matching weekday of the month, never before the anchor date
            Recurrence::Monthly => date.day() <= 7 && *date >= anchor,
            _ => *date >= anchor,
        })
        .collect();

    Ok(dates)
}

/// Build an iCalendar-format DTSTART + RRULE string for the rrule crate parser.
fn build_rrule_string(event: &Event) -> Option<String> {
    let rule = match event.recurrence {
        Recurrence::None => return None,
        Recurrence::Monthly => format!("FREQ=MONTHLY;BYDAY=1{}", weekday_code(event.weekday())),
        weekly => format!("FREQ=WEEKLY;INTERVAL={}", weekly.interval_weeks()?),
    };

    Some(format!(
        "DTSTART:{}Z\nRRULE:{}",
        event.start.format("%Y%m%dT%H%M%S"),
        rule
    ))
}

fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::OccurrenceStatus;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    /// Sunday service, 2025-02-16 11:00 - 12:30
    fn service(recurrence: Recurrence) -> Event {
        let mut event = Event::new(
            "Sunday service",
            at(2025, 2, 16, 11, 0),
            at(2025, 2, 16, 12, 30),
            recurrence,
        );
        event.id = "e-sunday".to_string();
        event.group_ids = vec!["g-music".to_string()];
        event
    }

    fn dates(instances: &[Instance]) -> Vec<NaiveDate> {
        instances.iter().map(|i| i.date).collect()
    }

    #[test]
    fn test_single_event_in_and_out_of_range() {
        let event = service(Recurrence::None);

        let inside = expand(&[event.clone()], &DateRange::days(date(2025, 2, 1), date(2025, 2, 28))).unwrap();
        assert_eq!(dates(&inside), vec![date(2025, 2, 16)]);
        assert_eq!(inside[0].start_time.to_string(), "11:00");
        assert_eq!(inside[0].group_ids, vec!["g-music".to_string()]);

        let outside = expand(&[event], &DateRange::days(date(2025, 3, 1), date(2025, 3, 31))).unwrap();
        assert!(outside.is_empty());
    }

    #[test]
    fn test_single_event_range_bounds_are_inclusive() {
        let event = service(Recurrence::None);
        let exact = DateRange::new(at(2025, 2, 16, 11, 0), at(2025, 2, 16, 11, 0));

        assert_eq!(expand(&[event], &exact).unwrap().len(), 1);
    }

    #[test]
    fn test_weekly_steps_seven_days_within_range() {
        let range = DateRange::days(date(2025, 2, 1), date(2025, 3, 31));
        let instances = expand(&[service(Recurrence::Weekly)], &range).unwrap();

        assert_eq!(instances.first().map(|i| i.date), Some(date(2025, 2, 16)));
        assert_eq!(instances.last().map(|i| i.date), Some(date(2025, 3, 30)));
        assert_eq!(instances.len(), 7);
        for pair in instances.windows(2) {
            assert_eq!((pair[1].date - pair[0].date).num_days(), 7);
        }
    }

    #[test]
    fn test_weekly_window_starting_mid_series() {
        let range = DateRange::days(date(2025, 3, 3), date(2025, 3, 20));
        let instances = expand(&[service(Recurrence::Weekly)], &range).unwrap();

        assert_eq!(dates(&instances), vec![date(2025, 3, 9), date(2025, 3, 16)]);
    }

    #[test]
    fn test_weekly_excludes_instant_after_range_end() {
        let range = DateRange::new(at(2025, 2, 16, 0, 0), at(2025, 2, 23, 10, 59));
        let instances = expand(&[service(Recurrence::Weekly)], &range).unwrap();

        assert_eq!(dates(&instances), vec![date(2025, 2, 16)]);
    }

    #[test]
    fn test_weekly_excludes_instant_before_range_start() {
        let from = at(2025, 2, 23, 11, 0) + Duration::seconds(1);
        let range = DateRange::new(from, at(2025, 2, 28, 23, 59));
        let instances = expand(&[service(Recurrence::Weekly)], &range).unwrap();

        assert!(instances.is_empty());
    }

    #[test]
    fn test_weekly_range_bounds_are_inclusive() {
        let range = DateRange::new(at(2025, 2, 23, 11, 0), at(2025, 3, 2, 11, 0));
        let instances = expand(&[service(Recurrence::Weekly)], &range).unwrap();

        assert_eq!(dates(&instances), vec![date(2025, 2, 23), date(2025, 3, 2)]);
    }

    #[test]
    fn test_midnight_event_stays_inside_day_range() {
        let event = Event::new(
            "Night prayer",
            at(2025, 2, 16, 0, 0),
            at(2025, 2, 16, 1, 0),
            Recurrence::Weekly,
        );
        let range = DateRange::days(date(2025, 2, 10), date(2025, 2, 22));
        let instances = expand(&[event], &range).unwrap();

        assert_eq!(dates(&instances), vec![date(2025, 2, 16)]);
    }

    #[test]
    fn test_multi_week_intervals() {
        let range = DateRange::days(date(2025, 2, 1), date(2025, 3, 31));

        let bi = expand(&[service(Recurrence::BiWeekly)], &range).unwrap();
        assert_eq!(
            dates(&bi),
            vec![date(2025, 2, 16), date(2025, 3, 2), date(2025, 3, 16), date(2025, 3, 30)]
        );

        let tri = expand(&[service(Recurrence::TriWeekly)], &range).unwrap();
        assert_eq!(dates(&tri), vec![date(2025, 2, 16), date(2025, 3, 9), date(2025, 3, 30)]);

        let quad = expand(&[service(Recurrence::QuadWeekly)], &range).unwrap();
        assert_eq!(dates(&quad), vec![date(2025, 2, 16), date(2025, 3, 16)]);
    }

    #[test]
    fn test_window_before_series_start_is_empty() {
        let range = DateRange::days(date(2025, 1, 1), date(2025, 2, 15));
        assert!(expand(&[service(Recurrence::Weekly)], &range).unwrap().is_empty());
    }

    #[test]
    fn test_monthly_is_first_weekday_on_or_after_anchor() {
        // Anchor is the third Sunday of February; Feb 2 is before it
        let range = DateRange::days(date(2025, 2, 1), date(2025, 6, 30));
        let instances = expand(&[service(Recurrence::Monthly)], &range).unwrap();

        assert_eq!(
            dates(&instances),
            vec![date(2025, 3, 2), date(2025, 4, 6), date(2025, 5, 4), date(2025, 6, 1)]
        );
        for instance in &instances {
            assert_eq!(instance.date.weekday(), Weekday::Sun);
            assert!(instance.date.day() <= 7);
        }
    }

    #[test]
    fn test_monthly_includes_anchor_when_it_is_a_first_weekday() {
        let mut event = service(Recurrence::Monthly);
        event.start = at(2025, 3, 2, 11, 0);
        event.end = at(2025, 3, 2, 12, 0);

        let range = DateRange::days(date(2025, 3, 1), date(2025, 4, 30));
        let instances = expand(&[event], &range).unwrap();
        assert_eq!(dates(&instances), vec![date(2025, 3, 2), date(2025, 4, 6)]);
    }

    #[test]
    fn test_instances_sorted_by_date_then_time() {
        let mut evening = service(Recurrence::Weekly);
        evening.id = "e-evening".to_string();
        evening.start = at(2025, 2, 16, 18, 0);
        evening.end = at(2025, 2, 16, 19, 0);

        let mut midweek = service(Recurrence::None);
        midweek.id = "e-midweek".to_string();
        midweek.start = at(2025, 2, 19, 9, 30);
        midweek.end = at(2025, 2, 19, 10, 30);

        let range = DateRange::days(date(2025, 2, 16), date(2025, 2, 23));
        let instances =
            expand(&[evening, midweek, service(Recurrence::Weekly)], &range).unwrap();

        let order: Vec<_> = instances
            .iter()
            .map(|i| (i.date, i.event_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (date(2025, 2, 16), "e-sunday"),
                (date(2025, 2, 16), "e-evening"),
                (date(2025, 2, 19), "e-midweek"),
                (date(2025, 2, 23), "e-sunday"),
                (date(2025, 2, 23), "e-evening"),
            ]
        );
    }

    #[test]
    fn test_overrides_annotate_forked_dates() {
        let mut store = ForkStore::new();
        let occ = store.ensure_fork("e-sunday", date(2025, 2, 23));
        store
            .set_occurrence_details(&occ, Some("Family service".to_string()), None)
            .unwrap();
        store
            .set_occurrence_status(&occ, OccurrenceStatus::Cancelled)
            .unwrap();

        let range = DateRange::days(date(2025, 2, 16), date(2025, 2, 23));
        let instances =
            expand_with_overrides(&[service(Recurrence::Weekly)], &range, &store).unwrap();

        assert_eq!(instances[0].title, "Sunday service");
        assert!(instances[0].occurrence_id.is_none());
        assert_eq!(instances[1].title, "Family service");
        assert_eq!(instances[1].occurrence_id.as_deref(), Some(occ.as_str()));
        assert!(instances[1].cancelled);
    }
}
