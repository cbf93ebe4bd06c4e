//! Agenda timeline compilation.
//!
//! Turns an ordered agenda into absolute start/end times: a cursor starts at the
//! event's start time and advances by each segment's duration. A segment with a
//! manual start time moves the cursor to that time first, dropping any drift.

use serde::Serialize;

use crate::error::RotaResult;
use crate::records::AgendaItem;
use crate::time::TimeOfDay;

/// An agenda item with its computed display times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub item: AgendaItem,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// Compile `items` starting at `anchor`.
///
/// Items are ordered by `order_index`; ties keep their input order. Times past
/// midnight wrap around without a day component.
pub fn compile(anchor: TimeOfDay, items: &[AgendaItem]) -> Vec<TimelineEntry> {
    let mut sorted: Vec<&AgendaItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.order_index);

    let mut cursor = u64::from(anchor.minutes());

    sorted
        .into_iter()
        .map(|item| {
            if let Some(manual) = item.manual_start_time {
                cursor = u64::from(manual.minutes());
            }

            let start = cursor;
            cursor += u64::from(item.duration_minutes);

            TimelineEntry {
                item: item.clone(),
                start: TimeOfDay::wrapping_from_minutes(start),
                end: TimeOfDay::wrapping_from_minutes(cursor),
            }
        })
        .collect()
}

/// Like [`compile`], with the anchor given as `HH:mm`.
pub fn compile_at(anchor: &str, items: &[AgendaItem]) -> RotaResult<Vec<TimelineEntry>> {
    Ok(compile(anchor.parse()?, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RotaError;
    use crate::records::NewAgendaItem;

    fn item(title: &str, minutes: u32, order_index: u32, manual: Option<&str>) -> AgendaItem {
        let mut draft = NewAgendaItem::new("e1", title, minutes);
        draft.manual_start_time = manual.map(|m| m.parse().unwrap());
        draft.into_record(title.to_string(), None, None, order_index)
    }

    fn times(entries: &[TimelineEntry]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|e| (e.start.to_string(), e.end.to_string()))
            .collect()
    }

    #[test]
    fn test_sequential_segments() {
        let items = vec![item("a", 15, 0, None), item("b", 30, 1, None)];

        let entries = compile_at("10:00", &items).unwrap();
        assert_eq!(
            times(&entries),
            vec![
                ("10:00".to_string(), "10:15".to_string()),
                ("10:15".to_string(), "10:45".to_string()),
            ]
        );
    }

    #[test]
    fn test_manual_start_resets_cursor() {
        let items = vec![
            item("a", 15, 0, None),
            item("b", 30, 1, None),
            item("c", 20, 2, Some("11:00")),
            item("d", 5, 3, None),
        ];

        let entries = compile_at("10:00", &items).unwrap();
        assert_eq!(entries[2].start.to_string(), "11:00");
        assert_eq!(entries[2].end.to_string(), "11:20");
        assert_eq!(entries[3].start.to_string(), "11:20");
    }

    #[test]
    fn test_manual_start_can_move_backwards() {
        let items = vec![item("a", 90, 0, None), item("b", 10, 1, Some("10:30"))];

        let entries = compile_at("10:00", &items).unwrap();
        assert_eq!(entries[1].start.to_string(), "10:30");
    }

    #[test]
    fn test_orders_by_index_and_keeps_ties_stable() {
        let items = vec![
            item("late", 10, 20, None),
            item("first", 5, 0, None),
            item("tie-a", 5, 9, None),
            item("tie-b", 5, 9, None),
        ];

        let entries = compile_at("09:00", &items).unwrap();
        let order: Vec<_> = entries.iter().map(|e| e.item.title.as_str()).collect();
        assert_eq!(order, vec!["first", "tie-a", "tie-b", "late"]);
    }

    #[test]
    fn test_wraps_past_midnight() {
        let items = vec![item("vigil", 90, 0, None), item("after", 30, 1, None)];

        let entries = compile_at("23:00", &items).unwrap();
        assert_eq!(
            times(&entries),
            vec![
                ("23:00".to_string(), "00:30".to_string()),
                ("00:30".to_string(), "01:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_anchor_is_rejected() {
        assert!(matches!(
            compile_at("1000", &[]),
            Err(RotaError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_empty_agenda() {
        assert!(compile(TimeOfDay::MIDNIGHT, &[]).is_empty());
    }
}
