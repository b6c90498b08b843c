// Property-based tests for scan-line lane assignment
// Lane uniqueness, column bounds and input-order independence

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use family_calendar::models::event::CalendarEvent;
use family_calendar::services::layout::{assign_lanes, layout_day, LayoutInterval};
use family_calendar::utils::date::{day_index_for, default_epoch, MINUTES_PER_DAY};
use proptest::prelude::*;

fn intervals_strategy(max: usize) -> impl Strategy<Value = Vec<LayoutInterval>> {
    prop::collection::vec((-500..500i64, 0..200i64), 0..max).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(i, (first, length))| {
                LayoutInterval::new(format!("e{}", i), first, first + length)
            })
            .collect()
    })
}

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
}

/// Timed events with second-level start and end times over two days.
fn events_strategy(max: usize) -> impl Strategy<Value = Vec<CalendarEvent>> {
    prop::collection::vec((0..2 * 86_400i64, 0..7_200i64), 0..max).prop_map(|spans| {
        let midnight = base_day().and_hms_opt(0, 0, 0).unwrap();
        spans
            .into_iter()
            .enumerate()
            .map(|(i, (offset, length))| {
                let start = midnight + Duration::seconds(offset);
                let end = start + Duration::seconds(length);
                CalendarEvent::new(format!("e{}", i), start, end).unwrap()
            })
            .collect()
    })
}

proptest! {
    /// Property: N intervals sharing a tick use lanes 0..N and all report N columns
    #[test]
    fn prop_common_tick_uses_every_lane_once(
        tick in -1000..1000i64,
        reaches in prop::collection::vec((0..300i64, 0..300i64), 1..16),
    ) {
        let input: Vec<LayoutInterval> = reaches
            .iter()
            .enumerate()
            .map(|(i, (before, after))| {
                LayoutInterval::new(format!("e{}", i), tick - before, tick + after)
            })
            .collect();
        let result = assign_lanes(&input, false);

        let mut lanes: Vec<u32> = result.iter().map(|a| a.slot.lane).collect();
        lanes.sort_unstable();
        let expected: Vec<u32> = (0..input.len() as u32).collect();
        prop_assert_eq!(lanes, expected);
        prop_assert!(result.iter().all(|a| a.slot.max_lanes == input.len() as u32));
    }

    /// Property: intervals in the same lane never overlap
    #[test]
    fn prop_same_lane_never_overlaps(input in intervals_strategy(40)) {
        let result = assign_lanes(&input, false);
        prop_assert_eq!(result.len(), input.len());
        for (i, a) in result.iter().enumerate() {
            for b in &result[i + 1..] {
                if a.slot.lane == b.slot.lane {
                    prop_assert!(a.last < b.first || b.last < a.first);
                }
            }
        }
    }

    /// Property: expanded blocks stay inside their column count
    #[test]
    fn prop_expansion_stays_in_bounds(input in intervals_strategy(40)) {
        for assignment in assign_lanes(&input, true) {
            let slot = &assignment.slot;
            prop_assert!(slot.lanes_spanned >= 1);
            prop_assert!(slot.lane < slot.max_lanes);
            prop_assert!(slot.lane + slot.lanes_spanned <= slot.max_lanes);
        }
    }

    /// Property: input order does not change the assignment
    #[test]
    fn prop_assignment_ignores_input_order(
        (input, shuffled) in intervals_strategy(30).prop_flat_map(|input| {
            let shuffled = Just(input.clone()).prop_shuffle();
            (Just(input), shuffled)
        }),
        expand in any::<bool>(),
    ) {
        prop_assert_eq!(assign_lanes(&input, expand), assign_lanes(&shuffled, expand));
    }

    /// Property: events sharing a lane have disjoint half-open [start, end) times
    #[test]
    fn prop_same_lane_events_never_overlap_in_time(events in events_strategy(30)) {
        let day = day_index_for(base_day(), default_epoch());
        let window = (day * MINUTES_PER_DAY, (day + 3) * MINUTES_PER_DAY - 1);
        let layout = layout_day(&events, window, default_epoch(), false);
        prop_assert_eq!(layout.events.len(), events.len());

        let times: HashMap<&str, (NaiveDateTime, NaiveDateTime)> = events
            .iter()
            .map(|e| (e.id.as_str(), (e.start, e.end)))
            .collect();
        for (i, a) in layout.events.iter().enumerate() {
            for b in &layout.events[i + 1..] {
                if a.slot.lane != b.slot.lane {
                    continue;
                }
                let (a_start, a_end) = times[a.slot.event_id.as_str()];
                let (b_start, b_end) = times[b.slot.event_id.as_str()];
                prop_assert!(
                    a_end <= b_start || b_end <= a_start,
                    "{} and {} share lane {}",
                    a.slot.event_id,
                    b.slot.event_id,
                    a.slot.lane
                );
            }
        }
    }
}
