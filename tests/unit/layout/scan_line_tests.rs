// Unit tests for lane assignment through the public layout API
// Covers the overlap scenario, responsibility lanes and week bars

#[path = "../../fixtures/mod.rs"]
mod fixtures;

use family_calendar::models::layout::LaneAssignment;
use family_calendar::services::layout::{assign_lanes, layout_day, layout_week, LayoutInterval};
use family_calendar::utils::date::{day_index_for, default_epoch, MINUTES_PER_DAY};
use fixtures::{dates, events};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn summary(assignments: &[LaneAssignment]) -> Vec<(&str, u32, u32)> {
    assignments
        .iter()
        .map(|a| (a.slot.event_id.as_str(), a.slot.lane, a.slot.max_lanes))
        .collect()
}

fn march_3_minutes() -> (i64, i64) {
    let day = day_index_for(dates::day(2026, 3, 3), default_epoch());
    (day * MINUTES_PER_DAY, (day + 1) * MINUTES_PER_DAY - 1)
}

#[test]
fn test_overlap_scenario_lanes() {
    let events = events::overlap_scenario();
    let layout = layout_day(&events, march_3_minutes(), default_epoch(), false);
    assert_eq!(
        summary(&layout.events),
        vec![("A", 0, 2), ("B", 1, 2), ("C", 0, 1)]
    );
    assert!(layout.responsibilities.is_empty());
    assert!(layout.all_day.is_empty());
}

#[test]
fn test_overlap_scenario_ignores_input_order() {
    let mut events = events::overlap_scenario();
    events.reverse();
    let layout = layout_day(&events, march_3_minutes(), default_epoch(), false);
    assert_eq!(
        summary(&layout.events),
        vec![("A", 0, 2), ("B", 1, 2), ("C", 0, 1)]
    );
}

#[test]
fn test_pickup_does_not_widen_event_columns() {
    let events = vec![
        events::with_pickup("swim"),
        events::timed("homework", (15, 30), (16, 30)),
    ];
    let layout = layout_day(&events, march_3_minutes(), default_epoch(), false);
    assert_eq!(
        summary(&layout.events),
        vec![("swim", 0, 2), ("homework", 1, 2)]
    );
    assert_eq!(summary(&layout.responsibilities), vec![("swim-pickup", 0, 1)]);
}

#[test]
fn test_window_outside_events_is_empty() {
    let events = events::overlap_scenario();
    let (lo, _) = march_3_minutes();
    let layout = layout_day(&events, (lo - MINUTES_PER_DAY, lo - 1), default_epoch(), false);
    assert!(layout.events.is_empty());
}

// (first, last) of a second interval against a fixed [10, 20]
#[test_case(0, 9, 1 ; "ends just before")]
#[test_case(0, 10, 2 ; "touches start")]
#[test_case(20, 30, 2 ; "touches end")]
#[test_case(21, 30, 1 ; "starts just after")]
#[test_case(12, 14, 2 ; "nested")]
fn test_boundary_concurrency(first: i64, last: i64, expected_columns: u32) {
    let input = vec![
        LayoutInterval::new("fixed", 10, 20),
        LayoutInterval::new("other", first, last),
    ];
    let result = assign_lanes(&input, false);
    let fixed = result.iter().find(|a| a.slot.event_id == "fixed").unwrap();
    assert_eq!(fixed.slot.max_lanes, expected_columns);
}

#[test]
fn test_expansion_only_into_free_lanes() {
    let input = vec![
        LayoutInterval::new("a", 0, 30),
        LayoutInterval::new("b", 0, 10),
        LayoutInterval::new("c", 0, 30),
        LayoutInterval::new("d", 15, 25),
    ];
    let result = assign_lanes(&input, true);
    let spans: Vec<(&str, u32, u32)> = result
        .iter()
        .map(|a| (a.slot.event_id.as_str(), a.slot.lane, a.slot.lanes_spanned))
        .collect();
    // b frees lane 0 for d; a and c keep lanes 1 and 2
    assert_eq!(spans, vec![("b", 0, 1), ("a", 1, 1), ("c", 2, 1), ("d", 0, 1)]);
}

#[test]
fn test_week_bars_stack_multi_day_events() {
    let camp = events::all_day("camp", 3);
    let dentist = events::timed("dentist", (9, 0), (9, 30));
    let epoch = default_epoch();
    let first_day = day_index_for(dates::day(2026, 3, 1), epoch);

    let week = layout_week(&[&camp, &dentist], first_day, epoch, false);
    let bars: Vec<(&str, i64, i64, u32)> = week
        .bars
        .iter()
        .map(|b| {
            (
                b.slot.event_id.as_str(),
                b.first_day - first_day,
                b.last_day - first_day,
                b.slot.lane,
            )
        })
        .collect();
    assert_eq!(bars, vec![("dentist", 2, 2, 0), ("camp", 2, 4, 1)]);
}
