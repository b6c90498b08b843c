//! Day-view layout: timed events, responsibilities and all-day bars.

use chrono::NaiveDate;

use crate::models::event::{minute_range, CalendarEvent};
use crate::models::grid::{GridWindow, HOURS_PER_DAY};
use crate::models::layout::{DayBar, DayLayout, EventPlacement, LaneAssignment, LaneKind};
use crate::models::settings::MAX_MARGIN_DAYS;
use crate::utils::date::MINUTES_PER_DAY;

use super::scan_line::{assign_lanes, LayoutInterval};

/// Inclusive minute window laid out for a grid window, widened by `margin_days`.
pub fn layout_window_minutes(window: &GridWindow, margin_days: i64) -> (i64, i64) {
    let (start_hour, end_hour) = window.hour_span();
    let margin = margin_days.clamp(0, MAX_MARGIN_DAYS) * MINUTES_PER_DAY;
    (start_hour * 60 - margin, end_hour * 60 - 1 + margin)
}

/// Lay out every event intersecting `window_minutes`.
///
/// Ordinary timed events and responsibility sub-events get independent lane
/// spaces; all-day events are laid out by day in a third set.
pub fn layout_day<'a, I>(
    events: I,
    window_minutes: (i64, i64),
    epoch: NaiveDate,
    expand_lanes: bool,
) -> DayLayout
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let (lo, hi) = window_minutes;
    let (lo_day, hi_day) = (lo.div_euclid(MINUTES_PER_DAY), hi.div_euclid(MINUTES_PER_DAY));

    let mut timed = Vec::new();
    let mut responsibilities = Vec::new();
    let mut all_day = Vec::new();

    for event in events {
        if event.is_all_day {
            let (first, last) = event.day_range(epoch);
            let interval = LayoutInterval::new(event.id.as_str(), first, last);
            all_day.extend(interval.clipped(lo_day, hi_day));
        } else {
            let (first, last) = event.minute_range(epoch);
            timed.extend(LayoutInterval::new(event.id.as_str(), first, last).clipped(lo, hi));
        }

        for sub in &event.responsibility_sub_events {
            let (first, last) = minute_range(sub.start, sub.end, epoch);
            let interval = LayoutInterval::new(sub.id.as_str(), first, last);
            responsibilities.extend(interval.clipped(lo, hi));
        }
    }

    DayLayout {
        events: assign_lanes(&timed, expand_lanes),
        responsibilities: assign_lanes(&responsibilities, expand_lanes),
        all_day: assign_lanes(&all_day, expand_lanes),
    }
}

fn place(
    kind: LaneKind,
    assignments: &[LaneAssignment],
    window: &GridWindow,
    out: &mut Vec<EventPlacement>,
) {
    let (top, bottom) = (window.first_row as f64, window.end_row() as f64);
    for col in window.first_col..window.end_col() {
        let column_origin = (col * HOURS_PER_DAY) as f64;
        for assignment in assignments {
            let row_start = assignment.first as f64 / 60.0 - column_origin;
            let row_end = (assignment.last + 1) as f64 / 60.0 - column_origin;
            if row_end > top && row_start < bottom {
                out.push(EventPlacement {
                    kind,
                    slot: assignment.slot.clone(),
                    col,
                    row_start,
                    row_end,
                });
            }
        }
    }
}

/// Blocks for every visible column. Column `c` shows the timeline starting
/// at day `c` midnight, so an event may appear in more than one column.
pub fn place_timed(layout: &DayLayout, window: &GridWindow) -> Vec<EventPlacement> {
    let mut placements = Vec::new();
    if window.is_empty() {
        return placements;
    }
    place(LaneKind::Event, &layout.events, window, &mut placements);
    place(LaneKind::Responsibility, &layout.responsibilities, window, &mut placements);
    placements
}

/// All-day bars clipped to the visible columns' header days.
pub fn place_all_day(layout: &DayLayout, window: &GridWindow) -> Vec<DayBar> {
    if window.is_empty() {
        return Vec::new();
    }
    let (first_visible, last_visible) = (window.first_col, window.end_col() - 1);
    layout
        .all_day
        .iter()
        .filter(|a| a.last >= first_visible && a.first <= last_visible)
        .map(|a| DayBar {
            kind: LaneKind::Event,
            slot: a.slot.clone(),
            first_day: a.first.max(first_visible),
            last_day: a.last.min(last_visible),
        })
        .collect()
}
