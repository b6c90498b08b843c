//! Month-view layout: per week row, events become bars and lanes are rows.

use chrono::NaiveDate;

use crate::models::event::{day_range, CalendarEvent};
use crate::models::layout::{DayBar, LaneAssignment, LaneKind, MonthPageLayout, WeekLayout};
use crate::models::month::{MonthPage, DAYS_PER_WEEK};

use super::scan_line::{assign_lanes, LayoutInterval};

fn bars(kind: LaneKind, assignments: Vec<LaneAssignment>) -> impl Iterator<Item = DayBar> {
    assignments.into_iter().map(move |a| DayBar {
        kind,
        slot: a.slot,
        first_day: a.first,
        last_day: a.last,
    })
}

/// Lay out one week row starting at `first_day_index`.
pub fn layout_week(
    events: &[&CalendarEvent],
    first_day_index: i64,
    epoch: NaiveDate,
    expand_lanes: bool,
) -> WeekLayout {
    let last_day_index = first_day_index + DAYS_PER_WEEK - 1;
    let mut intervals = Vec::new();
    let mut responsibilities = Vec::new();

    for event in events {
        let (first, last) = event.day_range(epoch);
        let interval = LayoutInterval::new(event.id.as_str(), first, last);
        intervals.extend(interval.clipped(first_day_index, last_day_index));
        for sub in &event.responsibility_sub_events {
            let (first, last) = day_range(sub.start, sub.end, epoch);
            let interval = LayoutInterval::new(sub.id.as_str(), first, last);
            responsibilities.extend(interval.clipped(first_day_index, last_day_index));
        }
    }

    let mut week_bars: Vec<DayBar> =
        bars(LaneKind::Event, assign_lanes(&intervals, expand_lanes)).collect();
    week_bars.extend(bars(
        LaneKind::Responsibility,
        assign_lanes(&responsibilities, expand_lanes),
    ));

    WeekLayout {
        first_day_index,
        bars: week_bars,
    }
}

/// Lay out all six week rows of `page`.
pub fn layout_month_page<'a, I>(
    page: &MonthPage,
    events: I,
    epoch: NaiveDate,
    expand_lanes: bool,
) -> MonthPageLayout
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let (grid_first, grid_last) = (page.grid_start_day, page.grid_end_day());
    let on_page: Vec<&CalendarEvent> = events
        .into_iter()
        .filter(|event| {
            let (first, last) = event.day_range(epoch);
            let sub_visible = event.responsibility_sub_events.iter().any(|sub| {
                let (sub_first, sub_last) = day_range(sub.start, sub.end, epoch);
                sub_last >= grid_first && sub_first <= grid_last
            });
            (last >= grid_first && first <= grid_last) || sub_visible
        })
        .collect();

    MonthPageLayout {
        page: *page,
        weeks: page
            .week_starts()
            .map(|week_start| layout_week(&on_page, week_start, epoch, expand_lanes))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::ResponsibilitySubEvent;
    use chrono::NaiveDateTime;

    fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn page() -> MonthPage {
        MonthPage::new((2025, 3), 0, 0, epoch()).unwrap()
    }

    #[test]
    fn test_multi_day_event_split_across_weeks() {
        // March 2025 grid starts Sunday Feb 23 (day -6)
        let holiday = CalendarEvent::new("holiday", at(3, 7, 0), at(3, 11, 0))
            .unwrap()
            .all_day(true);
        let layout = layout_month_page(&page(), [&holiday], epoch(), false);
        assert_eq!(layout.weeks.len(), 6);

        let pieces: Vec<(i64, i64)> = layout
            .weeks
            .iter()
            .flat_map(|w| w.bars.iter().map(|b| (b.first_day, b.last_day)))
            .collect();
        // Mar 7 (day 6) .. Mar 10 (day 9); the week boundary falls after Sat Mar 8
        assert_eq!(pieces, vec![(6, 7), (8, 9)]);
    }

    #[test]
    fn test_overlapping_days_stack_in_rows() {
        let a = CalendarEvent::new("a", at(3, 3, 9), at(3, 5, 9)).unwrap();
        let b = CalendarEvent::new("b", at(3, 4, 9), at(3, 4, 10)).unwrap();
        let c = CalendarEvent::new("c", at(3, 6, 9), at(3, 6, 10)).unwrap();
        let layout = layout_month_page(&page(), [&a, &b, &c], epoch(), false);

        let week = layout
            .weeks
            .iter()
            .find(|w| !w.bars.is_empty())
            .unwrap();
        let rows: Vec<_> = week
            .bars
            .iter()
            .map(|b| (b.slot.event_id.as_str(), b.slot.lane, b.slot.max_lanes))
            .collect();
        assert_eq!(rows, vec![("a", 0, 2), ("b", 1, 2), ("c", 0, 1)]);
    }

    #[test]
    fn test_responsibility_rows_are_separate() {
        let sub = ResponsibilitySubEvent {
            id: "laundry".to_string(),
            start: at(3, 4, 8),
            end: at(3, 4, 9),
            assignee_ref: None,
        };
        let a = CalendarEvent::new("a", at(3, 4, 9), at(3, 4, 10))
            .unwrap()
            .with_responsibility(sub);
        let layout = layout_month_page(&page(), [&a], epoch(), false);
        let bars: Vec<_> = layout.weeks.iter().flat_map(|w| w.bars.iter()).collect();
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(|b| b.slot.lane == 0));
        assert_eq!(bars[1].kind, LaneKind::Responsibility);
    }

    #[test]
    fn test_responsibility_ending_at_midnight_keeps_one_day() {
        let sub = ResponsibilitySubEvent {
            id: "r".to_string(),
            start: at(3, 4, 22),
            end: at(3, 5, 0),
            assignee_ref: None,
        };
        let parent = CalendarEvent::new("p", at(3, 4, 22), at(3, 5, 0))
            .unwrap()
            .with_responsibility(sub);
        let layout = layout_month_page(&page(), [&parent], epoch(), false);
        let bars: Vec<_> = layout
            .weeks
            .iter()
            .flat_map(|w| w.bars.iter())
            .map(|b| (b.slot.event_id.as_str(), b.first_day, b.last_day))
            .collect();
        assert_eq!(bars, vec![("p", 3, 3), ("r", 3, 3)]);
    }

    #[test]
    fn test_events_off_page_are_ignored() {
        let far = CalendarEvent::new("far", at(6, 1, 9), at(6, 1, 10)).unwrap();
        let layout = layout_month_page(&page(), [&far], epoch(), false);
        assert!(layout.weeks.iter().all(|w| w.bars.is_empty()));
    }
}
