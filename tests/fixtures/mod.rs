// Test fixtures - reusable test data
// Provides consistent dates, events and group documents across test files

#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use family_calendar::models::event::{CalendarEvent, ResponsibilitySubEvent};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Returns Tue Mar 3, 2026 at the given time
    pub fn mar_3_2026(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 3)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    /// Returns Jan 31, 2026 at 15:00 (month paging clamps from here)
    pub fn jan_31_2026() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 31)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    /// Returns Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Timed event on Mar 3, 2026 between the given (hour, minute) pairs
    pub fn timed(id: &str, start: (u32, u32), end: (u32, u32)) -> CalendarEvent {
        CalendarEvent::new(
            id,
            dates::mar_3_2026(start.0, start.1),
            dates::mar_3_2026(end.0, end.1),
        )
        .unwrap()
    }

    /// The three-event overlap scenario: A 10:00-11:00, B 10:30-11:30, C 12:00-13:00
    pub fn overlap_scenario() -> Vec<CalendarEvent> {
        vec![
            timed("A", (10, 0), (11, 0)),
            timed("B", (10, 30), (11, 30)),
            timed("C", (12, 0), (13, 0)),
        ]
    }

    /// All-day event spanning `days` days from Mar 3, 2026
    pub fn all_day(id: &str, days: i64) -> CalendarEvent {
        let start = dates::mar_3_2026(0, 0);
        CalendarEvent::new(id, start, start + Duration::days(days))
            .unwrap()
            .all_day(true)
    }

    /// Event with a single responsibility hand-off overlapping it
    pub fn with_pickup(id: &str) -> CalendarEvent {
        timed(id, (15, 0), (16, 0)).with_responsibility(ResponsibilitySubEvent {
            id: format!("{}-pickup", id),
            start: dates::mar_3_2026(15, 45),
            end: dates::mar_3_2026(16, 15),
            assignee_ref: Some("dad".to_string()),
        })
    }
}

/// JSON group documents as read by the JSON event source
pub mod documents {
    /// A small family group with one hidden layer and one malformed event
    pub const FAMILY_GROUP: &str = r##"{
        "group": "family",
        "events": [
            {
                "id": "school-run",
                "title": "School run",
                "startTime": "2026-03-03T08:00:00",
                "endTime": "2026-03-03T08:45:00",
                "attendeeRefs": ["mum"],
                "responsibilitySubEvents": [
                    {
                        "id": "school-run-drive",
                        "startTime": "2026-03-03T08:00:00",
                        "endTime": "2026-03-03T08:30:00",
                        "assigneeRef": "mum"
                    }
                ]
            },
            {
                "id": "piano",
                "title": "Piano lesson",
                "startTime": "2026-03-03T08:15:00+11:00",
                "endTime": "2026-03-03T09:00:00+11:00",
                "attendeeRefs": ["kid"]
            },
            {
                "id": "gym",
                "title": "Gym",
                "startTime": "2026-03-03T08:00:00",
                "endTime": "2026-03-03T09:00:00",
                "attendeeRefs": ["dad"]
            },
            {
                "id": "broken",
                "startTime": "not a date",
                "endTime": "2026-03-03T09:00:00"
            }
        ],
        "preferences": {
            "layers": {
                "dad": { "visible": false },
                "kid": { "visible": true, "colorOverride": "#ff8800" }
            }
        }
    }"##;
}
