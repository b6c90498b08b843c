// Event module
// Calendar event snapshots as delivered by the group event store

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::{day_index_for, minute_index, minute_index_ceil};

/// Why an event could not be admitted into a layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event has no id")]
    MissingId,

    #[error("event {event_id}: missing {field} timestamp")]
    MissingTimestamp { event_id: String, field: &'static str },

    #[error("event {event_id}: malformed {field} timestamp {value:?}")]
    MalformedTimestamp {
        event_id: String,
        field: &'static str,
        value: String,
    },

    #[error("event {event_id}: end time is before start time")]
    EndBeforeStart { event_id: String },
}

/// Wire form of a responsibility sub-event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSubEvent {
    pub id: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub assignee_ref: Option<String>,
}

/// Wire form of a calendar event (ISO-8601 timestamps).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCalendarEvent {
    pub id: String,
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub attendee_refs: Vec<String>,
    pub is_all_day: bool,
    pub color_source: Option<String>,
    pub responsibility_sub_events: Vec<RawSubEvent>,
}

/// A task hand-off attached to an event, shown in the responsibility lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsibilitySubEvent {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub assignee_ref: Option<String>,
}

/// Immutable snapshot of a calendar event. Edits replace the whole value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub attendee_refs: Vec<String>,
    pub is_all_day: bool,
    pub color_source: Option<String>,
    pub responsibility_sub_events: Vec<ResponsibilitySubEvent>,
}

/// Parse an ISO-8601 timestamp as local wall-clock time.
///
/// Offsets are accepted but ignored: the wall-clock reading is kept as written.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_local());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn required_timestamp(
    event_id: &str,
    field: &'static str,
    value: Option<&str>,
) -> Result<NaiveDateTime, EventError> {
    let raw = value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        EventError::MissingTimestamp {
            event_id: event_id.to_string(),
            field,
        }
    })?;
    parse_timestamp(raw).ok_or_else(|| EventError::MalformedTimestamp {
        event_id: event_id.to_string(),
        field,
        value: raw.to_string(),
    })
}

fn checked_range(
    event_id: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(NaiveDateTime, NaiveDateTime), EventError> {
    let start = required_timestamp(event_id, "start", start)?;
    let end = required_timestamp(event_id, "end", end)?;
    if end < start {
        return Err(EventError::EndBeforeStart {
            event_id: event_id.to_string(),
        });
    }
    Ok((start, end))
}

impl TryFrom<&RawSubEvent> for ResponsibilitySubEvent {
    type Error = EventError;

    fn try_from(raw: &RawSubEvent) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(EventError::MissingId);
        }
        let (start, end) =
            checked_range(&raw.id, raw.start_time.as_deref(), raw.end_time.as_deref())?;
        Ok(Self {
            id: raw.id.clone(),
            start,
            end,
            assignee_ref: raw.assignee_ref.clone(),
        })
    }
}

impl TryFrom<&RawCalendarEvent> for CalendarEvent {
    type Error = EventError;

    /// Malformed sub-events are dropped individually; a malformed parent fails.
    fn try_from(raw: &RawCalendarEvent) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(EventError::MissingId);
        }
        let (start, end) =
            checked_range(&raw.id, raw.start_time.as_deref(), raw.end_time.as_deref())?;

        let responsibility_sub_events = raw
            .responsibility_sub_events
            .iter()
            .filter_map(|sub| match ResponsibilitySubEvent::try_from(sub) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    log::warn!("Dropping responsibility of event {}: {}", raw.id, err);
                    None
                }
            })
            .collect();

        Ok(Self {
            id: raw.id.clone(),
            title: raw.title.clone().unwrap_or_default(),
            start,
            end,
            attendee_refs: raw.attendee_refs.clone(),
            is_all_day: raw.is_all_day,
            color_source: raw.color_source.clone(),
            responsibility_sub_events,
        })
    }
}

/// Convert a fetched batch, keeping every well-formed event.
///
/// Returns the admitted events and the errors for the ones left out.
pub fn parse_events(raw: &[RawCalendarEvent]) -> (Vec<CalendarEvent>, Vec<EventError>) {
    let mut events = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();
    for item in raw {
        match CalendarEvent::try_from(item) {
            Ok(event) => events.push(event),
            Err(err) => {
                log::warn!("Excluding event from layout: {}", err);
                errors.push(err);
            }
        }
    }
    (events, errors)
}

/// Inclusive minute range `[first, last]` for a wall-clock interval.
///
/// Every minute the half-open interval touches is claimed, so intervals that
/// overlap by any amount share a tick. Zero-length intervals still occupy
/// their start minute.
pub fn minute_range(start: NaiveDateTime, end: NaiveDateTime, epoch: NaiveDate) -> (i64, i64) {
    let first = minute_index(start, epoch);
    let last = (minute_index_ceil(end, epoch) - 1).max(first);
    (first, last)
}

/// Inclusive day-index range covered by a wall-clock interval.
///
/// An end exactly at midnight does not claim that day.
pub fn day_range(start: NaiveDateTime, end: NaiveDateTime, epoch: NaiveDate) -> (i64, i64) {
    let first = day_index_for(start.date(), epoch);
    let end_day = day_index_for(end.date(), epoch);
    let ends_at_midnight = end.num_seconds_from_midnight() == 0 && end.nanosecond() == 0;
    let last = if ends_at_midnight && end > start {
        end_day - 1
    } else {
        end_day
    };
    (first, last.max(first))
}

impl CalendarEvent {
    /// Create a timed event with required fields
    ///
    /// # Examples
    /// ```
    /// use family_calendar::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap().and_hms_opt(10, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = CalendarEvent::new("standup", start, end).unwrap();
    /// assert_eq!(event.duration(), chrono::Duration::hours(1));
    /// ```
    pub fn new(
        id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EventError::MissingId);
        }
        if end < start {
            return Err(EventError::EndBeforeStart { event_id: id });
        }
        Ok(Self {
            id,
            title: String::new(),
            start,
            end,
            attendee_refs: Vec::new(),
            is_all_day: false,
            color_source: None,
            responsibility_sub_events: Vec::new(),
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_attendees<I, S>(mut self, attendees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attendee_refs = attendees.into_iter().map(Into::into).collect();
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.is_all_day = all_day;
        self
    }

    pub fn with_color_source(mut self, color: impl Into<String>) -> Self {
        self.color_source = Some(color.into());
        self
    }

    pub fn with_responsibility(mut self, sub_event: ResponsibilitySubEvent) -> Self {
        self.responsibility_sub_events.push(sub_event);
        self
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Inclusive minute range relative to `epoch`.
    pub fn minute_range(&self, epoch: NaiveDate) -> (i64, i64) {
        minute_range(self.start, self.end, epoch)
    }

    /// Inclusive day-index range covered by the event.
    ///
    /// An end exactly at midnight does not claim that day.
    pub fn day_range(&self, epoch: NaiveDate) -> (i64, i64) {
        day_range(self.start, self.end, epoch)
    }

    /// True when the event covers more than one calendar day.
    pub fn is_multi_day(&self, epoch: NaiveDate) -> bool {
        let (first, last) = self.day_range(epoch);
        last > first
    }
}
