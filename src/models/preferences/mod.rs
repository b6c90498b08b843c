// Layer preferences module
// Per-attendee visibility and colour overrides for a family group

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::event::CalendarEvent;

/// Visibility and colour for one attendee's layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendeeLayer {
    pub visible: bool,
    pub color_override: Option<String>,
}

impl Default for AttendeeLayer {
    fn default() -> Self {
        Self {
            visible: true,
            color_override: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerPreferences {
    pub layers: HashMap<String, AttendeeLayer>,
}

impl LayerPreferences {
    pub fn layer(&self, attendee_ref: &str) -> Option<&AttendeeLayer> {
        self.layers.get(attendee_ref)
    }

    pub fn is_attendee_visible(&self, attendee_ref: &str) -> bool {
        self.layer(attendee_ref).map(|l| l.visible).unwrap_or(true)
    }

    /// An event is hidden only when it has attendees and every one is hidden.
    pub fn is_event_visible(&self, event: &CalendarEvent) -> bool {
        event.attendee_refs.is_empty()
            || event
                .attendee_refs
                .iter()
                .any(|attendee| self.is_attendee_visible(attendee))
    }

    /// First visible attendee override wins, then the event's own colour source.
    pub fn resolve_color<'a>(&'a self, event: &'a CalendarEvent) -> Option<&'a str> {
        event
            .attendee_refs
            .iter()
            .filter_map(|attendee| self.layer(attendee))
            .filter(|layer| layer.visible)
            .find_map(|layer| layer.color_override.as_deref())
            .or(event.color_source.as_deref())
    }

    /// Events that survive the visibility filter.
    pub fn visible_events<'a>(
        &'a self,
        events: &'a [CalendarEvent],
    ) -> impl Iterator<Item = &'a CalendarEvent> + 'a {
        events.iter().filter(move |event| self.is_event_visible(event))
    }
}
