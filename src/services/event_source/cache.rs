use crate::models::event::CalendarEvent;
use crate::models::preferences::LayerPreferences;

/// The event set currently shown. Replaced wholesale on every fetch.
#[derive(Debug, Clone, Default)]
pub struct EventCache {
    group_id: Option<String>,
    events: Vec<CalendarEvent>,
    preferences: LayerPreferences,
    revision: u64,
}

impl EventCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(
        &mut self,
        group_id: impl Into<String>,
        events: Vec<CalendarEvent>,
        preferences: LayerPreferences,
    ) {
        self.group_id = Some(group_id.into());
        self.events = events;
        self.preferences = preferences;
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.group_id = None;
        self.events.clear();
        self.preferences = LayerPreferences::default();
        self.revision += 1;
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn preferences(&self) -> &LayerPreferences {
        &self.preferences
    }

    /// Events not hidden by layer preferences.
    pub fn visible(&self) -> Vec<&CalendarEvent> {
        self.preferences.visible_events(&self.events).collect()
    }

    /// Increments on every replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
