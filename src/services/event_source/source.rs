use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::event::RawCalendarEvent;
use crate::models::preferences::LayerPreferences;

/// The group event store. Implementations may block; callers fetch off the
/// frame loop.
#[cfg_attr(test, mockall::automock)]
pub trait EventSource: Send + Sync {
    /// Every event of the group, already expanded.
    fn fetch_group_events(&self, group_id: &str) -> Result<Vec<RawCalendarEvent>>;

    fn fetch_layer_preferences(&self, group_id: &str) -> Result<LayerPreferences>;
}

/// On-disk form read by [`JsonEventSource`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDocument {
    /// When set, the document only answers for this group.
    pub group: Option<String>,
    pub events: Vec<RawCalendarEvent>,
    pub preferences: LayerPreferences,
}

/// Reads one group's events and preferences from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonEventSource {
    path: PathBuf,
}

impl JsonEventSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self, group_id: &str) -> Result<EventDocument> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read events from {}", self.path.display()))?;
        let document: EventDocument = serde_json::from_str(&data).with_context(|| {
            format!("failed to deserialize events from {}", self.path.display())
        })?;

        match &document.group {
            Some(group) if group != group_id => Err(anyhow!(
                "{} holds group {}, not {}",
                self.path.display(),
                group,
                group_id
            )),
            _ => Ok(document),
        }
    }
}

impl EventSource for JsonEventSource {
    fn fetch_group_events(&self, group_id: &str) -> Result<Vec<RawCalendarEvent>> {
        Ok(self.load(group_id)?.events)
    }

    fn fetch_layer_preferences(&self, group_id: &str) -> Result<LayerPreferences> {
        Ok(self.load(group_id)?.preferences)
    }
}
