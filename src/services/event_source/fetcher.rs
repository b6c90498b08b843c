use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};

use super::source::EventSource;
use crate::models::event::{parse_events, CalendarEvent};
use crate::models::preferences::LayerPreferences;
use crate::models::view::ViewToken;

/// A group's events after conversion, with the count of rejected records.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedGroup {
    pub events: Vec<CalendarEvent>,
    pub preferences: LayerPreferences,
    pub rejected: usize,
}

/// Result of one background fetch, tagged with the view generation that
/// asked for it.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub token: ViewToken,
    pub group_id: String,
    pub outcome: Result<FetchedGroup, String>,
}

/// Runs [`EventSource`] fetches on worker threads and hands results back
/// over a channel.
pub struct EventFetcher {
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
    in_flight: usize,
}

impl EventFetcher {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn request(&mut self, source: Arc<dyn EventSource>, group_id: &str, token: ViewToken) {
        let tx = self.tx.clone();
        let group_id = group_id.to_string();
        self.in_flight += 1;
        log::debug!("Fetching events for group {}", group_id);

        thread::spawn(move || {
            let outcome =
                fetch_group(source.as_ref(), &group_id).map_err(|err| format!("{:#}", err));
            let _ = tx.send(FetchResult {
                token,
                group_id,
                outcome,
            });
        });
    }

    /// Drain every result that has arrived, without blocking.
    pub fn poll(&mut self) -> Vec<FetchResult> {
        let mut results = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(result) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    results.push(result);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        results
    }

    /// Block until one result arrives. Returns `None` when nothing is in flight.
    pub fn wait(&mut self) -> Option<FetchResult> {
        if self.in_flight == 0 {
            return None;
        }
        let result = self.rx.recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(result)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl Default for EventFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch and convert one group. Malformed events are left out, not fatal.
pub fn fetch_group(source: &dyn EventSource, group_id: &str) -> Result<FetchedGroup> {
    let raw = source
        .fetch_group_events(group_id)
        .with_context(|| format!("Failed to fetch events for group {}", group_id))?;
    let preferences = source
        .fetch_layer_preferences(group_id)
        .with_context(|| format!("Failed to fetch layer preferences for group {}", group_id))?;

    let (events, errors) = parse_events(&raw);
    Ok(FetchedGroup {
        events,
        preferences,
        rejected: errors.len(),
    })
}
