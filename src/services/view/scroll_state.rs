use std::sync::mpsc::{self, Receiver, Sender};

use crate::models::grid::ScrollPosition;

/// One publication of the scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    pub position: ScrollPosition,
    /// True for commits after a settle or jump, false for live updates.
    pub settled: bool,
    pub sequence: u64,
}

/// The single authoritative scroll position of a view.
///
/// Writers publish through [`publish`](Self::publish); readers either query
/// it directly or subscribe for a stream of updates.
#[derive(Debug)]
pub struct ScrollState {
    position: ScrollPosition,
    settled: ScrollPosition,
    sequence: u64,
    subscribers: Vec<Sender<ScrollUpdate>>,
}

impl ScrollState {
    pub fn new(position: ScrollPosition) -> Self {
        let position = ScrollPosition::new(position.row, position.col);
        Self {
            position,
            settled: position,
            sequence: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    /// Last committed position.
    pub fn settled(&self) -> ScrollPosition {
        self.settled
    }

    pub fn subscribe(&mut self) -> Receiver<ScrollUpdate> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, position: ScrollPosition, settled: bool) -> ScrollUpdate {
        let position = ScrollPosition::new(position.row, position.col);
        self.position = position;
        if settled {
            self.settled = position;
        }
        self.sequence += 1;

        let update = ScrollUpdate {
            position,
            settled,
            sequence: self.sequence,
        };
        // Dropped receivers unsubscribe themselves.
        self.subscribers.retain(|tx| tx.send(update).is_ok());
        update
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }
}
