//! Live resolution of the probed (day, hour) plus the change highlight.

use crate::models::grid::{GridGeometry, ProbeTarget, ScrollPosition};
use crate::models::layout::HighlightState;

use super::mapper::to_probe_target;

/// Self-terminating linear decay started whenever the probed cell changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightPulse {
    duration: f64,
    fired_at: Option<f64>,
}

impl HighlightPulse {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration: if duration_secs.is_finite() {
                duration_secs.max(0.0)
            } else {
                0.0
            },
            fired_at: None,
        }
    }

    /// Start (or restart) the pulse at clock time `now`.
    pub fn fire(&mut self, now: f64) {
        self.fired_at = Some(now);
    }

    pub fn intensity(&self, now: f64) -> f64 {
        match self.fired_at {
            Some(fired_at) if self.duration > 0.0 => {
                let elapsed = (now - fired_at).max(0.0);
                (1.0 - elapsed / self.duration).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn is_active(&self, now: f64) -> bool {
        self.intensity(now) > 0.0
    }
}

/// Resolves the probe on every scroll change and tracks the previous result.
#[derive(Debug, Clone)]
pub struct ProbeResolver {
    last: Option<ProbeTarget>,
    pulse: HighlightPulse,
}

impl ProbeResolver {
    pub fn new(highlight_duration_secs: f64) -> Self {
        Self {
            last: None,
            pulse: HighlightPulse::new(highlight_duration_secs),
        }
    }

    /// Resolve the probe at `position`; fires the pulse when the cell changed.
    pub fn resolve(
        &mut self,
        position: ScrollPosition,
        geometry: &GridGeometry,
        now: f64,
    ) -> ProbeTarget {
        let target = to_probe_target(position, geometry);
        self.observe(target, now);
        target
    }

    /// Record an externally derived target (month mode).
    pub fn observe(&mut self, target: ProbeTarget, now: f64) {
        if let Some(previous) = self.last {
            if previous != target {
                log::trace!(
                    "Probe moved from day {} {:02}:00 to day {} {:02}:00",
                    previous.day_index,
                    previous.hour,
                    target.day_index,
                    target.hour
                );
                self.pulse.fire(now);
            }
        }
        self.last = Some(target);
    }

    pub fn last(&self) -> Option<ProbeTarget> {
        self.last
    }

    pub fn highlight(&self, now: f64) -> HighlightState {
        let intensity = self.pulse.intensity(now);
        HighlightState {
            target: self.last.filter(|_| intensity > 0.0),
            intensity,
        }
    }
}
