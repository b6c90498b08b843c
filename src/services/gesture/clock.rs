use crate::models::grid::safe_extent;
use crate::models::settings::PhysicsSettings;

/// Converts variable frame times into a whole number of fixed steps.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    hz: f64,
    max_steps_per_tick: u32,
    accumulator: f64,
}

impl FixedStep {
    pub fn new(settings: &PhysicsSettings) -> Self {
        Self {
            hz: safe_extent(settings.step_hz),
            max_steps_per_tick: settings.max_steps_per_tick.max(1),
            accumulator: 0.0,
        }
    }

    pub fn hz(&self) -> f64 {
        self.hz
    }

    /// Length of one step in seconds.
    pub fn step_secs(&self) -> f64 {
        1.0 / self.hz
    }

    /// Steps owed for `dt` seconds. Time beyond the per-tick cap is dropped.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt;
        let owed = (self.accumulator * self.hz).floor();
        if owed >= f64::from(self.max_steps_per_tick) {
            self.accumulator = 0.0;
            return self.max_steps_per_tick;
        }
        let steps = owed as u32;
        self.accumulator -= f64::from(steps) / self.hz;
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
