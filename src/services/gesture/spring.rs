use crate::models::settings::SpringSettings;

/// Damped spring pulling a scalar toward `target`, integrated with
/// semi-implicit Euler.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    settings: SpringSettings,
}

impl Spring {
    pub fn new(position: f64, velocity: f64, target: f64, settings: SpringSettings) -> Self {
        let mut spring = Self {
            position,
            velocity: if velocity.is_finite() { velocity } else { 0.0 },
            target,
            settings,
        };
        if spring.is_at_rest() {
            spring.snap_to_target();
        }
        spring
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if self.is_at_rest() {
            self.snap_to_target();
            return;
        }
        let mass = self.settings.mass.max(f64::EPSILON);
        let force = -self.settings.stiffness * (self.position - self.target)
            - self.settings.damping * self.velocity;
        self.velocity += force / mass * dt;
        self.position += self.velocity * dt;

        if !self.position.is_finite() || !self.velocity.is_finite() {
            self.snap_to_target();
        } else if self.is_at_rest() {
            self.snap_to_target();
        }
    }

    pub fn is_at_rest(&self) -> bool {
        (self.position - self.target).abs() < self.settings.rest_displacement
            && self.velocity.abs() < self.settings.rest_velocity
    }

    pub fn snap_to_target(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
    }

    /// Translate position and target together.
    pub fn shift(&mut self, delta: f64) {
        self.position += delta;
        self.target += delta;
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}
