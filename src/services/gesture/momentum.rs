/// Friction is kept strictly inside `(0, 1)` so decay always terminates.
const MIN_FRICTION: f64 = 1e-6;
const MAX_FRICTION: f64 = 1.0 - 1e-6;

/// Exponential velocity decay on the continuous axis.
///
/// Each step moves by the current velocity, then `velocity *= friction`.
/// Motion stops once `|velocity| < epsilon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    velocity: f64,
    friction: f64,
    epsilon: f64,
}

impl Momentum {
    /// `velocity` is in units per step.
    pub fn new(velocity: f64, friction: f64, epsilon: f64) -> Self {
        let friction = if friction.is_finite() {
            friction.clamp(MIN_FRICTION, MAX_FRICTION)
        } else {
            MAX_FRICTION
        };
        Self {
            velocity: if velocity.is_finite() { velocity } else { 0.0 },
            friction,
            epsilon: if epsilon.is_finite() && epsilon > 0.0 {
                epsilon
            } else {
                f64::EPSILON
            },
        }
    }

    /// Advance one step and return the displacement it produced.
    pub fn step(&mut self) -> f64 {
        if self.is_at_rest() {
            return 0.0;
        }
        let displacement = self.velocity;
        self.velocity *= self.friction;
        displacement
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity.abs() < self.epsilon
    }

    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Where the remaining motion would come to rest if run to the limit.
    pub fn projected_displacement(&self) -> f64 {
        momentum_displacement(self.velocity, self.friction)
    }
}

/// Closed-form total displacement of `v0` decaying by `friction` per step.
pub fn momentum_displacement(v0: f64, friction: f64) -> f64 {
    v0 / (1.0 - friction)
}

/// Run a decay to rest; returns `(steps, total displacement)`.
pub fn simulate(v0: f64, friction: f64, epsilon: f64) -> (u64, f64) {
    let mut momentum = Momentum::new(v0, friction, epsilon);
    let mut steps = 0;
    let mut total = 0.0;
    while !momentum.is_at_rest() {
        total += momentum.step();
        steps += 1;
    }
    (steps, total)
}
