use log::{debug, trace};

use super::axis::AxisDrag;
use super::clock::FixedStep;
use super::momentum::Momentum;
use super::snap::snap_target;
use super::spring::Spring;
use crate::models::grid::{safe_extent, ScrollPosition, HOURS_PER_DAY};
use crate::models::settings::{GridSettings, PhysicsSettings, SnapSettings, SpringSettings};

/// Tunables for the gesture engine, taken from [`GridSettings`].
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub physics: PhysicsSettings,
    pub spring: SpringSettings,
    pub snap: SnapSettings,
    pub normalize_rows: bool,
}

impl PhysicsConfig {
    pub fn from_settings(settings: &GridSettings) -> Self {
        Self {
            physics: settings.physics.clone(),
            spring: settings.spring.clone(),
            snap: settings.snap.clone(),
            normalize_rows: settings.grid.normalize_rows,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::from_settings(&GridSettings::default())
    }
}

/// Output of the engine. `Moved` is a live update, `Settled` is a commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    Moved(ScrollPosition),
    Settled(ScrollPosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Settling,
}

#[derive(Debug, Clone)]
struct DragSession {
    origin: ScrollPosition,
    row: AxisDrag,
    col: AxisDrag,
    col_cell: f64,
}

#[derive(Debug, Clone)]
enum Vertical {
    Momentum(Momentum),
    Spring(Spring),
}

impl Vertical {
    fn is_at_rest(&self) -> bool {
        match self {
            Vertical::Momentum(momentum) => momentum.is_at_rest(),
            Vertical::Spring(spring) => spring.is_at_rest(),
        }
    }

    fn shift(&mut self, delta: f64) {
        if let Vertical::Spring(spring) = self {
            spring.shift(delta);
        }
    }

    fn force_rest(&mut self) {
        match self {
            Vertical::Momentum(momentum) => momentum.stop(),
            Vertical::Spring(spring) => spring.snap_to_target(),
        }
    }
}

#[derive(Debug, Clone)]
struct Settle {
    vertical: Vertical,
    horizontal: Spring,
    steps: u32,
}

impl Settle {
    fn is_at_rest(&self) -> bool {
        self.vertical.is_at_rest() && self.horizontal.is_at_rest()
    }

    /// Final resting position with both springs exactly on target.
    fn resting_position(&self, live: ScrollPosition) -> ScrollPosition {
        let row = match &self.vertical {
            Vertical::Momentum(_) => live.row,
            Vertical::Spring(spring) => spring.target(),
        };
        ScrollPosition::new(row, self.horizontal.target())
    }
}

#[derive(Debug, Clone)]
enum Motion {
    Idle,
    Dragging(DragSession),
    Settling(Settle),
}

/// Turns drags and releases into scroll positions.
///
/// Dragging maps translation straight onto the grid. Releasing hands off to
/// momentum on the vertical axis and a snapping spring on the horizontal
/// axis, both advanced on a fixed step by [`tick`](Self::tick).
#[derive(Debug, Clone)]
pub struct GesturePhysicsEngine {
    config: PhysicsConfig,
    cell_width: f64,
    cell_height: f64,
    position: ScrollPosition,
    motion: Motion,
    clock: FixedStep,
}

impl GesturePhysicsEngine {
    pub fn new(
        config: PhysicsConfig,
        cell_width: f64,
        cell_height: f64,
        position: ScrollPosition,
    ) -> Self {
        let position = if config.normalize_rows {
            position.normalized()
        } else {
            position
        };
        Self {
            clock: FixedStep::new(&config.physics),
            config,
            cell_width: safe_extent(cell_width),
            cell_height: safe_extent(cell_height),
            position,
            motion: Motion::Idle,
        }
    }

    pub fn set_cell_size(&mut self, cell_width: f64, cell_height: f64) {
        self.cell_width = safe_extent(cell_width);
        self.cell_height = safe_extent(cell_height);
    }

    /// Live position, including any in-flight drag or animation.
    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    pub fn phase(&self) -> GesturePhase {
        match self.motion {
            Motion::Idle => GesturePhase::Idle,
            Motion::Dragging(_) => GesturePhase::Dragging,
            Motion::Settling(_) => GesturePhase::Settling,
        }
    }

    /// Start a drag from the live position, interrupting any animation.
    pub fn begin_drag(&mut self) -> ScrollPosition {
        if matches!(self.motion, Motion::Settling(_)) {
            debug!("Drag interrupted settle at {:?}", self.position);
        }
        self.clock.reset();
        self.motion = Motion::Dragging(DragSession {
            origin: self.position,
            row: AxisDrag::new(self.position.row, self.cell_height),
            col: AxisDrag::new(self.position.col, self.cell_width),
            col_cell: self.position.col.floor(),
        });
        self.position
    }

    /// Apply the cumulative drag translation in pixels.
    ///
    /// Returns `None` when no drag is active.
    pub fn drag_to(&mut self, dx: f64, dy: f64) -> Option<ScrollPosition> {
        let Motion::Dragging(session) = &mut self.motion else {
            return None;
        };
        if !dx.is_finite() || !dy.is_finite() {
            return Some(self.position);
        }

        let mut position = ScrollPosition::new(session.row.position(dy), session.col.position(dx));

        if self.config.normalize_rows {
            let days = position.day_carry();
            if days != 0 {
                position = position.shifted_by_days(days);
                session.row.shift(-((days * HOURS_PER_DAY) as f64));
                session.col.shift(days as f64);
                session.origin = session.origin.shifted_by_days(days);
                session.col_cell = position.col.floor();
                trace!("Drag folded {} day(s) into the column axis", days);
            }
        }

        let cell = position.col.floor();
        if cell != session.col_cell {
            session.col.reanchor(position.col, dx);
            session.col_cell = cell;
        }

        self.position = position;
        Some(position)
    }

    /// End the drag with a release velocity in pixels per second.
    pub fn release(&mut self, vx: f64, vy: f64) -> Vec<PhysicsEvent> {
        let Motion::Dragging(session) = &self.motion else {
            return Vec::new();
        };

        let col_velocity = finite_or_zero(-vx / self.cell_width);
        let row_velocity = finite_or_zero(-vy / self.cell_height) / self.clock.hz();

        let target = snap_target(
            self.position.col,
            session.origin.col,
            col_velocity,
            &self.config.snap,
        );
        debug!(
            "Release at {:?}: column target {}, row velocity {:.4}/step",
            self.position, target, row_velocity
        );

        let settle = Settle {
            vertical: Vertical::Momentum(Momentum::new(
                row_velocity,
                self.config.physics.friction,
                self.config.physics.epsilon,
            )),
            horizontal: Spring::new(
                self.position.col,
                col_velocity,
                target,
                self.config.spring.clone(),
            ),
            steps: 0,
        };
        self.start_settle(settle)
    }

    /// Release with no velocity.
    pub fn cancel_drag(&mut self) -> Vec<PhysicsEvent> {
        self.release(0.0, 0.0)
    }

    /// Advance any running animation by `dt` seconds of wall time.
    pub fn tick(&mut self, dt: f64) -> Vec<PhysicsEvent> {
        let Motion::Settling(settle) = &mut self.motion else {
            return Vec::new();
        };
        let steps = self.clock.advance(dt);
        let h = self.clock.step_secs();

        let mut moved = false;
        let mut done = settle.is_at_rest();
        for _ in 0..steps {
            if done {
                break;
            }
            advance(settle, &mut self.position, &self.config, h);
            moved = true;
            done = settle.is_at_rest();
        }

        let mut events = Vec::new();
        if moved {
            events.push(PhysicsEvent::Moved(self.position));
        }
        if done {
            self.position = settle.resting_position(self.position);
            events.push(self.finish());
        }
        events
    }

    /// Move to `target` immediately.
    pub fn jump_to(&mut self, target: ScrollPosition) -> PhysicsEvent {
        self.position = if self.config.normalize_rows {
            target.normalized()
        } else {
            target
        };
        self.finish()
    }

    /// Spring both axes from the live position to `target`.
    pub fn animate_to(&mut self, target: ScrollPosition) -> Vec<PhysicsEvent> {
        let settle = Settle {
            vertical: Vertical::Spring(Spring::new(
                self.position.row,
                0.0,
                target.row,
                self.config.spring.clone(),
            )),
            horizontal: Spring::new(self.position.col, 0.0, target.col, self.config.spring.clone()),
            steps: 0,
        };
        self.start_settle(settle)
    }

    /// Drop any gesture or animation without emitting events.
    pub fn halt(&mut self) {
        self.motion = Motion::Idle;
        self.clock.reset();
    }

    fn start_settle(&mut self, settle: Settle) -> Vec<PhysicsEvent> {
        self.clock.reset();
        if settle.is_at_rest() {
            self.position = settle.resting_position(self.position);
            return vec![self.finish()];
        }
        self.motion = Motion::Settling(settle);
        Vec::new()
    }

    fn finish(&mut self) -> PhysicsEvent {
        self.motion = Motion::Idle;
        self.clock.reset();
        if self.config.normalize_rows {
            self.position = self.position.normalized();
        }
        debug!("Settled at {:?}", self.position);
        PhysicsEvent::Settled(self.position)
    }
}

fn advance(settle: &mut Settle, position: &mut ScrollPosition, config: &PhysicsConfig, h: f64) {
    match &mut settle.vertical {
        Vertical::Momentum(momentum) => position.row += momentum.step(),
        Vertical::Spring(spring) => {
            spring.step(h);
            position.row = spring.position();
        }
    }
    settle.horizontal.step(h);
    position.col = settle.horizontal.position();

    if config.normalize_rows {
        let days = position.day_carry();
        if days != 0 {
            *position = position.shifted_by_days(days);
            settle.horizontal.shift(days as f64);
            settle.vertical.shift(-((days * HOURS_PER_DAY) as f64));
        }
    }

    settle.steps += 1;
    if settle.steps >= config.physics.max_settle_steps {
        debug!("Settle hit the step limit, forcing rest");
        settle.vertical.force_rest();
        settle.horizontal.snap_to_target();
        *position = settle.resting_position(*position);
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
