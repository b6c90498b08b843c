// Settings module
// Tunables for the temporal grid, stored as TOML

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::grid::{GridGeometry, ProbeAnchor};
use crate::utils::date::default_epoch;

/// Largest accepted `grid.buffer_cells`.
pub const MAX_BUFFER_CELLS: u32 = 64;

/// Largest accepted `layout.margin_days`.
pub const MAX_MARGIN_DAYS: i64 = 366;

/// Largest accepted `month.window_radius`.
pub const MAX_WINDOW_RADIUS: u32 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSection {
    pub cell_width: f64,
    pub cell_height: f64,
    pub header_width: f64,
    pub header_height: f64,
    /// Extra cells materialized on each side of the viewport.
    pub buffer_cells: u32,
    /// Keep the row coordinate folded into `[0, 24)`.
    pub normalize_rows: bool,
    pub highlight_duration_secs: f64,
}

impl Default for GridSection {
    fn default() -> Self {
        let geometry = GridGeometry::default();
        Self {
            cell_width: geometry.cell_width,
            cell_height: geometry.cell_height,
            header_width: geometry.header_width,
            header_height: geometry.header_height,
            buffer_cells: 1,
            normalize_rows: true,
            highlight_duration_secs: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Velocity multiplier per step, strictly between 0 and 1.
    pub friction: f64,
    /// Momentum stops below this many rows per step.
    pub epsilon: f64,
    /// Fixed integration rate.
    pub step_hz: f64,
    pub max_steps_per_tick: u32,
    /// Animations are forced to their target after this many steps.
    pub max_settle_steps: u32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            friction: 0.95,
            epsilon: 0.001,
            step_hz: 60.0,
            max_steps_per_tick: 240,
            max_settle_steps: 1200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringSettings {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub rest_displacement: f64,
    pub rest_velocity: f64,
}

impl Default for SpringSettings {
    fn default() -> Self {
        Self {
            stiffness: 180.0,
            damping: 26.0,
            mass: 1.0,
            rest_displacement: 0.001,
            rest_velocity: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Release speed (cells per second) above which the snap follows the swipe.
    pub velocity_threshold: f64,
    /// Drag distance (cells) above which the snap follows the swipe.
    pub distance_threshold: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            velocity_threshold: 0.5,
            distance_threshold: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthSettings {
    /// Pages materialized on each side of the settled page.
    pub window_radius: u32,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    /// Hour used for the probe while in month mode.
    pub canonical_hour: u32,
}

impl Default for MonthSettings {
    fn default() -> Self {
        Self {
            window_radius: 2,
            first_day_of_week: 0, // Sunday
            canonical_hour: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Let events widen into free lanes to their right.
    pub expand_lanes: bool,
    /// Days laid out beyond the settled window so drags reveal placed events.
    pub margin_days: i64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            expand_lanes: true,
            margin_days: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Day index 0.
    pub epoch: NaiveDate,
    pub grid: GridSection,
    pub probe: ProbeAnchor,
    pub physics: PhysicsSettings,
    pub spring: SpringSettings,
    pub snap: SnapSettings,
    pub month: MonthSettings,
    pub layout: LayoutSettings,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            grid: GridSection::default(),
            probe: ProbeAnchor::default(),
            physics: PhysicsSettings::default(),
            spring: SpringSettings::default(),
            snap: SnapSettings::default(),
            month: MonthSettings::default(),
            layout: LayoutSettings::default(),
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be a positive number", name))
    }
}

impl GridSettings {
    /// Geometry for a viewport of the given size.
    pub fn geometry(&self, viewport_width: f64, viewport_height: f64) -> GridGeometry {
        GridGeometry {
            cell_width: self.grid.cell_width,
            cell_height: self.grid.cell_height,
            header_width: self.grid.header_width,
            header_height: self.grid.header_height,
            viewport_width,
            viewport_height,
            probe: self.probe,
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        positive("grid.cell_width", self.grid.cell_width)?;
        positive("grid.cell_height", self.grid.cell_height)?;
        if !(self.grid.header_width >= 0.0 && self.grid.header_height >= 0.0) {
            return Err("Header sizes cannot be negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.probe.row_fraction) {
            return Err("probe.row_fraction must be between 0 and 1".to_string());
        }
        if !self.probe.column_cells.is_finite() {
            return Err("probe.column_cells must be finite".to_string());
        }
        if !(self.physics.friction > 0.0 && self.physics.friction < 1.0) {
            return Err("physics.friction must be strictly between 0 and 1".to_string());
        }
        positive("physics.epsilon", self.physics.epsilon)?;
        positive("physics.step_hz", self.physics.step_hz)?;
        positive("spring.stiffness", self.spring.stiffness)?;
        positive("spring.mass", self.spring.mass)?;
        if !(self.spring.damping.is_finite() && self.spring.damping >= 0.0) {
            return Err("spring.damping cannot be negative".to_string());
        }
        if self.month.first_day_of_week > 6 {
            return Err("First day of week must be 0-6".to_string());
        }
        if self.month.canonical_hour > 23 {
            return Err("month.canonical_hour must be 0-23".to_string());
        }
        if self.grid.buffer_cells > MAX_BUFFER_CELLS {
            return Err(format!("grid.buffer_cells must be at most {}", MAX_BUFFER_CELLS));
        }
        if !(0..=MAX_MARGIN_DAYS).contains(&self.layout.margin_days) {
            return Err(format!("layout.margin_days must be 0-{}", MAX_MARGIN_DAYS));
        }
        if self.month.window_radius > MAX_WINDOW_RADIUS {
            return Err(format!("month.window_radius must be at most {}", MAX_WINDOW_RADIUS));
        }
        Ok(())
    }
}
