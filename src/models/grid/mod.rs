// Grid module
// Scroll coordinates, probe targets and viewport geometry for the temporal grid

use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: i64 = 24;

/// Smallest extent (in pixels) accepted as a denominator.
pub const MIN_EXTENT: f64 = 1.0;

/// Clamp a pixel extent so it can safely divide.
pub fn safe_extent(value: f64) -> f64 {
    if value.is_finite() && value >= MIN_EXTENT {
        value
    } else {
        MIN_EXTENT
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Continuous scroll coordinate. `row` counts hours, `col` counts days.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub row: f64,
    pub col: f64,
}

impl ScrollPosition {
    /// Non-finite components are replaced with zero.
    pub fn new(row: f64, col: f64) -> Self {
        Self {
            row: finite_or_zero(row),
            col: finite_or_zero(col),
        }
    }

    /// Fold `row` into `[0, 24)`, carrying whole days into `col`.
    ///
    /// `(row, col)` and `(row - 24, col + 1)` show identical content, so this
    /// only changes the representation.
    pub fn normalized(self) -> Self {
        let days = self.day_carry();
        self.shifted_by_days(days)
    }

    /// Whole days the row lies outside `[0, 24)`.
    pub fn day_carry(&self) -> i64 {
        let hours = HOURS_PER_DAY as f64;
        let days = (self.row / hours).floor();
        // Rounding can leave the folded row at exactly 24 or just below 0.
        let folded = self.row - days * hours;
        if folded >= hours {
            days as i64 + 1
        } else if folded < 0.0 {
            days as i64 - 1
        } else {
            days as i64
        }
    }

    /// Move `days` whole days from the row axis into the column axis.
    pub fn shifted_by_days(self, days: i64) -> Self {
        if days == 0 {
            return self;
        }
        Self::new(
            self.row - (days * HOURS_PER_DAY) as f64,
            self.col + days as f64,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.row.is_finite() && self.col.is_finite()
    }
}

/// The (day, hour) cell currently under the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProbeTarget {
    pub day_index: i64,
    pub hour: u32,
}

impl ProbeTarget {
    /// Hours beyond 23 carry into the day index.
    pub fn new(day_index: i64, hour: u32) -> Self {
        Self {
            day_index: day_index + i64::from(hour / 24),
            hour: hour % 24,
        }
    }
}

/// A materialized grid cell. `row`/`col` are absolute grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub day_index: i64,
    pub hour: u32,
    pub row: i64,
    pub col: i64,
}

impl GridCell {
    pub fn at(row: i64, col: i64) -> Self {
        Self {
            day_index: col + row.div_euclid(HOURS_PER_DAY),
            hour: row.rem_euclid(HOURS_PER_DAY) as u32,
            row,
            col,
        }
    }
}

/// Where the probe sits, relative to the top-left of the grid body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeAnchor {
    /// Horizontal offset in cells from the body's left edge.
    pub column_cells: f64,
    /// Vertical offset as a fraction of the body height.
    pub row_fraction: f64,
}

impl Default for ProbeAnchor {
    fn default() -> Self {
        Self {
            column_cells: 0.5,
            row_fraction: 0.3,
        }
    }
}

/// Pixel geometry of a calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub cell_width: f64,
    pub cell_height: f64,
    /// Width of the hour label gutter on the left.
    pub header_width: f64,
    /// Height of the day header strip on top.
    pub header_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub probe: ProbeAnchor,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_width: 120.0,
            cell_height: 48.0,
            header_width: 56.0,
            header_height: 32.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            probe: ProbeAnchor::default(),
        }
    }
}

impl GridGeometry {
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn cell_width(&self) -> f64 {
        safe_extent(self.cell_width)
    }

    pub fn cell_height(&self) -> f64 {
        safe_extent(self.cell_height)
    }

    /// Width of the scrollable body, zero when collapsed.
    pub fn body_width(&self) -> f64 {
        finite_or_zero(self.viewport_width - finite_or_zero(self.header_width)).max(0.0)
    }

    /// Height of the scrollable body, zero when collapsed.
    pub fn body_height(&self) -> f64 {
        finite_or_zero(self.viewport_height - finite_or_zero(self.header_height)).max(0.0)
    }

    pub fn is_degenerate(&self) -> bool {
        self.body_width() <= 0.0 || self.body_height() <= 0.0
    }

    /// Probe offset from the body's top-left, in (rows, cols).
    pub fn probe_offset_cells(&self) -> (f64, f64) {
        let fraction = finite_or_zero(self.probe.row_fraction).clamp(0.0, 1.0);
        let rows = fraction * self.body_height() / self.cell_height();
        let cols = finite_or_zero(self.probe.column_cells);
        (rows, cols)
    }
}

/// Rectangular window of cells to materialize for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GridWindow {
    pub first_row: i64,
    pub first_col: i64,
    pub row_count: u32,
    pub col_count: u32,
}

impl GridWindow {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.col_count == 0
    }

    pub fn end_row(&self) -> i64 {
        self.first_row + i64::from(self.row_count)
    }

    pub fn end_col(&self) -> i64 {
        self.first_col + i64::from(self.col_count)
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (self.first_row..self.end_row()).flat_map(move |row| {
            (self.first_col..self.end_col()).map(move |col| GridCell::at(row, col))
        })
    }

    /// Local top-left pixel of a cell; independent of scroll.
    pub fn local_origin(&self, cell: &GridCell, geometry: &GridGeometry) -> (f64, f64) {
        (
            (cell.col - self.first_col) as f64 * geometry.cell_width(),
            (cell.row - self.first_row) as f64 * geometry.cell_height(),
        )
    }

    /// Range of absolute hours (since epoch midnight) shown by any column.
    pub fn hour_span(&self) -> (i64, i64) {
        let start = self.first_col * HOURS_PER_DAY + self.first_row;
        let end = (self.end_col() - 1).max(self.first_col) * HOURS_PER_DAY + self.end_row();
        (start, end)
    }
}

/// Translation applied to the cell container so cells keep fixed local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ContainerOffset {
    pub x: f64,
    pub y: f64,
}
