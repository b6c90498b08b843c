// Layout module
// Lane assignments and render-ready frames produced by the grid engine

use serde::Serialize;

use crate::models::grid::{ContainerOffset, GridCell, GridWindow, ProbeTarget};
use crate::models::month::MonthPage;
use crate::models::view::ViewMode;

/// Lane assignment for one event in one layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventLayoutSlot {
    pub event_id: String,
    pub lane: u32,
    pub max_lanes: u32,
    pub lanes_spanned: u32,
}

impl EventLayoutSlot {
    /// Horizontal (day view) or vertical (month view) share, as `(offset, extent)` in `[0, 1]`.
    pub fn fraction(&self) -> (f64, f64) {
        let lanes = f64::from(self.max_lanes.max(1));
        (
            f64::from(self.lane) / lanes,
            f64::from(self.lanes_spanned.max(1)) / lanes,
        )
    }
}

/// A slot together with the inclusive tick range it was laid out over.
///
/// Ticks are minutes since epoch midnight for timed lanes and day indices for
/// day-granular lanes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneAssignment {
    pub slot: EventLayoutSlot,
    pub first: i64,
    pub last: i64,
}

/// Which lane family a slot belongs to. The families never share lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LaneKind {
    Event,
    Responsibility,
}

/// Result of one day-view layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayLayout {
    /// Minute ticks.
    pub events: Vec<LaneAssignment>,
    /// Minute ticks, separate lane space.
    pub responsibilities: Vec<LaneAssignment>,
    /// Day ticks; lanes are header rows.
    pub all_day: Vec<LaneAssignment>,
}

impl DayLayout {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.responsibilities.is_empty() && self.all_day.is_empty()
    }
}

/// One event placed in one visible column, in grid rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPlacement {
    pub kind: LaneKind,
    pub slot: EventLayoutSlot,
    /// Absolute grid column the block is drawn in.
    pub col: i64,
    /// Fractional rows, in the same coordinates as `GridCell::row`.
    pub row_start: f64,
    pub row_end: f64,
}

/// An all-day or multi-day bar spanning one or more days of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBar {
    pub kind: LaneKind,
    pub slot: EventLayoutSlot,
    pub first_day: i64,
    pub last_day: i64,
}

/// One week row of a month page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekLayout {
    pub first_day_index: i64,
    pub bars: Vec<DayBar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthPageLayout {
    pub page: MonthPage,
    pub weeks: Vec<WeekLayout>,
}

/// Cosmetic pulse shown when the probed cell changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HighlightState {
    pub target: Option<ProbeTarget>,
    /// 1.0 right after the change, decaying to 0.0.
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayFrame {
    pub window: GridWindow,
    pub visible_cells: Vec<GridCell>,
    pub container_offset: ContainerOffset,
    pub placements: Vec<EventPlacement>,
    pub all_day: Vec<DayBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthFrame {
    /// Pages intersecting the viewport, leftmost first.
    pub pages: Vec<MonthPage>,
    /// Horizontal translation of the first page, in page widths.
    pub page_translate: f64,
    pub layouts: Vec<MonthPageLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FrameContent {
    Day(DayFrame),
    Month(MonthFrame),
    /// Degenerate viewport or torn-down view.
    Empty,
}

/// Everything the UI layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub mode: ViewMode,
    pub probe_target: ProbeTarget,
    pub highlight: HighlightState,
    pub content: FrameContent,
}
