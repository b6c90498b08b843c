// Layout service module
// Scan-line lane assignment for the day and month views

pub mod day;
pub mod month;
pub mod scan_line;

pub use day::{layout_day, layout_window_minutes, place_all_day, place_timed};
pub use month::{layout_month_page, layout_week};
pub use scan_line::{assign_lanes, LayoutInterval};
