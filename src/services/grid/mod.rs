// Grid service module
// Coordinate mapping, probe resolution and virtualization for the day grid

pub mod mapper;
pub mod probe;
pub mod virtualizer;

pub use mapper::{to_probe_target, to_scroll, to_scroll_at};
pub use probe::{HighlightPulse, ProbeResolver};
pub use virtualizer::{container_offset, covers, visible_window};
