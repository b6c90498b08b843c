// View service module
// Scroll state publication and the calendar view controller

pub mod controller;
pub mod scroll_state;

pub use controller::CalendarViewController;
pub use scroll_state::{ScrollState, ScrollUpdate};
