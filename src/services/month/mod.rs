// Month service module
// Whole-month paging for the month view

pub mod pager;

pub use pager::{MonthGridVirtualizer, PageEvent};
