// Month module
// Whole-month pages for the month view

use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::date::{add_months, day_index_for, days_in_month, month_grid_start};

pub const WEEKS_PER_PAGE: u32 = 6;
pub const DAYS_PER_WEEK: i64 = 7;

/// A materialized month page. `page_offset` counts months from the view's anchor month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthPage {
    pub year: i32,
    pub month: u32,
    pub page_offset: i64,
    /// Day index of the top-left cell of the 6x7 grid.
    pub grid_start_day: i64,
}

impl MonthPage {
    pub fn new(
        anchor: (i32, u32),
        page_offset: i64,
        first_day_of_week: u8,
        epoch: NaiveDate,
    ) -> Option<Self> {
        let (year, month) = add_months(anchor.0, anchor.1, page_offset);
        let start = month_grid_start(year, month, first_day_of_week)?;
        Some(Self {
            year,
            month,
            page_offset,
            grid_start_day: day_index_for(start, epoch),
        })
    }

    pub fn first_of_month(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn day_count(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Day index of the last grid cell.
    pub fn grid_end_day(&self) -> i64 {
        self.grid_start_day + i64::from(WEEKS_PER_PAGE) * DAYS_PER_WEEK - 1
    }

    /// Day index of the first day of each week row.
    pub fn week_starts(&self) -> impl Iterator<Item = i64> + '_ {
        (0..i64::from(WEEKS_PER_PAGE)).map(move |week| self.grid_start_day + week * DAYS_PER_WEEK)
    }
}
