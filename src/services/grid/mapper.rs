//! Conversions between scroll coordinates and (day, hour) targets.
//!
//! Everything here is a pure function of primitives and geometry so it can run
//! inside the animation pass. The probe is always placed on the centre of the
//! target cell, which keeps `to_probe_target(to_scroll(h, d)) == (d, h)` exact.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::grid::{GridGeometry, ProbeTarget, ScrollPosition, HOURS_PER_DAY};
use crate::utils::date::hour_offset;

/// Scroll position that puts the probe over `(day_index, hour)`.
///
/// Hours past 23 carry into following days.
pub fn to_scroll(hour: u32, day_index: i64, geometry: &GridGeometry) -> ScrollPosition {
    let target = ProbeTarget::new(day_index, hour);
    let (probe_rows, probe_cols) = geometry.probe_offset_cells();
    ScrollPosition::new(
        f64::from(target.hour) + 0.5 - probe_rows,
        target.day_index as f64 + 0.5 - probe_cols,
    )
}

/// Probe lands half a minute into the target minute, away from the floor boundary.
const HALF_MINUTE_HOURS: f64 = 0.5 / 60.0;

/// Scroll position that puts the probe on `datetime` (minute precision on the row axis).
pub fn to_scroll_at(
    datetime: NaiveDateTime,
    epoch: NaiveDate,
    geometry: &GridGeometry,
) -> ScrollPosition {
    let hours = hour_offset(datetime, epoch);
    let day = hours.div_euclid(HOURS_PER_DAY as f64);
    let hour_of_day = hours - day * HOURS_PER_DAY as f64;
    let (probe_rows, probe_cols) = geometry.probe_offset_cells();
    ScrollPosition::new(
        hour_of_day + HALF_MINUTE_HOURS - probe_rows,
        day + 0.5 - probe_cols,
    )
}

/// The (day, hour) under the probe for a scroll position.
pub fn to_probe_target(position: ScrollPosition, geometry: &GridGeometry) -> ProbeTarget {
    let (probe_rows, probe_cols) = geometry.probe_offset_cells();
    let absolute_row = (position.row + probe_rows).floor() as i64;
    let absolute_col = (position.col + probe_cols).floor() as i64;
    ProbeTarget {
        day_index: absolute_col + absolute_row.div_euclid(HOURS_PER_DAY),
        hour: absolute_row.rem_euclid(HOURS_PER_DAY) as u32,
    }
}
