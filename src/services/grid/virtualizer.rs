//! Windowing of the unbounded day/hour grid.
//!
//! The window always covers the viewport body at any fractional scroll offset:
//! `count = ceil(body / cell) + 1 + 2 * buffer`, starting `buffer` cells before
//! the cell under the top-left corner. Cells keep fixed local coordinates and
//! only the container is translated.

use crate::models::grid::{ContainerOffset, GridGeometry, GridWindow, ScrollPosition};
use crate::models::settings::MAX_BUFFER_CELLS;

/// Upper bound on cells along one axis, reached only with sub-pixel cells.
const MAX_AXIS_CELLS: f64 = 100_000.0;

fn axis_count(body: f64, cell: f64, buffer: u32) -> u32 {
    let visible = (body / cell).ceil().min(MAX_AXIS_CELLS) as u32;
    visible + 1 + 2 * buffer.min(MAX_BUFFER_CELLS)
}

/// Cells to materialize for `position`. Empty when the viewport body is collapsed.
pub fn visible_window(
    position: ScrollPosition,
    geometry: &GridGeometry,
    buffer_cells: u32,
) -> GridWindow {
    let buffer_cells = buffer_cells.min(MAX_BUFFER_CELLS);
    let buffer = i64::from(buffer_cells);
    let first_row = position.row.floor() as i64 - buffer;
    let first_col = position.col.floor() as i64 - buffer;

    if geometry.is_degenerate() {
        return GridWindow {
            first_row,
            first_col,
            row_count: 0,
            col_count: 0,
        };
    }

    GridWindow {
        first_row,
        first_col,
        row_count: axis_count(geometry.body_height(), geometry.cell_height(), buffer_cells),
        col_count: axis_count(geometry.body_width(), geometry.cell_width(), buffer_cells),
    }
}

/// Container translation that aligns the window's fixed cells with `position`.
pub fn container_offset(
    window: &GridWindow,
    position: ScrollPosition,
    geometry: &GridGeometry,
) -> ContainerOffset {
    ContainerOffset {
        x: (window.first_col as f64 - position.col) * geometry.cell_width(),
        y: (window.first_row as f64 - position.row) * geometry.cell_height(),
    }
}

/// True when every pixel of the body is backed by a cell of `window`.
pub fn covers(window: &GridWindow, position: ScrollPosition, geometry: &GridGeometry) -> bool {
    if geometry.is_degenerate() {
        return true;
    }
    let bottom = position.row + geometry.body_height() / geometry.cell_height();
    let right = position.col + geometry.body_width() / geometry.cell_width();
    window.first_row as f64 <= position.row
        && window.first_col as f64 <= position.col
        && window.end_row() as f64 >= bottom
        && window.end_col() as f64 >= right
}
