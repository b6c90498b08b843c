// Property-based tests for the day grid
// Coordinate round trips, virtualization coverage and settle physics

use family_calendar::models::grid::{GridGeometry, ProbeAnchor, ScrollPosition};
use family_calendar::services::gesture::momentum::simulate;
use family_calendar::services::gesture::{
    momentum_displacement, GesturePhase, GesturePhysicsEngine, PhysicsConfig, PhysicsEvent,
};
use family_calendar::services::grid::{covers, to_probe_target, to_scroll, visible_window};
use proptest::prelude::*;

fn geometry_strategy() -> impl Strategy<Value = GridGeometry> {
    (
        10.0..240.0f64,
        10.0..120.0f64,
        0.0..120.0f64,
        0.0..80.0f64,
        200.0..3000.0f64,
        200.0..2000.0f64,
        0.0..=1.0f64,
        0.0..4.0f64,
    )
        .prop_map(
            |(cell_width, cell_height, header_width, header_height, width, height, fraction, cols)| {
                GridGeometry {
                    cell_width,
                    cell_height,
                    header_width,
                    header_height,
                    viewport_width: width,
                    viewport_height: height,
                    probe: ProbeAnchor {
                        column_cells: cols,
                        row_fraction: fraction,
                    },
                }
            },
        )
}

fn run_to_rest(engine: &mut GesturePhysicsEngine) -> Option<ScrollPosition> {
    for _ in 0..20_000 {
        for event in engine.tick(1.0 / 60.0) {
            if let PhysicsEvent::Settled(position) = event {
                return Some(position);
            }
        }
    }
    None
}

proptest! {
    /// Property: the probe lands on exactly the (day, hour) it was sent to
    #[test]
    fn prop_probe_round_trip(
        hour in 0..24u32,
        day in -200_000..200_000i64,
        geometry in geometry_strategy(),
    ) {
        let position = to_scroll(hour, day, &geometry);
        let target = to_probe_target(position, &geometry);
        prop_assert_eq!(target.day_index, day);
        prop_assert_eq!(target.hour, hour);

        // Normalizing the representation does not move the probe
        let folded = to_probe_target(position.normalized(), &geometry);
        prop_assert_eq!(folded, target);
    }

    /// Property: the window covers the whole body at any fractional offset
    #[test]
    fn prop_window_covers_viewport(
        row in -10_000.0..10_000.0f64,
        col in -10_000.0..10_000.0f64,
        buffer in 0..4u32,
        geometry in geometry_strategy(),
    ) {
        let position = ScrollPosition::new(row, col);
        let window = visible_window(position, &geometry, buffer);
        prop_assert!(covers(&window, position, &geometry));

        let min_rows = (geometry.body_height() / geometry.cell_height()).ceil() as u32 + buffer;
        let min_cols = (geometry.body_width() / geometry.cell_width()).ceil() as u32 + buffer;
        prop_assert!(window.row_count >= min_rows);
        prop_assert!(window.col_count >= min_cols);
    }

    /// Property: simulated momentum matches the closed form
    #[test]
    fn prop_momentum_converges(
        v0 in -5.0..5.0f64,
        friction in 0.5..0.99f64,
        epsilon in 1e-6..1e-2f64,
    ) {
        let (_, total) = simulate(v0, friction, epsilon);
        let expected = momentum_displacement(v0, friction);
        let tolerance = epsilon / (1.0 - friction) + 1e-9 * (1.0 + expected.abs());
        prop_assert!((total - expected).abs() <= tolerance);
    }

    /// Property: every release settles on a whole column with a finite row
    #[test]
    fn prop_release_settles_on_integer_column(
        start_row in 0.0..24.0f64,
        start_col in -1000.0..1000.0f64,
        dx in -600.0..600.0f64,
        dy in -600.0..600.0f64,
        vx in -4000.0..4000.0f64,
        vy in -4000.0..4000.0f64,
    ) {
        let mut engine = GesturePhysicsEngine::new(
            PhysicsConfig::default(),
            120.0,
            48.0,
            ScrollPosition::new(start_row, start_col.round()),
        );
        engine.begin_drag();
        engine.drag_to(dx, dy);
        let immediate = engine.release(vx, vy);

        let settled = match immediate.last() {
            Some(PhysicsEvent::Settled(position)) => Some(*position),
            _ => run_to_rest(&mut engine),
        };
        let settled = settled.expect("engine settles");
        prop_assert_eq!(engine.phase(), GesturePhase::Idle);
        prop_assert_eq!(settled.col.fract(), 0.0);
        prop_assert!(settled.row.is_finite());
        prop_assert!((0.0..24.0).contains(&settled.row));
    }
}
