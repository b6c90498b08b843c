use crate::models::settings::SnapSettings;

/// Positions this close to an integer count as already on it.
const ON_CELL_TOLERANCE: f64 = 1e-6;

/// Integer cell (or page) to settle on after a release.
///
/// Fast releases round toward the velocity's direction, far drags toward the
/// drag direction, everything else to the nearest cell.
pub fn snap_target(position: f64, origin: f64, velocity: f64, settings: &SnapSettings) -> f64 {
    let nearest = position.round();
    if (position - nearest).abs() < ON_CELL_TOLERANCE {
        return nearest;
    }

    let displacement = position - origin;
    let direction = if velocity.is_finite() && velocity.abs() >= settings.velocity_threshold {
        velocity.signum()
    } else if displacement.is_finite() && displacement.abs() >= settings.distance_threshold {
        displacement.signum()
    } else {
        0.0
    };

    if direction > 0.0 {
        position.ceil()
    } else if direction < 0.0 {
        position.floor()
    } else {
        nearest
    }
}
