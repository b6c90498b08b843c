/// One axis of an active drag.
///
/// `position = anchor - (translation - baseline) / cell`. Each axis is
/// anchored independently so re-anchoring one never disturbs the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDrag {
    anchor: f64,
    baseline: f64,
    cell: f64,
}

impl AxisDrag {
    pub fn new(anchor: f64, cell: f64) -> Self {
        Self {
            anchor,
            baseline: 0.0,
            cell,
        }
    }

    pub fn position(&self, translation: f64) -> f64 {
        self.anchor - (translation - self.baseline) / self.cell
    }

    /// Restart the delta from `position` at the current `translation`.
    pub fn reanchor(&mut self, position: f64, translation: f64) {
        self.anchor = position;
        self.baseline = translation;
    }

    /// Move the anchor by a whole number of cells.
    pub fn shift(&mut self, delta: f64) {
        self.anchor += delta;
    }

    pub fn anchor(&self) -> f64 {
        self.anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_divides_by_cell() {
        let axis = AxisDrag::new(8.0, 40.0);
        assert_eq!(axis.position(100.0), 5.5);
        assert_eq!(axis.position(-100.0), 10.5);
    }

    #[test]
    fn test_reanchor_keeps_position_continuous() {
        let mut axis = AxisDrag::new(3.0, 100.0);
        let before = axis.position(150.0);
        axis.reanchor(before, 150.0);
        assert_eq!(axis.position(150.0), before);
        assert_eq!(axis.position(250.0), before - 1.0);
    }
}
