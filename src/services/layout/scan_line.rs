//! Scan-line lane assignment for overlapping intervals.
//!
//! Intervals are inclusive tick ranges. Boundary markers are swept in time
//! order with starts before ends at equal ticks; each start takes the lowest
//! free lane and each end frees its lane. The same input set always yields
//! the same assignment.

use std::cmp::Ordering;

use crate::models::layout::{EventLayoutSlot, LaneAssignment};

/// An inclusive `[first, last]` tick range keyed by event id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutInterval {
    pub key: String,
    pub first: i64,
    pub last: i64,
}

impl LayoutInterval {
    /// `last` is raised to `first` when reversed.
    pub fn new(key: impl Into<String>, first: i64, last: i64) -> Self {
        Self {
            key: key.into(),
            first,
            last: last.max(first),
        }
    }

    pub fn overlaps(&self, other: &LayoutInterval) -> bool {
        self.first <= other.last && other.first <= self.last
    }

    /// Restrict to `[lo, hi]`, or `None` when disjoint.
    pub fn clipped(&self, lo: i64, hi: i64) -> Option<Self> {
        if self.last < lo || self.first > hi {
            return None;
        }
        Some(Self {
            key: self.key.clone(),
            first: self.first.max(lo),
            last: self.last.min(hi),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MarkerKind {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Marker {
    tick: i64,
    kind: MarkerKind,
    index: usize,
}

fn time_order(a: &LayoutInterval, b: &LayoutInterval) -> Ordering {
    a.first
        .cmp(&b.first)
        .then(a.last.cmp(&b.last))
        .then_with(|| a.key.cmp(&b.key))
}

fn lowest_free(occupied: &mut Vec<bool>) -> u32 {
    match occupied.iter().position(|used| !used) {
        Some(lane) => {
            occupied[lane] = true;
            lane as u32
        }
        None => {
            occupied.push(true);
            (occupied.len() - 1) as u32
        }
    }
}

/// Assign lanes to `intervals`.
///
/// With `expand_lanes`, an event widens into the free lanes to its right up
/// to the nearest higher lane used by an overlapping event. Results are in
/// time order.
pub fn assign_lanes(intervals: &[LayoutInterval], expand_lanes: bool) -> Vec<LaneAssignment> {
    let mut sorted: Vec<&LayoutInterval> = intervals.iter().collect();
    sorted.sort_by(|a, b| time_order(a, b));

    let mut markers = Vec::with_capacity(sorted.len() * 2);
    for (index, interval) in sorted.iter().enumerate() {
        markers.push(Marker {
            tick: interval.first,
            kind: MarkerKind::Start,
            index,
        });
        markers.push(Marker {
            tick: interval.last,
            kind: MarkerKind::End,
            index,
        });
    }
    markers.sort_unstable();

    let mut lanes = vec![0u32; sorted.len()];
    let mut occupied: Vec<bool> = Vec::new();
    for marker in &markers {
        match marker.kind {
            MarkerKind::Start => lanes[marker.index] = lowest_free(&mut occupied),
            MarkerKind::End => occupied[lanes[marker.index] as usize] = false,
        }
    }

    (0..sorted.len())
        .map(|i| {
            let interval = sorted[i];
            let lane = lanes[i];
            let mut highest = lane;
            let mut next_used: Option<u32> = None;
            // sorted by first tick, so nothing past `interval.last` can overlap
            for (j, other) in sorted.iter().enumerate() {
                if other.first > interval.last {
                    break;
                }
                if j == i || !interval.overlaps(other) {
                    continue;
                }
                highest = highest.max(lanes[j]);
                if lanes[j] > lane {
                    next_used = Some(next_used.map_or(lanes[j], |n| n.min(lanes[j])));
                }
            }
            let max_lanes = highest + 1;
            let lanes_spanned = if expand_lanes {
                next_used.unwrap_or(max_lanes) - lane
            } else {
                1
            };
            LaneAssignment {
                slot: EventLayoutSlot {
                    event_id: interval.key.clone(),
                    lane,
                    max_lanes,
                    lanes_spanned,
                },
                first: interval.first,
                last: interval.last,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lanes(assignments: &[LaneAssignment]) -> Vec<(&str, u32, u32, u32)> {
        assignments
            .iter()
            .map(|a| {
                (
                    a.slot.event_id.as_str(),
                    a.slot.lane,
                    a.slot.max_lanes,
                    a.slot.lanes_spanned,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(assign_lanes(&[], true).is_empty());
    }

    #[test]
    fn test_three_event_scenario() {
        // A 10:00-11:00, B 10:30-11:30, C 12:00-13:00 as inclusive minutes
        let input = vec![
            LayoutInterval::new("C", 720, 779),
            LayoutInterval::new("A", 600, 659),
            LayoutInterval::new("B", 630, 689),
        ];
        let result = assign_lanes(&input, false);
        assert_eq!(
            lanes(&result),
            vec![("A", 0, 2, 1), ("B", 1, 2, 1), ("C", 0, 1, 1)]
        );
    }

    #[test]
    fn test_start_before_end_on_shared_tick() {
        // Inclusive ranges sharing tick 5 are concurrent
        let input = vec![LayoutInterval::new("a", 0, 5), LayoutInterval::new("b", 5, 9)];
        let result = assign_lanes(&input, false);
        assert_eq!(lanes(&result), vec![("a", 0, 2, 1), ("b", 1, 2, 1)]);
    }

    #[test]
    fn test_freed_lane_is_reused_lowest_first() {
        let input = vec![
            LayoutInterval::new("a", 0, 10),
            LayoutInterval::new("b", 0, 3),
            LayoutInterval::new("c", 0, 20),
            LayoutInterval::new("d", 5, 8),
        ];
        let result = assign_lanes(&input, false);
        // b frees lane 0, d takes it
        assert_eq!(
            lanes(&result),
            vec![("b", 0, 3, 1), ("a", 1, 3, 1), ("c", 2, 3, 1), ("d", 0, 3, 1)]
        );
    }

    #[test]
    fn test_lane_expansion_fills_free_lanes() {
        let input = vec![
            LayoutInterval::new("long", 0, 100),
            LayoutInterval::new("short1", 0, 10),
            LayoutInterval::new("mid", 0, 50),
            LayoutInterval::new("late", 60, 70),
        ];
        let result = assign_lanes(&input, true);
        // short1 -> 0, mid -> 1, long -> 2, late -> 0 (only long overlaps it, at lane 2)
        assert_eq!(
            lanes(&result),
            vec![
                ("short1", 0, 3, 1),
                ("mid", 1, 3, 1),
                ("long", 2, 3, 1),
                ("late", 0, 3, 2),
            ]
        );
    }

    #[test]
    fn test_clipped() {
        let interval = LayoutInterval::new("x", 10, 20);
        assert_eq!(interval.clipped(15, 30), Some(LayoutInterval::new("x", 15, 20)));
        assert_eq!(interval.clipped(21, 30), None);
        assert_eq!(LayoutInterval::new("y", 5, 1).last, 5);
    }
}
