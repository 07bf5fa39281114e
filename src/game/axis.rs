use serde::Serialize;

/// One of the four lines a run can lie along.
///
/// Each axis is a (row-step, column-step) pair walking from a run's first
/// cell towards its last. Run finding, open-end analysis and threat
/// detection all consume this table instead of handling each direction
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
    /// `\` from top-left to bottom-right
    DiagonalDownRight,
    /// `/` from top-right to bottom-left
    DiagonalDownLeft,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalDownRight,
        Axis::DiagonalDownLeft,
    ];

    /// (row-step, column-step). Row steps are never negative, so the
    /// "front" of a run is always at or above its "back".
    pub const fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::DiagonalDownRight => (1, 1),
            Axis::DiagonalDownLeft => (1, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_distinct_and_unit() {
        let steps: Vec<_> = Axis::ALL.iter().map(|a| a.step()).collect();
        for (i, a) in steps.iter().enumerate() {
            assert!(a.0.abs() <= 1 && a.1.abs() <= 1 && *a != (0, 0));
            for b in &steps[i + 1..] {
                assert_ne!(a, b);
                assert_ne!((-a.0, -a.1), *b, "axes must not be reverses of each other");
            }
        }
    }
}
