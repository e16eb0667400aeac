//! Positions and bounds
//!
//! Integer cell coordinates on a bounded 2D grid.

use serde::{Deserialize, Serialize};

/// Position of a cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a delta, without clamping
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Clip each axis into `[0, dim - 1]`
    pub fn clamped(self, bounds: Bounds) -> Self {
        Self {
            x: self.x.clamp(0, bounds.width - 1),
            y: self.y.clamp(0, bounds.height - 1),
        }
    }

    /// Chebyshev distance (diagonal steps count as one)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Grid dimensions, fixed for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Total number of cells
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_stays_in_bounds() {
        let bounds = Bounds::new(5, 3);
        for x in -2..7 {
            for y in -2..5 {
                let clamped = Position::new(x, y).clamped(bounds);
                assert!(bounds.contains(clamped), "({}, {}) clamped out of bounds", x, y);
            }
        }
    }

    #[test]
    fn test_clamped_keeps_interior_points() {
        let bounds = Bounds::new(14, 14);
        let pos = Position::new(6, 9);
        assert_eq!(pos.clamped(bounds), pos);
    }

    #[test]
    fn test_clamped_corners() {
        let bounds = Bounds::new(14, 14);
        assert_eq!(Position::new(-1, 0).clamped(bounds), Position::new(0, 0));
        assert_eq!(Position::new(14, 13).clamped(bounds), Position::new(13, 13));
        assert_eq!(Position::new(3, -5).clamped(bounds), Position::new(3, 0));
        assert_eq!(Position::new(0, 20).clamped(bounds), Position::new(0, 13));
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = Position::new(2, 2);
        assert_eq!(a.chebyshev_distance(&Position::new(2, 2)), 0);
        assert_eq!(a.chebyshev_distance(&Position::new(5, 3)), 3);
        assert_eq!(a.chebyshev_distance(&Position::new(0, 6)), 4);
    }
}
