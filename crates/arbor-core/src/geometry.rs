//! Coordinate types for laid-out trees.

use serde::Serialize;

/// The final coordinate of a node.
///
/// `x` is measured in multiples of the layout distance and is never
/// negative once a layout completes. `y` is the depth of the node, with the
/// root at depth 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    x: f64,
    y: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the horizontal coordinate.
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the vertical coordinate (the node depth).
    pub fn y(self) -> usize {
        self.y
    }
}
