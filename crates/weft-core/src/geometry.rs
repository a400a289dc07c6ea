//! Geometric primitives for layout and positioning.
//!
//! This module provides the fundamental geometric types used throughout Weft
//! for node positions, marker dimensions, and glyph geometry.
//!
//! # Coordinate System
//!
//! Weft uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in layout coordinate space.
///
/// Points use `f32` coordinates and provide operations for basic vector math.
/// The coordinate system has origin at top-left with Y increasing downward
/// (see [module documentation](self) for details).
///
/// # Examples
///
/// ```
/// # use weft_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Width and height dimensions.
///
/// Used for viewport dimensions and node marker sizes.
///
/// # Examples
///
/// ```
/// # use weft_core::geometry::Size;
/// let viewport = Size::new(800.0, 600.0);
/// assert_eq!(viewport.center().x(), 400.0);
/// assert_eq!(viewport.center().y(), 300.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Returns the larger of the two dimensions
    pub fn max_dimension(self) -> f32 {
        self.width.max(self.height)
    }

    /// Returns the center point of a region of this size anchored at the origin
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::{approx_eq, assert_approx_eq};
    use proptest::prelude::*;

    #[test]
    fn point_vector_math() {
        let p1 = Point::new(3.0, 4.0);
        let p2 = Point::new(1.0, 2.0);

        assert_approx_eq!(f32, p1.add_point(p2).x(), 4.0);
        assert_approx_eq!(f32, p1.add_point(p2).y(), 6.0);
        assert_approx_eq!(f32, p1.sub_point(p2).x(), 2.0);
        assert_approx_eq!(f32, p1.sub_point(p2).y(), 2.0);
        assert_approx_eq!(f32, p1.hypot(), 5.0);
    }

    #[test]
    fn size_center_is_half_extent() {
        let size = Size::new(100.0, 50.0);
        let center = size.center();

        assert_approx_eq!(f32, center.x(), 50.0);
        assert_approx_eq!(f32, center.y(), 25.0);
    }

    #[test]
    fn zero_checks() {
        assert!(Point::default().is_zero());
        assert!(Size::default().is_zero());
        assert!(!Point::new(0.0, 1.0).is_zero());
        assert!(!Size::new(1.0, 0.0).is_zero());
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn check_point_add_is_commutative(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let result1 = p1.add_point(p2);
        let result2 = p2.add_point(p1);

        prop_assert!(approx_eq!(f32, result1.x(), result2.x()));
        prop_assert!(approx_eq!(f32, result1.y(), result2.y()));
        Ok(())
    }

    fn check_add_sub_inverse(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let roundtrip = p1.add_point(p2).sub_point(p2);

        prop_assert!(approx_eq!(f32, roundtrip.x(), p1.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, roundtrip.y(), p1.y(), epsilon = 0.001));
        Ok(())
    }

    proptest! {
        #[test]
        fn point_add_is_commutative(p1 in point_strategy(), p2 in point_strategy()) {
            check_point_add_is_commutative(p1, p2)?;
        }

        #[test]
        fn add_sub_inverse(p1 in point_strategy(), p2 in point_strategy()) {
            check_add_sub_inverse(p1, p2)?;
        }
    }
}
