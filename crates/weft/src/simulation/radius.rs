//! Collision radius model.

use weft_core::geometry::Size;

/// Computes a node's effective collision radius from its marker dimensions
/// and rendering mode.
///
/// Nested glyphs occupy the full marker footprint, so collision must respect
/// the larger dimension; non-nested markers are drawn centered and get a
/// 1.5x inflation for breathing room between simple glyphs.
///
/// # Examples
///
/// ```
/// # use weft::simulation::radius::collide_radius;
/// # use weft_core::geometry::Size;
/// assert_eq!(collide_radius(Size::new(50.0, 30.0), true), 40.0);
/// assert_eq!(collide_radius(Size::new(50.0, 30.0), false), 37.5);
/// assert_eq!(collide_radius(Size::new(0.0, 0.0), true), 0.0);
/// ```
pub fn collide_radius(marker: Size, nested: bool) -> f32 {
    if nested {
        marker.max_dimension() * 0.8
    } else {
        (marker.width() / 2.0).max(marker.height() / 2.0) * 1.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn nested_uses_full_footprint() {
        assert_approx_eq!(f32, collide_radius(Size::new(50.0, 30.0), true), 40.0);
        assert_approx_eq!(f32, collide_radius(Size::new(30.0, 50.0), true), 40.0);
    }

    #[test]
    fn centered_markers_get_inflated_half_extent() {
        assert_approx_eq!(f32, collide_radius(Size::new(50.0, 30.0), false), 37.5);
        assert_approx_eq!(f32, collide_radius(Size::new(20.0, 60.0), false), 45.0);
    }

    #[test]
    fn degenerate_marker_has_zero_radius() {
        assert_approx_eq!(f32, collide_radius(Size::new(0.0, 0.0), true), 0.0);
        assert_approx_eq!(f32, collide_radius(Size::new(0.0, 0.0), false), 0.0);
    }
}
