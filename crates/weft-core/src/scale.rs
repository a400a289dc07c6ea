//! Data-to-visual scales.
//!
//! Two scale families cover the glyph encodings:
//!
//! - [`LinearScale`] maps a numeric domain `[0, max]` onto a visual extent
//!   `[0, extent]`, used for bar heights.
//! - [`OrdinalScale`] maps categorical values onto a color palette in
//!   first-seen order, used for glyph fills.

use std::collections::HashMap;

use log::debug;

use crate::color::Color;

/// Linear scale with domain `[0, max]` and range `[0, extent]`.
///
/// A degenerate domain (`max <= 0`, or NaN) is clamped to `[0, 1]` so that
/// scaling never divides by zero; all values then map to the bottom of the
/// range.
///
/// # Examples
///
/// ```
/// # use weft_core::scale::LinearScale;
/// let scale = LinearScale::new(30.0, 90.0);
/// assert_eq!(scale.scale(30.0), 90.0);
/// assert_eq!(scale.scale(10.0), 30.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_max: f32,
    range_extent: f32,
}

impl LinearScale {
    /// Creates a scale mapping `[0, domain_max]` onto `[0, range_extent]`.
    pub fn new(domain_max: f32, range_extent: f32) -> Self {
        let domain_max = if domain_max > 0.0 {
            domain_max
        } else {
            debug!(domain_max = domain_max as f64; "Degenerate linear scale domain, clamping to 1");
            1.0
        };
        Self {
            domain_max,
            range_extent,
        }
    }

    /// Maps a domain value to its range value.
    pub fn scale(&self, value: f32) -> f32 {
        self.range_extent * value / self.domain_max
    }
}

/// Ordinal scale assigning palette colors to categories in first-seen order.
///
/// Categories are assigned the next unused palette entry the first time they
/// are scaled and keep that color afterwards. When the palette is exhausted
/// the assignment wraps around.
///
/// # Examples
///
/// ```
/// # use weft_core::scale::OrdinalScale;
/// let mut scale = OrdinalScale::category10();
/// let first = scale.scale("cat");
/// let second = scale.scale("dog");
/// assert_eq!(first, scale.scale("cat"));
/// assert_ne!(first, second);
/// ```
#[derive(Debug, Clone)]
pub struct OrdinalScale {
    palette: Vec<Color>,
    assignments: HashMap<String, usize>,
}

/// The classic ten-color categorical palette.
const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

impl OrdinalScale {
    /// Creates an ordinal scale over the given palette.
    ///
    /// An empty palette falls back to [`OrdinalScale::category10`].
    pub fn new(palette: Vec<Color>) -> Self {
        if palette.is_empty() {
            return Self::category10();
        }
        Self {
            palette,
            assignments: HashMap::new(),
        }
    }

    /// Creates an ordinal scale over the classic ten-color categorical palette.
    pub fn category10() -> Self {
        let palette = CATEGORY10
            .iter()
            .map(|hex| Color::new(hex).expect("Palette entries are valid CSS colors"))
            .collect();
        Self {
            palette,
            assignments: HashMap::new(),
        }
    }

    /// Returns the color for a category, assigning one if unseen.
    pub fn scale(&mut self, category: &str) -> Color {
        let next = self.assignments.len() % self.palette.len();
        let index = *self
            .assignments
            .entry(category.to_string())
            .or_insert(next);
        self.palette[index % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn linear_scale_is_proportional() {
        let scale = LinearScale::new(30.0, 90.0);

        assert_approx_eq!(f32, scale.scale(0.0), 0.0);
        assert_approx_eq!(f32, scale.scale(10.0), 30.0);
        assert_approx_eq!(f32, scale.scale(20.0), 60.0);
        assert_approx_eq!(f32, scale.scale(30.0), 90.0);
    }

    #[test]
    fn degenerate_domain_clamps_to_one() {
        let zero = LinearScale::new(0.0, 50.0);
        let negative = LinearScale::new(-5.0, 50.0);

        assert_approx_eq!(f32, zero.scale(0.0), 0.0);
        assert!(zero.scale(0.0).is_finite(), "No NaN from a zero domain");
        assert_approx_eq!(f32, negative.scale(0.0), 0.0);
    }

    #[test]
    fn ordinal_assigns_in_first_seen_order() {
        let mut scale = OrdinalScale::category10();

        let a = scale.scale("a");
        let b = scale.scale("b");
        let a_again = scale.scale("a");

        assert_eq!(a, a_again, "Assignments are stable");
        assert_ne!(a, b, "Distinct categories get distinct colors");
        assert_eq!(a, Color::new("#1f77b4").unwrap());
        assert_eq!(b, Color::new("#ff7f0e").unwrap());
    }

    #[test]
    fn ordinal_wraps_when_palette_exhausted() {
        let palette = vec![Color::new("red").unwrap(), Color::new("blue").unwrap()];
        let mut scale = OrdinalScale::new(palette);

        let first = scale.scale("one");
        scale.scale("two");
        let third = scale.scale("three");

        assert_eq!(first, third, "Third category wraps back to the first color");
    }
}
