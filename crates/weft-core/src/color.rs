//! Color handling with CSS color support.

use std::str::FromStr;

use color::DynamicColor;
use thiserror::Error;

/// Error produced when a color string cannot be parsed.
#[derive(Debug, Error)]
#[error("Invalid color '{input}': {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// Wrapper around the `DynamicColor` type from the color crate.
///
/// This provides convenience methods for working with colors in Weft:
/// parsing CSS color strings and converting to SVG attribute values.
///
/// # Examples
///
/// ```
/// # use weft_core::color::Color;
/// let blue = Color::new("#82b1ff").unwrap();
/// assert_eq!(blue.alpha(), 1.0);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string.
    ///
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)",
    /// "red", etc.
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Color { color }),
            Err(err) => Err(ColorError {
                input: color_str.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    /// Get the alpha channel of this color in the [0, 1] range
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert!(Color::new("#1f77b4").is_ok());
        assert!(Color::new("white").is_ok());
        assert!(Color::new("rgb(130, 177, 255)").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn default_is_opaque_black() {
        let color = Color::default();
        assert_eq!(color.alpha(), 1.0);
    }
}
