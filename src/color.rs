use std::ops::{ Add, AddAssign, Sub, Mul, Div };

use crate::feq;
use crate::consts::MAX_COLOR_VALUE;

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) values. Displayable
/// values range from 0.0 to 1.0, but colors are left unclamped while shading,
/// so that overlapping light contributions can be summed (or go negative)
/// before the final conversion with `to_display`.
///
/// # Examples
///
/// Scale a color, then combine it with another:
///
/// ```
/// # use ellipsoid_tracer::color::Color;
/// let grey = Color::white().scale(0.5);
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// assert_eq!(grey.multiply_components(&red), Color::rgb(0.5, 0.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Colors are compared component-wise, accounting for possible floating point
/// error in comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

/// Conversion from a vector to a `Color`.
///
/// Takes the first three elements of a vector, and assigns them to the `r`,
/// `g` and `b` fields of the `Color`, in that order. If there aren't enough
/// elements in the vector, fields are assigned defaults in place.
impl From<&Vec<f64>> for Color {
    fn from(v: &Vec<f64>) -> Color {
        match v.len() {
            0 => Default::default(),
            1 => Color { r: v[0], ..Default::default() },
            2 => Color { r: v[0], g: v[1], ..Default::default() },
            _ => Color { r: v[0], g: v[1], b: v[2] }
        }
    }
}

impl From<[f64; 3]> for Color {
    fn from(c: [f64; 3]) -> Color {
        Color { r: c[0], g: c[1], b: c[2] }
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// The color black.
    pub fn black() -> Color {
        Color {
            r: 0.0,
            g: 0.0,
            b: 0.0
        }
    }

    /// The color white.
    pub fn white() -> Color {
        Color {
            r: 1.0,
            g: 1.0,
            b: 1.0
        }
    }

    /// Multiplies every channel by a scalar.
    pub fn scale(&self, factor: f64) -> Color {
        Color {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    /// Computes the Hadamard product of two colors.
    ///
    /// Each channel of `self` is multiplied by the matching channel of
    /// `other`. Light intensity filtered by a surface color is computed this
    /// way.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ellipsoid_tracer::color::Color;
    /// let yellow = Color::rgb(1.0, 1.0, 0.0);
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let product = yellow.multiply_components(&purple);
    /// assert_eq!(product, Color::rgb(1.0, 0.0, 0.0));
    /// ```
    pub fn multiply_components(&self, other: &Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
        }
    }

    /// Converts a color to displayable 8-bit channels.
    ///
    /// Each channel is multiplied by 255, clamped to `[0, 255]` and rounded to
    /// the nearest integer. This is the only place where colors are clamped.
    /// A NaN channel converts to 0.
    pub fn to_display(&self) -> [u8; 3] {
        let max = MAX_COLOR_VALUE as f64;
        let channel = |c: f64| (c * max).clamp(0.0, max).round() as u8;

        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl AddAssign<Color> for Color {
    fn add_assign(&mut self, other: Color) {
        *self = *self + other;
    }
}

/// Subtracts one color from another.
///
/// Components are subtracted from one another individually.
impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
        }
    }
}

/// Multiplies a color by a scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        self.scale(other)
    }
}

/// Multiplies a scalar by a color.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other.scale(self)
    }
}

/// Multiplies a color by a color.
///
/// For colors `c1` and `c2`, `c1 * c2` is shorthand for
/// `c1.multiply_components(&c2)`.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        self.multiply_components(&other)
    }
}

/// Divides every channel of a color by a scalar.
impl Div<f64> for Color {
    type Output = Color;

    fn div(self, other: f64) -> Self::Output {
        Color {
            r: self.r / other,
            g: self.g / other,
            b: self.b / other,
        }
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);

    let mut acc = Color::black();
    acc += c1;
    acc += c2;
    assert_eq!(acc, c3);
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 0.2, g: 0.5, b: 0.5 };

    assert_eq!(c1 - c2, c3);
}

#[test]
fn multiply_color_by_scalar() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);
    let c2 = Color { r: 0.4, g: 0.6, b: 0.8 };

    assert_eq!(c1 * 2.0, c2);
    assert_eq!(2.0 * c1, c2);
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn divide_color() {
    let c = Color::rgb(0.5, 1.0, 2.0);

    assert_eq!(c / 2.0, Color::rgb(0.25, 0.5, 1.0));
}

#[test]
fn display_clamps_out_of_range_channels() {
    let c = Color::rgb(1.5, -0.5, 0.5);

    assert_eq!(c.to_display(), [255, 0, 128]);
}

#[test]
fn display_of_unit_colors() {
    assert_eq!(Color::black().to_display(), [0, 0, 0]);
    assert_eq!(Color::white().to_display(), [255, 255, 255]);
}
