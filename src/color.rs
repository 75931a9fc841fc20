use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub};

/// Linear RGB radiance triplet. Channels are unbounded above zero while
/// light contributions accumulate; `max_to_one` brings a pixel back into
/// displayable range just before packing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    pub fn black() -> Color { Color::new(0.0, 0.0, 0.0) }
    pub fn white() -> Color { Color::new(1.0, 1.0, 1.0) }
    pub fn red() -> Color { Color::new(1.0, 0.0, 0.0) }
    pub fn green() -> Color { Color::new(0.0, 1.0, 0.0) }
    pub fn blue() -> Color { Color::new(0.0, 0.0, 1.0) }
    pub fn yellow() -> Color { Color::new(1.0, 1.0, 0.0) }
    pub fn magenta() -> Color { Color::new(1.0, 0.0, 1.0) }

    /// Normalizes an over-bright color by its largest channel, preserving
    /// the channel ratios (hue). Colors already within [0,1] are untouched.
    pub fn max_to_one(&mut self) {
        let max = self.r.max(self.g.max(self.b));
        if max > 1.0 {
            *self /= max;
        }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Self::Output {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Self::Output {
        Color::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

impl MulAssign<f64> for Color {
    fn mul_assign(&mut self, rhs: f64) {
        self.r *= rhs;
        self.g *= rhs;
        self.b *= rhs;
    }
}

impl Div<f64> for Color {
    type Output = Color;

    fn div(self, rhs: f64) -> Self::Output {
        Color::new(self.r / rhs, self.g / rhs, self.b / rhs)
    }
}

impl DivAssign<f64> for Color {
    fn div_assign(&mut self, rhs: f64) {
        self.r /= rhs;
        self.g /= rhs;
        self.b /= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn add_and_scale() {
        let c = Color::new(0.1, 0.2, 0.3) + Color::new(0.4, 0.5, 0.6);
        assert_approx_eq!(c, Color::new(0.5, 0.7, 0.9));
        assert_approx_eq!(c * 2.0, Color::new(1.0, 1.4, 1.8));
        assert_approx_eq!(2.0 * c, c * 2.0);
    }

    #[test]
    fn mul_assign_scalar() {
        let mut c = Color::new(0.8, 0.4, 0.2);
        c *= 0.5;
        assert_approx_eq!(c, Color::new(0.4, 0.2, 0.1));
    }

    #[test]
    fn max_to_one_preserves_hue() {
        let mut c = Color::new(4.0, 2.0, 1.0);
        c.max_to_one();
        assert_approx_eq!(c, Color::new(1.0, 0.5, 0.25));
        // ratios r:g:b unchanged
        assert_approx_eq!(c.r / c.g, 2.0);
        assert_approx_eq!(c.g / c.b, 2.0);
    }

    #[test]
    fn max_to_one_leaves_displayable_colors_alone() {
        let mut c = Color::new(0.25, 0.5, 1.0);
        c.max_to_one();
        assert_approx_eq!(c, Color::new(0.25, 0.5, 1.0));
    }
}
