//=========================================================================
// Color
//=========================================================================
//
// Linear RGBA colour with HSV round-tripping, used for depth shading.
//
//=========================================================================

//=== Color ===============================================================

/// RGBA colour, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 0.92, 0.016);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);
    pub const ORANGE: Self = Self::rgb(1.0, 0.5, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Hue in `[0, 1)`, saturation and value in `[0, 1]`.
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let value = max;
        let saturation = if max > 0.0 { delta / max } else { 0.0 };

        if delta <= f32::EPSILON {
            return (0.0, saturation, value);
        }

        let sector = if max == self.r {
            ((self.g - self.b) / delta).rem_euclid(6.0)
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };

        (sector / 6.0, saturation, value)
    }

    /// Builds an opaque colour from HSV components.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let c = value * saturation;
        let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let m = value - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::rgb(r + m, g + m, b + m)
    }

    /// Same hue and saturation, value replaced; alpha preserved.
    pub fn with_value(self, value: f32) -> Self {
        let (h, s, _) = self.to_hsv();
        let Self { r, g, b, .. } = Self::from_hsv(h, s, value.clamp(0.0, 1.0));
        Self::rgba(r, g, b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_color_eq(a: Color, b: Color) {
        assert_abs_diff_eq!(a.r, b.r, epsilon = 1e-5);
        assert_abs_diff_eq!(a.g, b.g, epsilon = 1e-5);
        assert_abs_diff_eq!(a.b, b.b, epsilon = 1e-5);
        assert_abs_diff_eq!(a.a, b.a, epsilon = 1e-5);
    }

    #[test]
    fn primaries_have_expected_hue() {
        assert_abs_diff_eq!(Color::RED.to_hsv().0, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(Color::GREEN.to_hsv().0, 1.0 / 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(Color::BLUE.to_hsv().0, 2.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn grey_has_no_saturation() {
        let (_, s, v) = Color::rgb(0.5, 0.5, 0.5).to_hsv();
        assert_abs_diff_eq!(s, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn hsv_round_trip_preserves_color() {
        for color in [Color::ORANGE, Color::CYAN, Color::MAGENTA, Color::rgb(0.2, 0.4, 0.7)] {
            let (h, s, v) = color.to_hsv();
            assert_color_eq(Color::from_hsv(h, s, v), color);
        }
    }

    #[test]
    fn with_value_darkens_and_keeps_alpha() {
        let shaded = Color::rgba(1.0, 0.0, 0.0, 0.25).with_value(0.5);
        assert_color_eq(shaded, Color::rgba(0.5, 0.0, 0.0, 0.25));
    }

    #[test]
    fn with_value_zero_is_black() {
        let shaded = Color::BLUE.with_value(0.0);
        assert_color_eq(shaded, Color::BLACK);
    }
}
