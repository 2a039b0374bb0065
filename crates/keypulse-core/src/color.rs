/// Straight (non-premultiplied) RGBA colour with components in \[0, 1\].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// `0xRRGGBB` to an opaque colour.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        )
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn scale_alpha(self, k: f32) -> Self {
        Self {
            a: (self.a * k).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Hue in degrees (wrapped), saturation and lightness in \[0, 1\].
    pub fn hsl(hue_deg: f32, s: f32, l: f32) -> Self {
        let h = hue_deg.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c * 0.5;
        Self::rgb(r + m, g + m, b + m)
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles.
    pub fn to_css(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({},{},{},{:.3})", r, g, b, self.a.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_css_agree() {
        let c = Rgba::hex(0xff8000).with_alpha(0.5);
        assert_eq!(c.to_rgba8(), [255, 128, 0, 128]);
        assert_eq!(c.to_css(), "rgba(255,128,0,0.500)");
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(Rgba::hsl(0.0, 1.0, 0.5).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Rgba::hsl(120.0, 1.0, 0.5).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Rgba::hsl(240.0, 1.0, 0.5).to_rgba8(), [0, 0, 255, 255]);
        // wraps
        assert_eq!(Rgba::hsl(360.0, 1.0, 0.5), Rgba::hsl(0.0, 1.0, 0.5));
        assert_eq!(Rgba::hsl(-120.0, 1.0, 0.5), Rgba::hsl(240.0, 1.0, 0.5));
    }
}
