use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn hex(s: &str) -> Self {
        let s = s.strip_prefix('#').unwrap_or(s);
        let r = u8::from_str_radix(&s[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&s[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&s[4..6], 16).unwrap_or(0);
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    pub fn to_svg_fill(&self) -> String {
        if (self.a - 1.0).abs() < 1e-6 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear interpolation between two colors (for colormaps).
    pub fn lerp(a: Color, b: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: (a.r as f64 * (1.0 - t) + b.r as f64 * t).round() as u8,
            g: (a.g as f64 * (1.0 - t) + b.g as f64 * t).round() as u8,
            b: (a.b as f64 * (1.0 - t) + b.b as f64 * t).round() as u8,
            a: a.a * (1.0 - t) + b.a * t,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_fill())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Color::hex(&s))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

// --- Curve colors for the warping overlay ---

/// Average chi2 curve (red).
pub const AVERAGE: Color = Color::rgb(0xd9, 0x53, 0x4f);
/// Truncated-average chi2 curve (magenta).
pub const TRUNCATED: Color = Color::rgb(0xc6, 0x78, 0xdd);
/// Median chi2 curve (cyan).
pub const MEDIAN: Color = Color::rgb(0x56, 0xb6, 0xc2);
/// ndf reference line (orange).
pub const NDF: Color = Color::rgb(0xe8, 0x85, 0x3d);

// --- Sequential colormap for the chi2 distribution heatmap ---

/// Avocado-style sequential colormap: 0.0 → pale yellow, 1.0 → dark green.
pub fn avocado(t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        Color::lerp(Color::hex("#f7f4d8"), Color::hex("#8aa84a"), t * 2.0)
    } else {
        Color::lerp(Color::hex("#8aa84a"), Color::hex("#1f3a12"), (t - 0.5) * 2.0)
    }
}
