//! Approximate text metrics.
//!
//! No font assets are bundled; extents come from per-character advance
//! factors tuned for a generic sans-serif face, which is plenty for margin
//! and legend sizing.

use crate::primitives::{FontWeight, TextStyle};

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

fn advance_factor(ch: char) -> f64 {
    match ch {
        'i' | 'l' | 'j' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.30,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' | ' ' => 0.38,
        'm' | 'w' | 'M' | 'W' => 0.85,
        'A'..='Z' | '@' | '%' => 0.68,
        _ => 0.54,
    }
}

/// Estimate text width and height in points.
pub fn measure_text(text: &str, style: &TextStyle) -> TextMetrics {
    let bold = if style.weight == FontWeight::Bold { 1.05 } else { 1.0 };
    let width: f64 = text.chars().map(advance_factor).sum::<f64>() * style.size * bold;
    TextMetrics { width, height: style.size * 1.2, ascent: style.size * 0.8 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_hello() {
        let m = measure_text("Hello", &TextStyle { size: 12.0, ..Default::default() });
        assert!(m.width > 20.0);
        assert!(m.height > 8.0);
        assert!(m.ascent > 0.0);
    }

    #[test]
    fn bold_wider_than_regular() {
        let style = TextStyle { size: 12.0, ..Default::default() };
        let bold = TextStyle { size: 12.0, weight: FontWeight::Bold, ..Default::default() };
        let r = measure_text("Test", &style);
        let b = measure_text("Test", &bold);
        assert!(b.width > r.width);
    }

    #[test]
    fn longer_is_wider() {
        let style = TextStyle::default();
        assert!(measure_text("Average", &style).width > measure_text("ndf", &style).width);
    }
}
