use std::fmt::Write as FmtWrite;

use crate::color::Color;
use crate::primitives::*;
use crate::text::{measure_text, TextMetrics};

/// An SVG element stored for deferred rendering.
#[derive(Debug, Clone)]
enum SvgElement {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: Style,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: LineStyle,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        style: LineStyle,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
        rotate: Option<f64>,
    },
    Raw(String),
}

/// Immediate-mode SVG canvas. Coordinates in points (1pt = 1/72").
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    elements: Vec<SvgElement>,
    defs: Vec<String>,
    clip_depth: usize,
    next_clip_id: usize,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
            defs: Vec::new(),
            clip_depth: 0,
            next_clip_id: 0,
        }
    }

    // --- Drawing primitives ---

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        self.push(SvgElement::Rect { x, y, w, h, style: style.clone() });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        self.push(SvgElement::Line { x1, y1, x2, y2, style: style.clone() });
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        self.push(SvgElement::Polyline { points: points.to_vec(), style: style.clone() });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: None,
        });
    }

    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, style: &TextStyle, angle: f64) {
        self.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style: style.clone(),
            rotate: Some(angle),
        });
    }

    // --- Clip regions ---

    /// Open a clip group; everything drawn until the matching [`pop_clip`]
    /// is confined to the rectangle.
    ///
    /// [`pop_clip`]: Canvas::pop_clip
    pub fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64) -> String {
        let id = format!("clip{}", self.next_clip_id);
        self.next_clip_id += 1;
        self.defs.push(format!(
            r#"<clipPath id="{id}"><rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" /></clipPath>"#
        ));
        self.push(SvgElement::Raw(format!(r#"<g clip-path="url(#{id})">"#)));
        self.clip_depth += 1;
        id
    }

    pub fn pop_clip(&mut self) {
        if self.clip_depth > 0 {
            self.clip_depth -= 1;
            self.push(SvgElement::Raw("</g>".to_string()));
        }
    }

    // --- Text measurement ---

    pub fn measure_text(&self, content: &str, style: &TextStyle) -> TextMetrics {
        measure_text(content, style)
    }

    // --- SVG output ---

    fn push(&mut self, elem: SvgElement) {
        self.elements.push(elem);
    }

    pub fn finish_svg(&self) -> String {
        let mut out = String::with_capacity(32 * 1024);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        )
        .unwrap();

        // Defs (clip paths)
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            for d in &self.defs {
                out.push_str(d);
                out.push('\n');
            }
            out.push_str("</defs>\n");
        }

        // Background (white)
        writeln!(out, r#"<rect width="{}" height="{}" fill="white" />"#, self.width, self.height)
            .unwrap();

        for elem in &self.elements {
            render_element(&mut out, elem);
        }

        // Close any clip group left open.
        for _ in 0..self.clip_depth {
            out.push_str("</g>\n");
        }

        out.push_str("</svg>\n");
        out
    }
}

fn render_element(out: &mut String, elem: &SvgElement) {
    match elem {
        SvgElement::Rect { x, y, w, h, style } => {
            write!(out, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#).unwrap();
            write_style_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Line { x1, y1, x2, y2, style } => {
            write!(out, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#).unwrap();
            write_line_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Polyline { points, style } => {
            write!(out, r#"<polyline points=""#).unwrap();
            for (i, (x, y)) in points.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write!(out, "{x:.2},{y:.2}").unwrap();
            }
            out.push('"');
            write!(out, r#" fill="none""#).unwrap();
            write_line_attrs(out, style);
            out.push_str(" />\n");
        }
        SvgElement::Text { x, y, content, style, rotate } => {
            write!(out, r#"<text x="{x:.2}" y="{y:.2}""#).unwrap();
            write!(out, r#" font-family="sans-serif" font-size="{:.1}""#, style.size).unwrap();
            write!(out, r#" fill="{}""#, style.color.to_svg_fill()).unwrap();
            write!(out, r#" text-anchor="{}""#, style.anchor.as_str()).unwrap();
            write!(out, r#" dominant-baseline="{}""#, style.baseline.as_str()).unwrap();
            if style.weight == FontWeight::Bold {
                write!(out, r#" font-weight="bold""#).unwrap();
            }
            if let Some(angle) = rotate {
                write!(out, r#" transform="rotate({angle:.1},{x:.2},{y:.2})""#).unwrap();
            }
            out.push('>');
            // Escape XML
            for ch in content.chars() {
                match ch {
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    '&' => out.push_str("&amp;"),
                    '"' => out.push_str("&quot;"),
                    _ => out.push(ch),
                }
            }
            out.push_str("</text>\n");
        }
        SvgElement::Raw(s) => {
            out.push_str(s);
            out.push('\n');
        }
    }
}

fn write_style_attrs(out: &mut String, style: &Style) {
    if let Some(fill) = &style.fill {
        write!(out, r#" fill="{}""#, fill.to_svg_fill()).unwrap();
    } else {
        write!(out, r#" fill="none""#).unwrap();
    }
    if let Some(stroke) = &style.stroke {
        write!(out, r#" stroke="{}""#, stroke.to_svg_fill()).unwrap();
        write!(out, r#" stroke-width="{:.2}""#, style.stroke_width).unwrap();
    }
    if (style.opacity - 1.0).abs() > 1e-4 {
        write!(out, r#" opacity="{:.3}""#, style.opacity).unwrap();
    }
}

fn write_line_attrs(out: &mut String, style: &LineStyle) {
    write!(out, r#" stroke="{}""#, style.color.to_svg_fill()).unwrap();
    write!(out, r#" stroke-width="{:.2}""#, style.width).unwrap();
    if let Some(dash) = &style.dash {
        write!(out, r#" stroke-dasharray="{dash}""#).unwrap();
    }
}
