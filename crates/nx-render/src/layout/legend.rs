use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub kind: LegendKind,
}

pub enum LegendKind {
    FilledRect,
    Line(Option<String>), // dash pattern
}

/// Draw a legend box in the top-right corner of the plot area.
pub fn draw_legend(
    canvas: &mut Canvas,
    area: &PlotArea,
    entries: &[LegendEntry],
    config_font_size: f64,
    frame: bool,
) {
    if entries.is_empty() {
        return;
    }

    let row_height = config_font_size + 4.0;
    let swatch_w = 14.0;
    let swatch_h = config_font_size - 2.0;
    let gap = 6.0;
    let padding = 6.0;

    let text_style = TextStyle {
        size: config_font_size * 0.85,
        baseline: TextBaseline::Central,
        ..Default::default()
    };

    let max_w = entries
        .iter()
        .map(|e| canvas.measure_text(&e.label, &text_style).width)
        .fold(0.0_f64, f64::max);

    let legend_w = padding + swatch_w + gap + max_w + padding;
    let legend_h = padding + entries.len() as f64 * row_height + padding;

    let lx = area.right() - legend_w - 5.0;
    let ly = area.top + 5.0;

    let bg_style = Style {
        fill: Some(Color::rgb(255, 255, 255).with_alpha(0.9)),
        stroke: if frame { Some(Color::rgb(200, 200, 200)) } else { None },
        stroke_width: 0.5,
        opacity: 1.0,
    };
    canvas.rect(lx, ly, legend_w, legend_h, &bg_style);

    for (i, entry) in entries.iter().enumerate() {
        let ey = ly + padding + i as f64 * row_height + row_height / 2.0;
        let sx = lx + padding;

        match entry.kind {
            LegendKind::FilledRect => {
                canvas.rect(
                    sx,
                    ey - swatch_h / 2.0,
                    swatch_w,
                    swatch_h,
                    &Style::filled(entry.color),
                );
            }
            LegendKind::Line(ref dash) => {
                let ls = LineStyle { color: entry.color, width: 1.5, dash: dash.clone() };
                canvas.line(sx, ey, sx + swatch_w, ey, &ls);
            }
        }

        canvas.text(sx + swatch_w + gap, ey, &entry.label, &text_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn legend_draws_all_labels() {
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea { left: 40.0, top: 20.0, width: 340.0, height: 250.0 };
        let entries = vec![
            LegendEntry {
                label: "Average".into(),
                color: color::AVERAGE,
                kind: LegendKind::Line(None),
            },
            LegendEntry {
                label: "ndf".into(),
                color: color::NDF,
                kind: LegendKind::Line(Some("6 3".into())),
            },
        ];
        draw_legend(&mut canvas, &area, &entries, 10.0, true);
        let svg = canvas.finish_svg();
        assert!(svg.contains("Average"));
        assert!(svg.contains("ndf"));
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn empty_entries_draw_nothing() {
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea { left: 40.0, top: 20.0, width: 340.0, height: 250.0 };
        draw_legend(&mut canvas, &area, &[], 10.0, true);
        let svg = canvas.finish_svg();
        assert!(!svg.contains("<rect x="));
    }
}
