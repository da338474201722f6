use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::RenderConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw the box frame with ticks, optional grid, and axis labels.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &RenderConfig,
) {
    let ink = Color::rgb(0, 0, 0);
    let tick = LineStyle::solid(ink, 0.6);
    let minor = LineStyle::solid(ink, 0.4);
    let grid = LineStyle {
        color: config.grid.color.with_alpha(config.grid.alpha),
        width: 0.5,
        dash: Some("3 3".into()),
    };

    let inward = config.axes.tick_direction == "in";
    // Inward ticks point into the plot area, outward ones away from it.
    let sign = if inward { 1.0 } else { -1.0 };
    let tl = sign * config.axes.tick_length;
    let mtl = sign * config.axes.minor_tick_length;

    // Frame
    canvas.rect(
        area.left,
        area.top,
        area.width,
        area.height,
        &Style { stroke: Some(ink), stroke_width: 0.8, ..Default::default() },
    );

    let x_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    let y_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };

    let in_x = |px: f64| px >= area.left - 0.5 && px <= area.right() + 0.5;
    let in_y = |py: f64| py >= area.top - 0.5 && py <= area.bottom() + 0.5;

    // X majors: tick on the bottom edge, mirror on the top, label below.
    for (i, &val) in x_axis.tick_positions.iter().enumerate() {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if !in_x(px) {
            continue;
        }
        if config.grid.show {
            canvas.line(px, area.top, px, area.bottom(), &grid);
        }
        canvas.line(px, area.bottom(), px, area.bottom() - tl, &tick);
        if config.axes.show_top_ticks {
            canvas.line(px, area.top, px, area.top + tl, &tick);
        }
        if let Some(label) = x_axis.tick_labels.get(i) {
            let label_y = if inward { area.bottom() + 3.0 } else { area.bottom() + tl.abs() + 3.0 };
            canvas.text(px, label_y, label, &x_label_style);
        }
    }
    for &val in &x_axis.minor_ticks {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if !in_x(px) {
            continue;
        }
        canvas.line(px, area.bottom(), px, area.bottom() - mtl, &minor);
        if config.axes.show_top_ticks {
            canvas.line(px, area.top, px, area.top + mtl, &minor);
        }
    }

    // Y majors: tick on the left edge, mirror on the right, label left.
    for (i, &val) in y_axis.tick_positions.iter().enumerate() {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if !in_y(py) {
            continue;
        }
        if config.grid.show {
            canvas.line(area.left, py, area.right(), py, &grid);
        }
        canvas.line(area.left, py, area.left + tl, py, &tick);
        if config.axes.show_right_ticks {
            canvas.line(area.right(), py, area.right() - tl, py, &tick);
        }
        if let Some(label) = y_axis.tick_labels.get(i) {
            let label_x = if inward { area.left - 4.0 } else { area.left - tl.abs() - 4.0 };
            canvas.text(label_x, py, label, &y_label_style);
        }
    }
    for &val in &y_axis.minor_ticks {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if !in_y(py) {
            continue;
        }
        canvas.line(area.left, py, area.left + mtl, py, &minor);
        if config.axes.show_right_ticks {
            canvas.line(area.right(), py, area.right() - mtl, py, &minor);
        }
    }

    // Axis titles
    let title_style = TextStyle {
        size: config.font.label_size,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    if !x_axis.label.is_empty() {
        let base = if inward { area.bottom() } else { area.bottom() + tl.abs() };
        canvas.text(
            area.left + area.width / 2.0,
            base + config.font.tick_size + 14.0,
            &x_axis.label,
            &title_style,
        );
    }
    if !y_axis.label.is_empty() {
        let max_tick_w = y_axis
            .tick_labels
            .iter()
            .map(|l| canvas.measure_text(l, &y_label_style).width)
            .fold(0.0_f64, f64::max);
        let label_x = area.left - max_tick_w - 14.0;
        canvas.text_rotated(label_x, area.top + area.height / 2.0, &y_axis.label, &title_style, -90.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_frame_ticks_and_labels() {
        let mut canvas = Canvas::new(500.0, 400.0);
        let cfg = RenderConfig::default();
        let x = Axis::auto_log(1.0, 100.0).with_label("Iteration");
        let y = Axis::auto_log(0.1, 1000.0).with_label("Chi2");
        let area = PlotArea::auto(&canvas, Some(&y), Some(&x), &cfg, false);
        draw_axes(&mut canvas, &area, &x, &y, &cfg);
        let svg = canvas.finish_svg();
        assert!(svg.contains("Iteration"));
        assert!(svg.contains("Chi2"));
        assert!(svg.contains("rotate(-90.0"));
        // Log decade labels present.
        assert!(svg.contains("10\u{00B2}"));
    }
}
