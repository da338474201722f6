use nx_viz::WarpingArtifact;

use crate::canvas::Canvas;
use crate::color;
use crate::config::RenderConfig;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, LegendEntry, LegendKind};
use crate::layout::margins::PlotArea;
use crate::plots::draw_axes;
use crate::primitives::*;

/// Render one warping scenario: chi2 distribution heatmap, the three
/// summary curves, and the ndf reference line, on log-log axes.
pub fn render(artifact: &WarpingArtifact, config: &RenderConfig) -> crate::Result<String> {
    let n_iter = artifact.avg_chi2.len();
    if n_iter == 0 || artifact.iteration_edges.len() < 2 {
        return Ok(empty_svg());
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height);

    let x_min = artifact.iteration_edges[0].max(1e-3);
    let x_max = artifact.iteration_edges[artifact.iteration_edges.len() - 1];

    // Y range spans the curves, the ndf line, and the map's chi2 binning.
    let mut y_lo = artifact.ndf;
    let mut y_hi = artifact.ndf;
    for curve in [&artifact.avg_chi2, &artifact.truncated_chi2, &artifact.median_chi2] {
        for &v in curve.iter().filter(|v| v.is_finite() && **v > 0.0) {
            y_lo = y_lo.min(v);
            y_hi = y_hi.max(v);
        }
    }
    if let Some(map) = &artifact.chi2_map {
        if let Some(&top) = map.y_edges.last() {
            y_hi = y_hi.max(top);
        }
        if let Some(&bot) = map.y_edges.first() {
            if bot > 0.0 {
                y_lo = y_lo.min(bot);
            }
        }
    }

    let x_axis = Axis::auto_log(x_min, x_max).with_label("Iteration");
    let y_axis = Axis::auto_log(y_lo, y_hi).with_label("\u{03c7}\u{00b2}");

    let area = PlotArea::auto(&canvas, Some(&y_axis), Some(&x_axis), config, true);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    // Title line above the frame.
    canvas.text(
        area.left + area.width / 2.0,
        area.top - 8.0,
        &artifact.title(),
        &TextStyle {
            size: config.font.label_size,
            weight: FontWeight::Bold,
            anchor: TextAnchor::Middle,
            ..Default::default()
        },
    );

    let px_x = |v: f64| x_axis.data_to_pixel(v, area.left, area.right());
    let px_y = |v: f64| y_axis.data_to_pixel(v, area.bottom(), area.top);

    let _clip = canvas.push_clip(area.left, area.top, area.width, area.height);

    // Chi2 distribution heatmap under everything else.
    if let Some(map) = &artifact.chi2_map {
        let max_count = map.max_count();
        if max_count > 0.0 {
            for (iy, row) in map.counts.iter().enumerate() {
                for (ix, &count) in row.iter().enumerate() {
                    if count <= 0.0 {
                        continue;
                    }
                    let x0 = px_x(map.x_edges[ix]);
                    let x1 = px_x(map.x_edges[ix + 1]);
                    let y0 = px_y(map.y_edges[iy + 1]);
                    let y1 = px_y(map.y_edges[iy]);
                    canvas.rect(
                        x0,
                        y0,
                        x1 - x0,
                        y1 - y0,
                        &Style::filled(color::avocado(count / max_count)),
                    );
                }
            }
        }
    }

    // Summary curves as histogram steps over the iteration bins.
    for (curve, c) in [
        (&artifact.avg_chi2, color::AVERAGE),
        (&artifact.truncated_chi2, color::TRUNCATED),
        (&artifact.median_chi2, color::MEDIAN),
    ] {
        let mut points = Vec::with_capacity(2 * n_iter);
        for (i, &v) in curve.iter().enumerate() {
            points.push((px_x(artifact.iteration_edges[i]), px_y(v)));
            points.push((px_x(artifact.iteration_edges[i + 1]), px_y(v)));
        }
        canvas.polyline(&points, &LineStyle::solid(c, 1.5));
    }

    // ndf reference.
    let ndf_py = px_y(artifact.ndf);
    canvas.line(area.left, ndf_py, area.right(), ndf_py, &LineStyle::dashed(color::NDF, 1.2));

    canvas.pop_clip();

    let entries = vec![
        LegendEntry { label: "Average".into(), color: color::AVERAGE, kind: LegendKind::Line(None) },
        LegendEntry {
            label: "Truncated".into(),
            color: color::TRUNCATED,
            kind: LegendKind::Line(None),
        },
        LegendEntry { label: "Median".into(), color: color::MEDIAN, kind: LegendKind::Line(None) },
        LegendEntry {
            label: format!("ndf = {:.0}", artifact.ndf),
            color: color::NDF,
            kind: LegendKind::Line(Some("6 3".into())),
        },
    ];
    legend::draw_legend(&mut canvas, &area, &entries, config.font.size, true);

    Ok(canvas.finish_svg())
}

fn empty_svg() -> String {
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><text x="10" y="30">No warping data</text></svg>"#.into()
}
