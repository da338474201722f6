//! Axis tick generation and data→pixel mapping.

/// One plot axis: range, scale, label, and generated tick marks.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub log: bool,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
    pub minor_ticks: Vec<f64>,
}

impl Axis {
    /// Linear axis snapped to round tick values covering the data range.
    pub fn auto_linear(data_min: f64, data_max: f64, target_ticks: usize) -> Self {
        let step = if (data_max - data_min).abs() < 1e-15 {
            1.0
        } else {
            round_step((data_max - data_min) / (target_ticks.max(2) - 1) as f64)
        };
        let min = (data_min / step).floor() * step;
        let max = (data_max / step).ceil() * step;

        let n_major = ((max - min) / step).round() as usize;
        let tick_positions: Vec<f64> = (0..=n_major).map(|k| min + k as f64 * step).collect();
        let tick_labels = tick_positions.iter().map(|&v| linear_tick_label(v, step)).collect();

        // Minor ticks: 4 between consecutive majors.
        let minor_ticks = (0..n_major)
            .flat_map(|k| (1..5).map(move |m| min + (k as f64 + m as f64 / 5.0) * step))
            .collect();

        Self {
            min,
            max,
            log: false,
            label: String::new(),
            tick_positions,
            tick_labels,
            minor_ticks,
        }
    }

    /// Logarithmic axis with one major tick per decade.
    pub fn auto_log(data_min: f64, data_max: f64) -> Self {
        let dec_lo = data_min.max(1e-20).log10().floor() as i32;
        let dec_hi = data_max.max(1e-20).log10().ceil() as i32;

        let tick_positions: Vec<f64> = (dec_lo..=dec_hi).map(|e| 10.0_f64.powi(e)).collect();
        let tick_labels = (dec_lo..=dec_hi).map(|e| format!("10{}", superscript(e))).collect();

        // Minor ticks at 2x..9x inside each decade spanned by the data.
        let mut minor_ticks = Vec::new();
        for exp in dec_lo..dec_hi {
            for m in 2..=9 {
                minor_ticks.push(m as f64 * 10.0_f64.powi(exp));
            }
        }

        Self {
            min: 10.0_f64.powi(dec_lo),
            max: 10.0_f64.powi(dec_hi),
            log: true,
            label: String::new(),
            tick_positions,
            tick_labels,
            minor_ticks,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Map a data value onto the pixel span `[px_min, px_max]`.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = if self.log {
            let lo = self.min.max(1e-20).ln();
            let hi = self.max.max(1e-20).ln();
            (value.max(1e-20).ln() - lo) / (hi - lo)
        } else {
            (value - self.min) / (self.max - self.min)
        };
        px_min + frac * (px_max - px_min)
    }
}

/// Round a raw step to 1, 2 or 5 times a power of ten.
fn round_step(rough: f64) -> f64 {
    let exp = 10.0_f64.powf(rough.abs().log10().floor());
    let frac = rough / exp;
    let round = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    round * exp
}

fn linear_tick_label(value: f64, step: f64) -> String {
    if step >= 1.0 {
        // Snap tiny residuals so "-0" never appears.
        let v = if value.abs() < step * 0.01 { 0.0 } else { value };
        format!("{}", v as i64)
    } else {
        let decimals = (-step.log10().floor()) as usize;
        format!("{value:.decimals$}")
    }
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => '\u{207B}',
            '0' => '\u{2070}',
            '1' => '\u{00B9}',
            '2' => '\u{00B2}',
            '3' => '\u{00B3}',
            '4' => '\u{2074}',
            '5' => '\u{2075}',
            '6' => '\u{2076}',
            '7' => '\u{2077}',
            '8' => '\u{2078}',
            '9' => '\u{2079}',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_linear_covers_data() {
        let ax = Axis::auto_linear(0.0, 10.0, 6);
        assert!(!ax.tick_positions.is_empty());
        assert!(ax.min <= 0.0);
        assert!(ax.max >= 10.0);
        assert!(!ax.minor_ticks.is_empty());
    }

    #[test]
    fn data_to_pixel_linear_midpoint() {
        let ax = Axis::auto_linear(0.0, 100.0, 5);
        let px = ax.data_to_pixel(50.0, 0.0, 500.0);
        assert!((px - 250.0).abs() < 1.0);
    }

    #[test]
    fn auto_log_decades() {
        let ax = Axis::auto_log(0.01, 1000.0);
        assert!(ax.log);
        assert!(ax.min <= 0.01);
        assert!(ax.max >= 1000.0);
        assert_eq!(ax.tick_positions.len(), 6);
    }

    #[test]
    fn log_tick_labels_superscripted() {
        let ax = Axis::auto_log(1.0, 100.0);
        assert!(ax.tick_labels.contains(&"10\u{00B2}".to_string()));
    }

    #[test]
    fn log_mapping_is_per_decade() {
        let ax = Axis::auto_log(1.0, 100.0);
        let px = ax.data_to_pixel(10.0, 0.0, 500.0);
        assert!((px - 250.0).abs() < 1.0);
    }

    #[test]
    fn round_step_values() {
        assert!((round_step(3.2) - 2.0).abs() < 1e-9);
        assert!((round_step(0.7) - 0.5).abs() < 1e-9);
        assert!((round_step(15.0) - 10.0).abs() < 1e-9);
        assert!((round_step(4.5) - 5.0).abs() < 1e-9);
        assert!((round_step(1.2) - 1.0).abs() < 1e-9);
    }
}
