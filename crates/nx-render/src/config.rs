//! Render configuration, deserializable from JSON.

use serde::Deserialize;

use crate::color::Color;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            figure: FigureConfig::default(),
            font: FontConfig::default(),
            axes: AxesConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self { width: 518.4, height: 388.8 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10.0, label_size: 11.0, tick_size: 8.5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub tick_direction: String,
    pub show_top_ticks: bool,
    pub show_right_ticks: bool,
    pub tick_length: f64,
    pub minor_tick_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            tick_direction: "in".into(),
            show_top_ticks: true,
            show_right_ticks: true,
            tick_length: 5.0,
            minor_tick_length: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: false, color: Color::hex("#CBD5E1"), alpha: 0.55 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RenderConfig::default();
        assert!(cfg.figure.width > 0.0);
        assert_eq!(cfg.axes.tick_direction, "in");
        assert!(!cfg.grid.show);
    }

    #[test]
    fn partial_json_override() {
        let cfg: RenderConfig =
            serde_json::from_str(r#"{"figure": {"width": 720.0}, "grid": {"show": true}}"#)
                .unwrap();
        assert_eq!(cfg.figure.width, 720.0);
        // Unspecified fields keep defaults.
        assert_eq!(cfg.figure.height, 388.8);
        assert!(cfg.grid.show);
    }
}
