pub mod canvas;
pub mod color;
pub mod config;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;

use config::RenderConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown artifact kind: {0}")]
    UnknownKind(String),
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Render an artifact JSON to SVG string.
pub fn render_svg(artifact_json: &str, kind: &str, config: &RenderConfig) -> Result<String> {
    match kind {
        "warping" => {
            let art: nx_viz::WarpingArtifact = serde_json::from_str(artifact_json)?;
            plots::warping::render(&art, config)
        }
        other => Err(RenderError::UnknownKind(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_rejected() {
        let cfg = RenderConfig::default();
        assert!(matches!(render_svg("{}", "nosuch", &cfg), Err(RenderError::UnknownKind(_))));
    }
}
