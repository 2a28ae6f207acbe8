use cardfit_layout::LayoutError;
use cardfit_render::RenderError;
use thiserror::Error;

/// Everything that can go wrong between reading a configuration and writing a card.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// True for errors caused by the input rather than the environment.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PipelineError::Json(_)
                | PipelineError::Config(_)
                | PipelineError::Layout(
                    LayoutError::Configuration { .. }
                        | LayoutError::InvalidWidth(_)
                        | LayoutError::UnknownPaperSize { .. }
                )
        )
    }
}
