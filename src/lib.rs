//! Auto-fit invitation cards.
//!
//! Each card's width comes from a paper size and its height from the content,
//! so every participant of an event gets an identically sized PNG with no
//! empty space below the signature.
//!
//! ```no_run
//! use cardfit::{EventConfig, GeneratorBuilder};
//!
//! # fn main() -> Result<(), cardfit::PipelineError> {
//! let config = EventConfig::load("demos/honey_sensory.json")?;
//! let generator = GeneratorBuilder::new().with_system_fonts(true).build();
//! let report = generator.generate_from_config(&config)?;
//! println!("{} cards in {}", report.count(), report.output_folder.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod output;

pub use config::EventConfig;
pub use error::PipelineError;
pub use generator::{BatchReport, CardFailure, CardGenerator, GeneratorBuilder, RenderedCard};

pub use cardfit_executor::ExecutorImpl;
pub use cardfit_layout::{
    FontLibrary, LayoutConfig, LayoutEngine, LayoutError, LayoutPlan, OverflowPolicy,
    PaperProfile, PaperSizeRegistry, PaperSpec, ScaleProfile,
};
pub use cardfit_render::{RasterCanvas, RenderError};
pub use cardfit_types::{CardContent, Color, Palette, Participant, Size};
