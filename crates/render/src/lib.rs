//! Raster backend for cardfit.
//!
//! [`RasterCanvas`] implements the layout crate's [`Canvas`](cardfit_layout::Canvas)
//! over a `tiny-skia` pixmap and writes the result as a 300 DPI PNG.

mod canvas;
mod error;
mod glyphs;
pub mod png_out;

pub use canvas::RasterCanvas;
pub use error::RenderError;
pub use png_out::PIXELS_PER_METER;
