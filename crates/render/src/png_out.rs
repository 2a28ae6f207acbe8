//! PNG output with a physical resolution of 300 DPI.

use crate::{RasterCanvas, RenderError};
use cardfit_layout::DPI;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType, PixelDimensions, Unit};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// 300 DPI expressed in the pixels-per-metre unit the `pHYs` chunk uses.
pub const PIXELS_PER_METER: u32 = (DPI as f64 / 0.0254 + 0.5) as u32;

impl RasterCanvas {
    /// Encodes the canvas as 8-bit straight-alpha RGBA.
    pub fn write_png<W: Write>(&self, out: W) -> Result<(), RenderError> {
        let pixmap = self.pixmap();
        let mut encoder = Encoder::new(out, pixmap.width(), pixmap.height());
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_filter(FilterType::Sub);
        encoder.set_compression(Compression::Default);
        encoder.set_pixel_dims(Some(PixelDimensions {
            xppu: PIXELS_PER_METER,
            yppu: PIXELS_PER_METER,
            unit: Unit::Meter,
        }));

        let data: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()?;
        Ok(())
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.write_png(&mut bytes)?;
        Ok(bytes)
    }

    /// Writes the PNG to `path`, replacing any existing file.
    ///
    /// The image is encoded into a temporary file next to `path` and renamed
    /// over it only once complete, so a failed write leaves `path` untouched.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        persist_with(path, |out| self.write_png(out))?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn persist_with<F>(path: &Path, write: F) -> Result<(), RenderError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), RenderError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush()?;
    }
    tmp.persist(path).map_err(|e| RenderError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardfit_layout::Canvas;
    use cardfit_types::{Color, Size};
    use std::io::Cursor;

    #[test]
    fn three_hundred_dpi_is_11811_pixels_per_meter() {
        assert_eq!(PIXELS_PER_METER, 11811);
    }

    #[test]
    fn encoded_png_keeps_size_resolution_and_color() {
        let mut canvas = RasterCanvas::new(Size::new(12, 7)).unwrap();
        canvas.fill(Color::rgb(0x12, 0x34, 0x56));
        let bytes = canvas.encode_png().unwrap();

        let decoder = png::Decoder::new(Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (12, 7));
        assert_eq!(info.color_type, ColorType::Rgba);
        let dims = info.pixel_dims.unwrap();
        assert_eq!((dims.xppu, dims.yppu, dims.unit), (11811, 11811, Unit::Meter));

        let mut buf = vec![0; reader.output_buffer_size()];
        reader.next_frame(&mut buf).unwrap();
        assert_eq!(&buf[..4], &[0x12, 0x34, 0x56, 0xFF]);
    }

    #[test]
    fn save_png_replaces_an_existing_card() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        std::fs::write(&path, b"stale").unwrap();

        let canvas = RasterCanvas::new(Size::new(4, 3)).unwrap();
        canvas.save_png(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), canvas.encode_png().unwrap());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        let result = persist_with(&path, |out| {
            out.write_all(b"\x89PNG partial")?;
            Err(std::io::Error::other("disk full").into())
        });

        assert!(matches!(result, Err(RenderError::Io(_))));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_write_keeps_the_previous_card() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        std::fs::write(&path, b"previous").unwrap();

        let result = persist_with(&path, |_| Err(std::io::Error::other("interrupted").into()));

        assert!(result.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"previous");
    }
}
