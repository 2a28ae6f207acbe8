use png::Unit;
use std::fs::File;
use std::path::Path;

/// A decoded RGBA PNG.
pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub pixels_per_unit: Option<(u32, u32, Unit)>,
    pub rgba: Vec<u8>,
}

impl DecodedPng {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

pub fn read_png(path: &Path) -> Result<DecodedPng, Box<dyn std::error::Error>> {
    let decoder = png::Decoder::new(File::open(path)?);
    let mut reader = decoder.read_info()?;
    let pixels_per_unit = reader
        .info()
        .pixel_dims
        .map(|d| (d.xppu, d.yppu, d.unit));
    let mut rgba = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut rgba)?;
    assert_eq!(frame.color_type, png::ColorType::Rgba, "cards are written as RGBA");
    rgba.truncate(frame.buffer_size());
    Ok(DecodedPng {
        width: frame.width,
        height: frame.height,
        pixels_per_unit,
        rgba,
    })
}
