//! Writes a finished framebuffer to disk as a PNG.

use image::png::PNGEncoder;
use image::ColorType;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::framebuffer::Framebuffer;

/// Encodes `framebuffer` as 8-bit RGBA PNG at `path`, replacing any
/// file already there.
pub fn write_png<P: AsRef<Path>>(path: P, framebuffer: &Framebuffer) -> Result<(), std::io::Error> {
    let output = BufWriter::new(File::create(path)?);
    let encoder = PNGEncoder::new(output);
    encoder.encode(
        &framebuffer.to_rgba_bytes(),
        framebuffer.width() as u32,
        framebuffer.height() as u32,
        ColorType::RGBA(8),
    )?;
    Ok(())
}
