//! The output raster.  Pixels live in one preallocated, row-major run
//! of atomic words, so render workers can each write their own tiles
//! through a shared `&Framebuffer` without any lock.  The tiles never
//! overlap, so no cell is written twice; `Relaxed` stores are enough
//! because the scope join at the end of a render publishes every
//! write to the caller.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::evaluate::Color;
use crate::planes::RenderConfig;

/// A `width x height` grid of RGBA pixels.
#[derive(Debug)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<AtomicU32>,
}

impl Framebuffer {
    /// Allocates a blank buffer.
    ///
    /// Panics if `width * height` overflows; `for_config` cannot.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("{}x{} framebuffer is too large", width, height));
        Framebuffer::blank(width, height, len)
    }

    /// Allocates a blank buffer the size of the configured raster.
    pub fn for_config(config: &RenderConfig) -> Self {
        Framebuffer::blank(config.width(), config.height(), config.pixel_count())
    }

    fn blank(width: usize, height: usize, len: usize) -> Self {
        let pixels = (0..len)
            .map(|_| AtomicU32::new(Color::BLANK.to_u32()))
            .collect();
        Framebuffer {
            width,
            height,
            pixels,
        }
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} framebuffer",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Stores a color at (x, y).
    pub fn set(&self, x: usize, y: usize, color: Color) {
        self.pixels[self.offset(x, y)].store(color.to_u32(), Ordering::Relaxed);
    }

    /// Reads the color at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Color {
        Color::from_u32(self.pixels[self.offset(x, y)].load(Ordering::Relaxed))
    }

    /// The pixels as tightly packed RGBA bytes, row-major, the layout
    /// image encoders expect.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| Color::from_u32(p.load(Ordering::Relaxed)).0.to_vec())
            .collect()
    }
}
