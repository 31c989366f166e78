//! The per-pixel half of the renderer.  Each pixel is mapped to a point
//! `c` on the complex plane, and `z = exp(cos(z * c))` is iterated from
//! `z = c` until `|z|` reaches the escape radius or the iteration cap
//! is hit.  The fraction of the cap that was used picks a color on a
//! ramp from dark teal (escaped at once) to white (never escaped).
//!
//! Nothing here holds state, so any number of workers may call in at
//! once.

use num::Complex;

use crate::planes::RenderConfig;

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 4]);

impl Color {
    /// Fully transparent black; what an unwritten framebuffer holds.
    pub const BLANK: Color = Color([0, 0, 0, 0]);

    /// Packs the channels into one word, red in the high byte.
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Inverse of `to_u32`.
    pub fn from_u32(word: u32) -> Color {
        Color(word.to_be_bytes())
    }
}

/// Iterates the recurrence for `c` and returns how many steps ran
/// before `|z|` reached `escape_radius`, or `max_iterations` if it
/// never did.  The test happens before every step, so a `c` already
/// outside the radius returns 0.  An orbit that overflows to NaN
/// fails the comparison and counts as escaped.
pub fn escape_time(c: Complex<f64>, max_iterations: usize, escape_radius: f64) -> usize {
    let mut z = c;
    let mut i = 0;
    while i < max_iterations && z.norm() < escape_radius {
        z = (z * c).cos().exp();
        i += 1;
    }
    i
}

/// Maps an iteration count onto the color ramp.  A cap of zero is
/// treated as "escaped immediately".
pub fn colorize(iterations: usize, max_iterations: usize) -> Color {
    let k = if max_iterations == 0 {
        0.0
    } else {
        iterations as f64 / max_iterations as f64
    };
    let channel = |low: f64| (low * (1.0 - k) + 255.0 * k) as u8;
    Color([channel(0.0), channel(80.0), channel(140.0), 255])
}

/// The color of pixel (px, py) under `config`.
pub fn evaluate(px: usize, py: usize, config: &RenderConfig) -> Color {
    let c = config.pixel_to_point(px, py);
    let i = escape_time(c, config.max_iterations(), config.escape_radius());
    colorize(i, config.max_iterations())
}
