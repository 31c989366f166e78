// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong before or during a render.  Bad
//! configurations are caught when a `RenderConfig` or a
//! `TileScheduler` is constructed, so a render that starts always
//! finishes unless a worker thread panics.

use failure::Fail;

/// Rejected configuration values.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// The real axis of the plane is empty or inverted.
    #[fail(display = "Real bounds must satisfy min < max (got {} to {})", _0, _1)]
    InvalidRealBounds(f64, f64),

    /// The imaginary axis of the plane is empty or inverted.
    #[fail(display = "Imaginary bounds must satisfy min < max (got {} to {})", _0, _1)]
    InvalidImaginaryBounds(f64, f64),

    /// One of the pixel dimensions is zero.
    #[fail(display = "Image size must be at least 1x1 (got {}x{})", _0, _1)]
    EmptyRaster(usize, usize),

    /// The pixel count of the raster does not fit in memory addressing.
    #[fail(display = "Image size {}x{} is too large", _0, _1)]
    RasterTooLarge(usize, usize),

    /// The iteration cap is zero.
    #[fail(display = "Iteration count must be at least 1")]
    ZeroIterations,

    /// The escape radius is zero, negative or not a number.
    #[fail(display = "Escape radius must be positive (got {})", _0)]
    InvalidEscapeRadius(f64),

    /// The tile grid has no divisions.
    #[fail(display = "Granularity must be at least 1")]
    ZeroGranularity,

    /// The worker pool is empty.
    #[fail(display = "Worker count must be at least 1")]
    ZeroWorkers,
}

/// Failures raised by the scheduler itself.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The framebuffer handed to the scheduler does not have the
    /// dimensions of the configured raster.
    #[fail(
        display = "Framebuffer is {}x{} but the configuration asks for {}x{}",
        _0, _1, _2, _3
    )]
    FramebufferMismatch(usize, usize, usize, usize),

    /// A worker thread panicked; the framebuffer contents are undefined.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,
}
