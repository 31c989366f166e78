#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tiled escape-time fractal renderer
//!
//! Every pixel of the output is mapped to a point `c` on a window of
//! the complex plane.  Starting from `z = c`, the renderer repeatedly
//! replaces `z` with `exp(cos(z * c))` and counts how many steps it
//! takes for `|z|` to leave a circle of fixed radius, giving up at an
//! iteration cap.  That count, as a fraction of the cap, is the color
//! of the pixel.
//!
//! Since no pixel depends on any other, the image is cut into a grid
//! of rectangular tiles and a pool of threads works through them,
//! each thread writing its own tiles straight into a shared
//! framebuffer.  The image comes out the same no matter how many
//! threads draw it or in what order the tiles are taken.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;

pub mod errors;
pub mod evaluate;
pub mod framebuffer;
pub mod output;
pub mod parse;
pub mod planes;
pub mod progress;
pub mod scheduler;
pub mod tiles;

pub use errors::{ConfigError, RenderError};
pub use evaluate::{evaluate, Color};
pub use framebuffer::Framebuffer;
pub use output::write_png;
pub use planes::{ComplexPlane, IntegralPlane, RenderConfig};
pub use progress::{LogProgress, Progress, Quiet};
pub use scheduler::{TileQueue, TileScheduler};
pub use tiles::{make_tiles, Tile};
