//! The parallel half of the renderer.  The raster is cut into tiles
//! (see `tiles`), the tiles go into a queue, and a pool of workers
//! claims them one at a time until the queue runs dry.  Each worker
//! evaluates every pixel in the tiles it claims and writes the colors
//! straight into the caller's framebuffer.
//!
//! Claiming is a single atomic increment of the queue cursor, so every
//! tile goes to exactly one worker.  The tiles do not overlap, so the
//! framebuffer needs no locking at all.

use log::{debug, trace};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::errors::{ConfigError, RenderError};
use crate::evaluate::evaluate;
use crate::framebuffer::Framebuffer;
use crate::planes::RenderConfig;
use crate::progress::{Progress, Quiet};
use crate::tiles::{make_tiles, Tile};

/// An ordered list of tiles with a shared cursor.  Any number of
/// threads may call `claim` at once.
#[derive(Debug)]
pub struct TileQueue {
    tiles: Vec<Tile>,
    next: AtomicUsize,
}

impl TileQueue {
    /// Wraps a list of tiles; the first claim gets `tiles[0]`.
    pub fn new(tiles: Vec<Tile>) -> Self {
        TileQueue {
            tiles,
            next: AtomicUsize::new(0),
        }
    }

    /// Takes the next unclaimed tile along with its position in the
    /// queue, or None once every tile has been handed out.
    pub fn claim(&self) -> Option<(usize, Tile)> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        self.tiles.get(index).map(|tile| (index, *tile))
    }

    /// Total number of tiles, claimed or not.
    pub fn size(&self) -> usize {
        self.tiles.len()
    }
}

/// Renders a configuration into a framebuffer with a fixed tile
/// granularity and worker count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileScheduler {
    granularity: usize,
    workers: usize,
}

impl TileScheduler {
    /// `granularity` is the number of tile divisions per axis,
    /// `workers` the size of the pool.  Both must be at least 1.
    pub fn new(granularity: usize, workers: usize) -> Result<Self, ConfigError> {
        if granularity == 0 {
            return Err(ConfigError::ZeroGranularity);
        }
        if workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(TileScheduler {
            granularity,
            workers,
        })
    }

    /// Fills every pixel of `framebuffer` and returns once all workers
    /// are done.
    pub fn render(
        &self,
        framebuffer: &Framebuffer,
        config: &RenderConfig,
    ) -> Result<(), RenderError> {
        self.render_with_progress(framebuffer, config, &Quiet)
    }

    /// Allocates a framebuffer the size of the configured raster and
    /// renders into it.
    pub fn render_image(&self, config: &RenderConfig) -> Result<Framebuffer, RenderError> {
        let framebuffer = Framebuffer::for_config(config);
        self.render(&framebuffer, config)?;
        Ok(framebuffer)
    }

    /// `render`, reporting worker and run timings to `progress`.
    ///
    /// With a single worker everything happens on the calling thread.
    /// Otherwise `workers - 1` scoped threads are spawned and the
    /// calling thread drains the queue alongside them as worker 0.
    pub fn render_with_progress(
        &self,
        framebuffer: &Framebuffer,
        config: &RenderConfig,
        progress: &dyn Progress,
    ) -> Result<(), RenderError> {
        if framebuffer.width() != config.width() || framebuffer.height() != config.height() {
            return Err(RenderError::FramebufferMismatch(
                framebuffer.width(),
                framebuffer.height(),
                config.width(),
                config.height(),
            ));
        }

        let started = Instant::now();
        let queue = TileQueue::new(make_tiles(
            config.width(),
            config.height(),
            self.granularity,
        ));
        debug!(
            "Queued {} tiles for {} workers at granularity {}",
            queue.size(),
            self.workers,
            self.granularity
        );

        if self.workers == 1 {
            drain(0, &queue, framebuffer, config, progress);
        } else {
            let queue = &queue;
            crossbeam::scope(|spawner| {
                for id in 1..self.workers {
                    spawner.spawn(move |_| drain(id, queue, framebuffer, config, progress));
                }
                drain(0, queue, framebuffer, config, progress);
            })
            .map_err(|_| RenderError::WorkerPanicked)?;
        }

        progress.render_finished(started.elapsed());
        Ok(())
    }
}

/// One worker's life: claim tiles until there are none left.
fn drain(
    id: usize,
    queue: &TileQueue,
    framebuffer: &Framebuffer,
    config: &RenderConfig,
    progress: &dyn Progress,
) {
    progress.worker_started(id);
    let started = Instant::now();
    let mut claimed = 0;
    while let Some((index, tile)) = queue.claim() {
        claimed += 1;
        if tile.is_empty() {
            trace!("Worker {} skipping empty tile {} {:?}", id, index, tile);
            continue;
        }
        fill_tile(&tile, framebuffer, config);
    }
    progress.worker_finished(id, claimed, started.elapsed());
}

fn fill_tile(tile: &Tile, framebuffer: &Framebuffer, config: &RenderConfig) {
    for (x, y) in tile.pixels() {
        framebuffer.set(x, y, evaluate(x, y, config));
    }
}
