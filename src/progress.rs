//! Progress reporting.  The scheduler tells a `Progress` sink when each
//! worker starts and stops and how long the whole render took.  Sinks
//! only observe; nothing they do can change the image.

use log::info;
use std::time::Duration;

/// Receives timing events from a render.  Every method defaults to
/// doing nothing.
pub trait Progress: Sync {
    /// Worker `id` is about to start claiming tiles.
    fn worker_started(&self, _id: usize) {}

    /// Worker `id` found the queue empty after processing `tiles` tiles.
    fn worker_finished(&self, _id: usize, _tiles: usize, _elapsed: Duration) {}

    /// All workers have been joined.
    fn render_finished(&self, _elapsed: Duration) {}
}

/// Discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct Quiet;

impl Progress for Quiet {}

/// Reports through the `log` facade at info level.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogProgress;

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs() as f64 * 1000.0 + f64::from(elapsed.subsec_nanos()) / 1_000_000.0
}

impl Progress for LogProgress {
    fn worker_started(&self, id: usize) {
        info!("Worker {} started", id);
    }

    fn worker_finished(&self, id: usize, tiles: usize, elapsed: Duration) {
        info!(
            "Worker {} stopped after {} tiles in {:.3}ms",
            id,
            tiles,
            millis(elapsed)
        );
    }

    fn render_finished(&self, elapsed: Duration) {
        info!("Total render time {:.3}ms", millis(elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_keeps_fractions() {
        assert_eq!(millis(Duration::from_micros(1500)), 1.5);
        assert_eq!(millis(Duration::from_secs(2)), 2000.0);
    }
}
