//! Advisory progress reporting for long renders.

/// Receives scanline progress from the render loop.
///
/// Called from worker threads during a parallel render, so implementations
/// must be thread safe. Reports are advisory; nothing depends on them.
pub trait Progress: Send + Sync {
    /// A scanline finished; `remaining` rows are still to go.
    fn scanlines_remaining(&self, remaining: u32);

    /// The render finished and every pixel reached the sink.
    fn done(&self) {}
}

/// Discards all progress reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn scanlines_remaining(&self, _remaining: u32) {}
}

/// Reports progress through the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn scanlines_remaining(&self, remaining: u32) {
        log::debug!("Scanlines remaining: {}", remaining);
    }

    fn done(&self) {
        log::debug!("Done.");
    }
}
