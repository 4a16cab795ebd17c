use glint_renderer::Progress;
use indicatif::{ProgressBar, ProgressStyle};

/// Scanline progress drawn on stderr.
pub struct ScanlineBar {
    bar: ProgressBar,
    total: u32,
}

impl ScanlineBar {
    pub fn new(total: u32) -> Self {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} lines ({per_sec}) {msg}",
        )
        .map(|style| style.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar, total }
    }
}

impl Progress for ScanlineBar {
    fn scanlines_remaining(&self, remaining: u32) {
        self.bar.set_position((self.total - remaining) as u64);
    }

    fn done(&self) {
        self.bar.finish_with_message("done");
    }
}
