//! Terminal progress for cells collapsed during a solve

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking collapsed cells across solve attempts
pub struct CollapseProgress {
    bar: ProgressBar,
    attempt: usize,
}

impl CollapseProgress {
    /// Bar over `cell_count` cells, drawn to stderr
    pub fn new(cell_count: usize) -> Self {
        Self::with_target(cell_count, ProgressDrawTarget::stderr())
    }

    /// Bar that tracks positions without drawing anything
    pub fn hidden(cell_count: usize) -> Self {
        Self::with_target(cell_count, ProgressDrawTarget::hidden())
    }

    fn with_target(cell_count: usize, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(cell_count as u64), target);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix("attempt 1");
        Self { bar, attempt: 1 }
    }

    /// Record the collapsed cell count of the running attempt
    ///
    /// A new attempt number resets the bar.
    pub fn update(&mut self, attempt: usize, collapsed: usize) {
        if attempt != self.attempt {
            self.attempt = attempt;
            self.bar.set_prefix(format!("attempt {attempt}"));
            self.bar.reset();
        }
        self.bar.set_position(collapsed as u64);
    }

    /// Cells collapsed in the current attempt
    pub fn position(&self) -> usize {
        self.bar.position() as usize
    }

    /// Attempt currently displayed
    pub const fn attempt(&self) -> usize {
        self.attempt
    }

    /// Fill the bar and close it with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_owned());
    }

    /// Close the bar where it stands with a final message
    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_owned());
    }
}
