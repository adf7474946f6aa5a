use crate::state::SessionState;
use indicatif::{ProgressBar, ProgressStyle};

/// Completion bar shown beneath the prompt
pub struct SessionProgress {
    bar: ProgressBar,
}

impl SessionProgress {
    /// Create a bar for `state`; a hidden bar when `visible` is false
    pub fn new(state: &SessionState, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(state.total as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} annotated {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        bar.set_position(state.completed as u64);
        Self { bar }
    }

    /// Run `f` with the bar cleared from the terminal (prompts and output)
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    pub fn update(&self, state: &SessionState) {
        self.bar.set_position(state.completed as u64);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}
