//! Performance measurement tools.

use std::{
    fmt,
    time::{Duration, Instant},
};

/// Logs frames per second along with extra data.
pub struct FpsCounter {
    name: String,
    frames: u32,
    start: Instant,
}

impl FpsCounter {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            frames: 0,
            start: Instant::now(),
        }
    }

    /// Advances the frame counter by 1 and logs FPS and `extra` data if one second has passed.
    ///
    /// The logged string will also include the counter's name passed to [`FpsCounter::new`].
    pub fn tick_with<D: fmt::Display>(&mut self, extra: D) {
        self.frames += 1;
        if self.start.elapsed() > Duration::from_secs(1) {
            log::debug!("{}: {} FPS ({})", self.name, self.frames, extra);

            self.frames = 0;
            self.start = Instant::now();
        }
    }
}
