//! # nightglow-adapter-virtual
//!
//! In-memory LED strip implementing the
//! [`PixelDriver`](nightglow_app::ports::PixelDriver) port.
//!
//! The daemon uses it when no hardware driver is wired in, and tests use it
//! to observe exactly what the renderer committed. Every frame is also
//! emitted as a `trace` event so a running fade can be followed in the logs.
//!
//! ## Dependency rule
//!
//! Depends on `nightglow-app` (port traits) and `nightglow-domain` only.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nightglow_app::ports::PixelDriver;
use nightglow_domain::color::{BLACK, Rgb};

#[derive(Debug)]
struct StripState {
    pixels: Vec<Rgb>,
    commits: usize,
}

/// A strip of `pixel_count` pixels held in memory.
#[derive(Debug)]
pub struct VirtualStrip {
    state: Arc<Mutex<StripState>>,
}

impl VirtualStrip {
    /// Create a strip with every pixel off.
    #[must_use]
    pub fn new(pixel_count: u16) -> Self {
        let state = StripState {
            pixels: vec![BLACK; usize::from(pixel_count)],
            commits: 0,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A read-only handle that stays valid after the strip is moved into
    /// the scheduler.
    #[must_use]
    pub fn view(&self) -> StripView {
        StripView {
            state: Arc::clone(&self.state),
        }
    }
}

impl PixelDriver for VirtualStrip {
    fn set_all(&mut self, color: Rgb) {
        let mut state = lock(&self.state);
        state.pixels.fill(color);
        state.commits += 1;
        tracing::trace!(
            r = color.r,
            g = color.g,
            b = color.b,
            commits = state.commits,
            "virtual strip committed"
        );
    }
}

/// Shared view onto a [`VirtualStrip`].
#[derive(Debug, Clone)]
pub struct StripView {
    state: Arc<Mutex<StripState>>,
}

impl StripView {
    /// Snapshot of every pixel.
    #[must_use]
    pub fn pixels(&self) -> Vec<Rgb> {
        lock(&self.state).pixels.clone()
    }

    /// Number of frames committed so far.
    #[must_use]
    pub fn commits(&self) -> usize {
        lock(&self.state).commits
    }

    /// Color of the last committed frame, `None` before the first commit.
    #[must_use]
    pub fn last_color(&self) -> Option<Rgb> {
        let state = lock(&self.state);
        if state.commits == 0 {
            return None;
        }
        state.pixels.first().copied()
    }
}

fn lock(state: &Mutex<StripState>) -> MutexGuard<'_, StripState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
