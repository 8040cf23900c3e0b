//! Frame-count hysteresis shared by every gesture channel.
//!
//! Windows are counted in frames, not wall-clock time, so the effective
//! timeout scales with the capture frame rate.

/// Default wait window, in frames.
pub const WAIT_FRAMES: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTimer {
    window: u32,
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new(WAIT_FRAMES)
    }
}

impl DebounceTimer {
    pub const fn new(window: u32) -> Self {
        Self { window }
    }

    pub const fn window(&self) -> u32 {
        self.window
    }

    /// Age an active flag by one frame. Once its age exceeds the window the
    /// flag drops and the counter returns to zero.
    pub fn advance(&self, active: bool, frames: u32) -> (bool, u32) {
        let frames = if active { frames.saturating_add(1) } else { frames };
        if frames > self.window {
            (false, 0)
        } else {
            (active, frames)
        }
    }

    /// Same as [`advance`](Self::advance) for a repetition counter: a
    /// non-zero count is active, and expiry zeroes it.
    pub fn expire(&self, count: u32, frames: u32) -> (u32, u32) {
        let (active, frames) = self.advance(count > 0, frames);
        (if active { count } else { 0 }, frames)
    }

    /// Count one more frame of a held gesture. Returns `true` (and restarts
    /// the count) each time the window is exceeded, so a held gesture fires
    /// repeatedly.
    pub fn accumulate(&self, frames: &mut u32) -> bool {
        let (_, next) = self.advance(true, *frames);
        if next == 0 {
            *frames = 0;
            true
        } else {
            *frames = next;
            false
        }
    }

    /// Whether a flag aged `frames` is still inside the window.
    pub fn within(&self, frames: u32) -> bool {
        frames < self.window
    }

    /// Whether a gap of `frames` has run past the window.
    pub fn expired(&self, frames: u32) -> bool {
        frames > self.window
    }
}
