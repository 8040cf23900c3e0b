//! Per-frame processing stats, summarised at shutdown

use std::time::{Duration, Instant};

use crate::error::FrameError;

#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    pub frames: usize,
    pub no_face: usize,
    pub head_turned: usize,
    pub invalid: usize,
    pub processed: usize,
    pub chords: usize,
    pub total: Duration,
    pub max: Duration,
}

impl FrameStats {
    pub fn record_skip(&mut self, error: &FrameError) {
        self.frames += 1;
        match error {
            FrameError::NoFaceDetected => self.no_face += 1,
            FrameError::HeadTurned(_) => self.head_turned += 1,
            FrameError::DegenerateGeometry(_) | FrameError::LandmarkCount(_) => self.invalid += 1,
        }
    }

    pub fn record_processed(&mut self, duration: Duration, chords: usize) {
        self.frames += 1;
        self.processed += 1;
        self.chords += chords;
        self.total += duration;
        self.max = self.max.max(duration);
    }

    pub fn mean(&self) -> Duration {
        if self.processed == 0 {
            Duration::ZERO
        } else {
            let nanos = self.total.as_nanos() / self.processed as u128;
            Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
        }
    }

    pub fn summary(&self) -> String {
        if self.frames == 0 {
            return "No frames processed.".to_string();
        }
        format!(
            "Frames (n={}): processed={} no_face={} head_turned={} invalid={} chords={} avg={:.2}ms max={:.2}ms",
            self.frames,
            self.processed,
            self.no_face,
            self.head_turned,
            self.invalid,
            self.chords,
            self.mean().as_secs_f64() * 1000.0,
            self.max.as_secs_f64() * 1000.0,
        )
    }
}

/// Timer helper for one classified frame
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn finish(self, stats: &mut FrameStats, chords: usize) {
        stats.record_processed(self.start.elapsed(), chords);
    }
}
