//! Frame pacing for the render loop
//!
//! The simulation advances in whole frames of `1 / frame_rate` seconds. The
//! render loop runs at whatever rate the platform gives it, so elapsed time
//! is accumulated and converted into a number of simulation frames.

use crate::consts::MAX_SUBSTEPS;

/// Longest wall-clock gap fed into the accumulator (seconds)
const MAX_FRAME_GAP: f32 = 0.25;

/// Fixed-step accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            step: 1.0 / frame_rate.max(1) as f32,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Seconds per simulation frame
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add `dt` seconds of wall-clock time; returns how many simulation
    /// frames to run now.
    ///
    /// Gaps (tab in background, debugger) are clamped, and a backlog beyond
    /// `max_substeps` is dropped to prevent a spiral of death.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_GAP);

        let mut frames = 0;
        while self.accumulator >= self.step && frames < self.max_substeps {
            self.accumulator -= self.step;
            frames += 1;
        }
        if frames == self.max_substeps && self.accumulator >= self.step {
            self.accumulator = 0.0;
        }
        frames
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Number of frames the FPS is averaged over
const FPS_WINDOW: usize = 60;

/// Rolling frames-per-second counter
#[derive(Debug, Clone)]
pub struct FpsCounter {
    /// Frame timestamps in milliseconds (ring buffer)
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Record a rendered frame at `time_ms`
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one about to be overwritten
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time_ms - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
