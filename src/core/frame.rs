use std::time::Instant;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Hands out one `FrameInfo` per presented frame
#[derive(Debug)]
pub struct FrameClock {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Produce the next frame stamped with `now`
    pub fn tick_at(&mut self, now: Instant) -> FrameInfo {
        let delta = now.saturating_duration_since(self.last_frame_time).as_secs_f32();
        let time = now.saturating_duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;
        info
    }

    pub fn tick(&mut self) -> FrameInfo {
        self.tick_at(Instant::now())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameClock {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        Some(self.tick())
    }
}

/// Frames-per-second averaged over a fixed window
#[derive(Debug, Clone, Copy)]
pub struct FpsMeter {
    window: f32,
    elapsed: f32,
    frames: u32,
    fps: f32,
}

impl FpsMeter {
    pub fn new(window: f32) -> Self {
        Self {
            window,
            elapsed: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Record one frame; returns the new average when a window closes
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.window {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Stop condition for the render loop besides closing the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunLimit {
    max_frames: Option<u64>,
}

impl RunLimit {
    pub fn unlimited() -> Self {
        Self { max_frames: None }
    }

    pub fn frames(max_frames: u64) -> Self {
        Self {
            max_frames: Some(max_frames),
        }
    }

    /// True once `rendered` frames exhaust the budget
    pub fn reached(&self, rendered: u64) -> bool {
        self.max_frames.is_some_and(|max| rendered >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clock_numbers_frames_sequentially() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        let a = clock.tick_at(start);
        let b = clock.tick_at(start + Duration::from_millis(16));
        assert_eq!(a.number, 0);
        assert_eq!(b.number, 1);
        assert!((b.delta - 0.016).abs() < 1e-4);
        assert_eq!(clock.frame_number(), 2);
    }

    #[test]
    fn fps_meter_reports_once_per_window() {
        let mut meter = FpsMeter::new(1.0);
        let reports: Vec<f32> = (0..150).filter_map(|_| meter.record(1.0 / 60.0)).collect();
        assert_eq!(reports.len(), 2);
        assert!((reports[0] - 60.0).abs() < 1.0);
    }

    #[test]
    fn run_limit_budget() {
        assert!(!RunLimit::unlimited().reached(u64::MAX));
        let limit = RunLimit::frames(3);
        assert!(!limit.reached(2));
        assert!(limit.reached(3));
    }
}
