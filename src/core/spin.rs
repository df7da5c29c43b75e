use std::f64::consts::TAU;

/// Constant per-frame rotation about a single axis.
///
/// The angle is derived from the frame count instead of being accumulated,
/// so frame N always yields the same angle no matter how it was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    rate: f32,
    frames: u64,
}

impl Spin {
    /// `rate` in radians per frame
    pub fn new(rate: f32) -> Self {
        Self { rate, frames: 0 }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance by one frame
    pub fn advance(&mut self) {
        self.frames += 1;
    }

    pub fn advance_by(&mut self, frames: u64) {
        self.frames += frames;
    }

    /// Total rotation so far, unwrapped
    pub fn total_angle(&self) -> f64 {
        self.frames as f64 * self.rate as f64
    }

    /// Current angle in `[0, 2π)`
    pub fn angle(&self) -> f32 {
        Self::angle_at(self.rate, self.frames)
    }

    pub fn angle_at(rate: f32, frames: u64) -> f32 {
        let angle = (frames as f64 * rate as f64).rem_euclid(TAU) as f32;
        // Values just below 2π in f64 can round up to TAU in f32
        if angle >= std::f32::consts::TAU {
            0.0
        } else {
            angle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let spin = Spin::new(0.002);
        assert_eq!(spin.angle(), 0.0);
        assert_eq!(spin.frames(), 0);
    }

    #[test]
    fn single_step_adds_rate() {
        let mut spin = Spin::new(0.002);
        spin.advance();
        assert!((spin.angle() - 0.002).abs() < 1e-7);
    }

    #[test]
    fn wraps_below_tau() {
        let mut spin = Spin::new(1.0);
        spin.advance_by(7);
        let angle = spin.angle();
        assert!(angle >= 0.0 && angle < std::f32::consts::TAU);
        assert!((angle as f64 - (7.0 - TAU)).abs() < 1e-6);
    }
}
