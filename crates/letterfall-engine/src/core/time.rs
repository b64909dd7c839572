/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Largest frame delta accepted in one call; longer stalls are dropped.
    max_frame_dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    /// Default frame-delta clamp in seconds.
    pub const DEFAULT_MAX_FRAME_DT: f32 = 0.1;

    pub fn new(dt: f32) -> Self {
        Self::with_max_frame(dt, Self::DEFAULT_MAX_FRAME_DT)
    }

    pub fn with_max_frame(dt: f32, max_frame_dt: f32) -> Self {
        Self {
            dt,
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // Clamp to prevent spiral of death after tab switches or long stalls
        self.accumulator += frame_dt.clamp(0.0, self.max_frame_dt);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(0.008); // half a frame
        assert_eq!(steps, 0);
        let steps = ts.accumulate(0.010); // over one frame total
        assert_eq!(steps, 1);
    }

    #[test]
    fn clamps_long_frames() {
        let mut ts = FixedTimestep::with_max_frame(0.125, 0.5);
        let steps = ts.accumulate(3.0); // clamped to 0.5s
        assert_eq!(steps, 4);
        assert_eq!(ts.accumulate(0.0), 0);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(0.125);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.accumulate(0.008);
        let a = ts.alpha();
        assert!(a >= 0.0 && a <= 1.0, "alpha was {}", a);
    }
}
