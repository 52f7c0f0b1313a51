//! Fixed-step clock. Real frame time is accumulated and drained in constant
//! `fixed_dt` slices; the caller runs one simulation tick per `should_step()`
//! that returns true and renders once per frame afterwards.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

pub const DEFAULT_FIXED_DT: f64 = 1.0 / 60.0;
pub const DEFAULT_MAX_BACKLOG: f64 = 0.1;

pub struct TimeState {
    pub fixed_dt: f64,
    /// Upper bound on unsimulated time. Anything above it is dropped.
    pub max_accumulator: f64,
    accumulator: f64,
    pub total_time: f64,
    pub fixed_step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,
    /// Seconds of backlog thrown away by the cap since creation.
    pub discarded_time: f64,
    last_instant: Instant,
    pub interpolation_alpha: f64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new() -> Self {
        Self::with_fixed_dt(DEFAULT_FIXED_DT)
    }

    pub fn with_fixed_dt(fixed_dt: f64) -> Self {
        Self {
            fixed_dt,
            max_accumulator: DEFAULT_MAX_BACKLOG,
            accumulator: 0.0,
            total_time: 0.0,
            fixed_step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            discarded_time: 0.0,
            last_instant: Instant::now(),
            interpolation_alpha: 0.0,
            fps_samples: [fixed_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / fixed_dt,
            smoothed_frame_time_ms: fixed_dt * 1000.0,
        }
    }

    /// Starts a frame using wall-clock time since the previous frame.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.begin_frame_with_dt(real_dt);
    }

    /// Starts a frame with an explicit elapsed time. Identical sequences of
    /// `real_dt` always produce identical step counts.
    pub fn begin_frame_with_dt(&mut self, real_dt: f64) {
        self.real_dt = real_dt.max(0.0);
        self.accumulator += self.real_dt;

        // Spiral-of-death cap
        if self.accumulator > self.max_accumulator {
            let excess = self.accumulator - self.max_accumulator;
            log::warn!(
                "Backlog of {:.1}ms exceeds cap, discarding {:.1}ms",
                self.accumulator * 1000.0,
                excess * 1000.0
            );
            self.discarded_time += excess;
            self.accumulator = self.max_accumulator;
        }

        self.steps_this_frame = 0;
        self.frame_count += 1;

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.total_time += self.fixed_dt;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }

    pub fn end_frame(&mut self) {
        self.interpolation_alpha = self.accumulator / self.fixed_dt;
    }

    pub fn pending_time(&self) -> f64 {
        self.accumulator
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(time: &mut TimeState) -> u32 {
        let mut steps = 0;
        while time.should_step() {
            steps += 1;
        }
        time.end_frame();
        steps
    }

    #[test]
    fn exact_tick_runs_one_step() {
        let mut time = TimeState::new();
        time.begin_frame_with_dt(DEFAULT_FIXED_DT);
        assert_eq!(drain(&mut time), 1);
        assert_eq!(time.steps_this_frame, 1);
        assert_eq!(time.fixed_step_count, 1);
    }

    #[test]
    fn short_frames_carry_remainder_forward() {
        let mut time = TimeState::new();
        time.begin_frame_with_dt(DEFAULT_FIXED_DT * 0.6);
        assert_eq!(drain(&mut time), 0);
        assert!(time.interpolation_alpha > 0.5);

        time.begin_frame_with_dt(DEFAULT_FIXED_DT * 0.6);
        assert_eq!(drain(&mut time), 1);
        assert!(time.pending_time() > 0.0);
        assert!(time.pending_time() < DEFAULT_FIXED_DT);
    }

    #[test]
    fn long_frame_runs_several_steps() {
        let mut time = TimeState::new();
        time.begin_frame_with_dt(DEFAULT_FIXED_DT * 3.5);
        assert_eq!(drain(&mut time), 3);
    }

    #[test]
    fn stall_is_capped_and_excess_discarded() {
        let mut time = TimeState::new();
        time.begin_frame_with_dt(2.0);
        let steps = drain(&mut time);
        // 100ms of backlog at 60Hz is six ticks, give or take float rounding.
        assert!((5..=6).contains(&steps), "ran {steps} steps");
        assert!(time.discarded_time > 1.8);
    }

    #[test]
    fn negative_dt_is_treated_as_zero() {
        let mut time = TimeState::new();
        time.begin_frame_with_dt(-1.0);
        assert_eq!(drain(&mut time), 0);
        assert_eq!(time.real_dt, 0.0);
    }

    #[test]
    fn identical_dt_sequences_give_identical_step_counts() {
        let deltas = [0.016, 0.021, 0.003, 0.5, 0.0166, 0.033, 0.001, 0.017];
        let mut a = TimeState::new();
        let mut b = TimeState::new();
        let mut counts_a = Vec::new();
        let mut counts_b = Vec::new();
        for dt in deltas {
            a.begin_frame_with_dt(dt);
            counts_a.push(drain(&mut a));
            b.begin_frame_with_dt(dt);
            counts_b.push(drain(&mut b));
        }
        assert_eq!(counts_a, counts_b);
        assert_eq!(a.pending_time().to_bits(), b.pending_time().to_bits());
    }
}
