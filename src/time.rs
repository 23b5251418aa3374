//! Fixed-step clock for the deferred-task scheduler.
//!
//! The draw loop runs at a variable frame rate. [`Clock`] accumulates
//! wall-clock milliseconds and hands out whole ticks, so the 1 s advance
//! delay and the 3 s reset window are counted in ticks and stay
//! deterministic under test.

/// Longest gap (ms) credited in one frame. A backgrounded tab resumes with
/// at most this much elapsed time.
const MAX_FRAME_MS: f64 = 500.0;

pub struct Clock {
    ms_per_tick: f64,
    carry_ms: f64,
    last_ms: Option<f64>,
}

impl Clock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            carry_ms: 0.0,
            last_ms: None,
        }
    }

    /// Feed a timestamp (`performance.now()`); returns whole ticks elapsed
    /// since the previous call. The first call only records the timestamp.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let elapsed = match self.last_ms {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        self.carry_ms += elapsed;
        let ticks = (self.carry_ms / self.ms_per_tick) as u32;
        self.carry_ms -= ticks as f64 * self.ms_per_tick;
        ticks
    }
}
