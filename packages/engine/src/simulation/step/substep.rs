/// Water ticks owed for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubSteps {
    /// Ticks to run now
    pub ticks: u32,
    /// Ticks discarded because the frame hit the catch-up cap
    pub dropped: u32,
}

impl SubSteps {
    pub fn capped(&self) -> bool {
        self.dropped > 0
    }
}

/// Elapsed time not yet converted into water ticks.
///
/// Owned by the driver and threaded through every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickAccumulator {
    elapsed: f64,
}

impl TickAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_seconds(&self) -> f64 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Add `dt` seconds and take out as many whole ticks as fit.
    ///
    /// Pending time is clamped to `0..=max_pending`. When more than
    /// `max_ticks` are owed, `max_ticks` run and the rest of the backlog is
    /// dropped.
    pub fn advance(&mut self, dt: f64, ticks_per_second: u32, max_ticks: u32, max_pending: f64) -> SubSteps {
        let dt = if dt.is_finite() { dt } else { 0.0 };
        self.elapsed = (self.elapsed + dt).clamp(0.0, max_pending.max(0.0));
        if ticks_per_second == 0 {
            return SubSteps::default();
        }

        let tps = ticks_per_second as f64;
        let owed = (self.elapsed * tps).floor() as u32;
        if owed > max_ticks {
            self.elapsed = 0.0;
            SubSteps {
                ticks: max_ticks,
                dropped: owed - max_ticks,
            }
        } else {
            self.elapsed -= owed as f64 / tps;
            SubSteps { ticks: owed, dropped: 0 }
        }
    }
}
