use std::time::Duration;

use tokio::time::Instant;

/// Measures the spacing of ticks, smoothed so a single late tick doesn't
/// swing the reported rate.
pub struct TickClock {
    last: Option<Instant>,
    average: Option<Duration>,
}

impl TickClock {
    const SMOOTHING: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            last: None,
            average: None,
        }
    }

    pub fn begin_tick(&mut self, now: Instant) {
        if let Some(last) = self.last {
            let elapsed = now.saturating_duration_since(last);
            self.average = Some(match self.average {
                Some(average) => average.mul_f64(1.0 - Self::SMOOTHING)
                    + elapsed.mul_f64(Self::SMOOTHING),
                None => elapsed,
            });
        }

        self.last = Some(now);
    }

    pub fn ticktime(&self) -> Option<Duration> {
        self.average
    }

    /// Ticks per second, `0.0` until two ticks were seen.
    pub fn tick_rate(&self) -> f32 {
        match self.ticktime() {
            Some(average) if !average.is_zero() => 1.0 / average.as_secs_f32(),
            _ => 0.0,
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
