//! Scheduler contract consumed by the tasks
//!
//! Tasks measure time in scheduler ticks. [`EmbassyScheduler`] maps ticks
//! onto `embassy-time`; tests substitute a virtual clock.

use embassy_time::{Duration, Instant, Timer, TICK_HZ};

/// Tick counter and suspending delay
#[allow(async_fn_in_trait)]
pub trait TickScheduler {
    /// Monotonic tick count since boot
    fn now(&self) -> u64;

    /// Suspend the calling task for `ticks` ticks
    ///
    /// A zero delay still yields to the executor.
    async fn delay(&mut self, ticks: u64);
}

/// [`TickScheduler`] backed by the Embassy time driver
#[derive(Clone, Copy, Debug)]
pub struct EmbassyScheduler {
    tick_rate_hz: u32,
}

impl EmbassyScheduler {
    pub const fn new(tick_rate_hz: u32) -> Self {
        Self { tick_rate_hz }
    }

    /// Convert scheduler ticks to an Embassy duration
    pub fn ticks_to_duration(&self, ticks: u64) -> Duration {
        Duration::from_ticks(ticks.saturating_mul(TICK_HZ) / self.tick_rate_hz as u64)
    }

    /// Convert an Embassy instant to scheduler ticks
    pub fn instant_to_ticks(&self, instant: Instant) -> u64 {
        instant.as_ticks().saturating_mul(self.tick_rate_hz as u64) / TICK_HZ
    }
}

impl TickScheduler for EmbassyScheduler {
    fn now(&self) -> u64 {
        self.instant_to_ticks(Instant::now())
    }

    async fn delay(&mut self, ticks: u64) {
        if ticks == 0 {
            embassy_futures::yield_now().await;
        } else {
            Timer::after(self.ticks_to_duration(ticks)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_conversion_round_trips_whole_seconds() {
        let scheduler = EmbassyScheduler::new(1000);
        let duration = scheduler.ticks_to_duration(2000);
        assert_eq!(duration, Duration::from_secs(2));
        assert_eq!(
            scheduler.instant_to_ticks(Instant::from_ticks(duration.as_ticks())),
            2000
        );
    }

    #[test]
    fn one_tick_is_one_millisecond_at_1khz() {
        let scheduler = EmbassyScheduler::new(1000);
        assert_eq!(scheduler.ticks_to_duration(1), Duration::from_millis(1));
    }
}
