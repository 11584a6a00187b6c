//! LED color selection task
//!
//! Runs a two-phase duty cycle forever:
//!
//! 1. **Burst**: push a random color, pause a random fraction of a second,
//!    repeat until the burst window has elapsed. A full queue drops the
//!    color; the producer never waits on the consumer.
//! 2. **Idle**: stay quiet for the idle interval.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::{TimingConfig, COLOR_VALUES};
use crate::error::TryPushError;
use crate::queue::BoundedQueue;
use crate::random::RandomSource;
use crate::scheduler::TickScheduler;
use crate::types::Color;
use crate::{log_debug, log_info, log_warn};

/// Outcome of one burst phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub struct BurstReport {
    /// Colors generated
    pub attempted: u32,
    /// Colors accepted by the queue
    pub pushed: u32,
    /// Colors rejected because the queue was full
    pub dropped: u32,
    /// Ticks between burst start and the last check
    pub elapsed_ticks: u64,
}

/// Producer side of the color queue
pub struct ProducerTask<'q, M: RawMutex, S, R, const N: usize> {
    queue: &'q BoundedQueue<M, Color, N>,
    scheduler: S,
    rng: R,
    timing: TimingConfig,
}

impl<'q, M, S, R, const N: usize> ProducerTask<'q, M, S, R, N>
where
    M: RawMutex,
    S: TickScheduler,
    R: RandomSource,
{
    pub fn new(
        queue: &'q BoundedQueue<M, Color, N>,
        scheduler: S,
        rng: R,
        timing: TimingConfig,
    ) -> Self {
        Self {
            queue,
            scheduler,
            rng,
            timing,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Uniform draw over all lamp combinations
    pub fn next_color(&mut self) -> Color {
        Color::from_bits(self.rng.next_below(COLOR_VALUES) as u8)
    }

    /// Uniform pause in `[0, tick_rate)` ticks
    pub fn next_pause(&mut self) -> u64 {
        self.rng.next_below(self.timing.max_pause_ticks())
    }

    /// Push `color` without waiting; a full queue drops it
    pub fn send(&mut self, color: Color) -> bool {
        match self.queue.try_push(color) {
            Ok(()) => {
                log_debug!("queued {}", color);
                true
            }
            Err(TryPushError::Full(dropped)) => {
                log_warn!("queue full, dropped {}", dropped);
                false
            }
        }
    }

    /// Run one burst phase
    ///
    /// At least one color is generated; the phase ends at the first check
    /// where the elapsed ticks reach the burst window.
    pub async fn run_burst(&mut self) -> BurstReport {
        log_info!("queue size begin: {}", self.queue.size());

        let window = self.timing.burst_window_ticks();
        let start = self.scheduler.now();
        let mut report = BurstReport::default();

        loop {
            let color = self.next_color();
            report.attempted += 1;
            if self.send(color) {
                report.pushed += 1;
            } else {
                report.dropped += 1;
            }

            let pause = self.next_pause();
            self.scheduler.delay(pause).await;

            report.elapsed_ticks = self.scheduler.now().wrapping_sub(start);
            if report.elapsed_ticks >= window {
                break;
            }
        }

        log_info!("queue size end: {}", self.queue.size());
        report
    }

    /// Run the idle phase
    pub async fn idle(&mut self) {
        self.scheduler.delay(self.timing.idle_ticks()).await;
    }

    /// Alternate burst and idle phases forever
    pub async fn run(&mut self) {
        log_info!("starting sender task");

        loop {
            let report = self.run_burst().await;
            log_info!(
                "burst done: {} sent, {} dropped in {} ticks",
                report.pushed,
                report.dropped,
                report.elapsed_ticks
            );
            self.idle().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockScheduler, ScriptedRandom};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    type TestQueue = BoundedQueue<NoopRawMutex, Color, 10>;

    fn timing() -> TimingConfig {
        TimingConfig::new(1000)
    }

    #[test]
    fn burst_ends_at_window_boundary() {
        let queue = TestQueue::new(10).unwrap();
        // color, pause pairs: four pauses reach 3996, the fifth crosses 4000
        let rng = ScriptedRandom::new(&[1, 999, 2, 999, 3, 999, 4, 999, 5, 10]);
        let mut producer = ProducerTask::new(&queue, MockScheduler::new(), rng, timing());

        let report = block_on(producer.run_burst());

        assert_eq!(report.attempted, 5);
        assert_eq!(report.pushed, 5);
        assert_eq!(report.elapsed_ticks, 4 * 999 + 10);
        assert!(report.elapsed_ticks >= timing().burst_window_ticks());
    }

    #[test]
    fn burst_stops_exactly_on_window() {
        let queue = TestQueue::new(10).unwrap();
        let rng = ScriptedRandom::new(&[0, 800]);
        let mut producer = ProducerTask::new(&queue, MockScheduler::new(), rng, timing());
        // 5 pauses of 800 ticks land exactly on 4000
        let report = block_on(producer.run_burst());

        assert_eq!(report.attempted, 5);
        assert_eq!(report.elapsed_ticks, 4000);
    }

    #[test]
    fn slow_scheduler_gives_single_attempt() {
        let queue = TestQueue::new(10).unwrap();
        let rng = ScriptedRandom::new(&[6, 0]);
        // Other tasks keep the producer off the CPU for the whole window
        let scheduler = MockScheduler::new().with_latency(5000);
        let mut producer = ProducerTask::new(&queue, scheduler, rng, timing());

        let report = block_on(producer.run_burst());

        assert_eq!(report.attempted, 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn zero_successful_sends_is_valid() {
        let queue = TestQueue::new(1).unwrap();
        queue.try_push(Color::WHITE).unwrap();
        let rng = ScriptedRandom::new(&[3, 999]);
        let mut producer = ProducerTask::new(&queue, MockScheduler::new(), rng, timing());

        let report = block_on(producer.run_burst());

        assert_eq!(report.pushed, 0);
        assert_eq!(report.dropped, report.attempted);
        assert_eq!(queue.try_pop(), Some(Color::WHITE));
    }

    #[test]
    fn full_queue_drops_without_blocking() {
        let queue = TestQueue::new(10).unwrap();
        // zero pauses: every attempt happens at the same tick until the
        // scripted 4000-tick pause ends the burst
        let mut script = std::vec::Vec::new();
        for i in 0..14u64 {
            script.extend_from_slice(&[i % 8, 0]);
        }
        script.extend_from_slice(&[7, 4000]);
        let rng = ScriptedRandom::new(&script);
        let mut producer = ProducerTask::new(&queue, MockScheduler::new(), rng, timing());

        let report = block_on(producer.run_burst());

        assert_eq!(report.attempted, 15);
        assert_eq!(report.pushed, 10);
        assert_eq!(report.dropped, 5);
        let drained: std::vec::Vec<u8> = core::iter::from_fn(|| queue.try_pop())
            .map(Color::bits)
            .collect();
        assert_eq!(drained, [0, 1, 2, 3, 4, 5, 6, 7, 0, 1]);
    }

    #[test]
    fn pauses_are_drawn_below_one_second() {
        let queue = TestQueue::new(10).unwrap();
        let rng = ScriptedRandom::new(&[0, 999]);
        let mut producer = ProducerTask::new(&queue, MockScheduler::new(), rng, timing());

        block_on(producer.run_burst());

        let scheduler = producer.scheduler();
        assert!(scheduler.delays().iter().all(|&d| d < 1000));
        assert_eq!(&producer.rng.bounds_seen()[..2], &[8, 1000]);
    }

    #[test]
    fn idle_waits_sixteen_seconds() {
        let queue = TestQueue::new(10).unwrap();
        let mut producer =
            ProducerTask::new(&queue, MockScheduler::new(), ScriptedRandom::new(&[0]), timing());

        block_on(producer.idle());

        assert_eq!(producer.scheduler().delays(), &[16_000]);
        assert_eq!(producer.scheduler().now(), 16_000);
    }
}
