//! LED color set task
//!
//! Waits for the next color, writes all three lamps from it, then holds the
//! result for the dwell time so it stays visible even when more colors are
//! already queued.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::TimingConfig;
use crate::hardware::LampOutput;
use crate::queue::BoundedQueue;
use crate::scheduler::TickScheduler;
use crate::types::Color;
use crate::{log_debug, log_info, log_warn};

/// Consumer side of the color queue; sole owner of the lamps
pub struct ConsumerTask<'q, M: RawMutex, S, L, const N: usize> {
    queue: &'q BoundedQueue<M, Color, N>,
    scheduler: S,
    lamps: L,
    timing: TimingConfig,
}

impl<'q, M, S, L, const N: usize> ConsumerTask<'q, M, S, L, N>
where
    M: RawMutex,
    S: TickScheduler,
    L: LampOutput,
{
    pub fn new(
        queue: &'q BoundedQueue<M, Color, N>,
        scheduler: S,
        lamps: L,
        timing: TimingConfig,
    ) -> Self {
        Self {
            queue,
            scheduler,
            lamps,
            timing,
        }
    }

    pub fn lamps(&self) -> &L {
        &self.lamps
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Write `color` to the lamps; failures are logged, not fatal
    pub fn show(&mut self, color: Color) {
        if self.lamps.apply(color).is_err() {
            log_warn!("lamp write failed for {}", color);
        }
        for (lamp, on) in color.lamp_states() {
            log_debug!("{} lamp {}", lamp.name(), if on { "on" } else { "off" });
        }
    }

    /// Receive one color, show it and dwell
    pub async fn step(&mut self) -> Color {
        let color = self.queue.pop().await;
        self.show(color);
        log_info!("color {} ({} queued)", color, self.queue.size());
        self.scheduler.delay(self.timing.dwell_ticks()).await;
        color
    }

    /// Consume colors forever
    pub async fn run(&mut self) {
        log_info!("starting receiver task");

        loop {
            self.step().await;
        }
    }
}
