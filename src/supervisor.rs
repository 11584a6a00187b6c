//! Application supervisor and monitoring
//!
//! This module prints the startup banner and periodically reports uptime
//! together with a snapshot of the color queue.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};

use crate::config::{self, TimingConfig};
use crate::log_info;
use crate::queue::BoundedQueue;
use crate::stats::StatsSnapshot;
use crate::types::{Color, APP_VERSION};

/// Queue status at one point in time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub struct QueueReport {
    pub occupied: usize,
    pub capacity: usize,
    pub stats: StatsSnapshot,
}

/// Application supervisor responsible for monitoring
pub struct AppSupervisor<'q, M: RawMutex, const N: usize> {
    queue: &'q BoundedQueue<M, Color, N>,
    timing: TimingConfig,
    uptime_seconds: u64,
    last_report: u64,
}

impl<'q, M: RawMutex, const N: usize> AppSupervisor<'q, M, N> {
    pub fn new(queue: &'q BoundedQueue<M, Color, N>, timing: TimingConfig) -> Self {
        Self {
            queue,
            timing,
            uptime_seconds: 0,
            last_report: 0,
        }
    }

    /// Print application startup banner
    pub fn print_startup_banner(&self) {
        log_info!("========================================");
        log_info!("ColorQueue v{}", APP_VERSION.as_string());
        log_info!("Producer/consumer LED color queue");
        log_info!("========================================");
        log_info!("Hardware: RP2040 (Raspberry Pi Pico)");
        log_info!(
            "Lamps: R=GPIO{} G=GPIO{} B=GPIO{}",
            config::LED_RED_PIN,
            config::LED_GREEN_PIN,
            config::LED_BLUE_PIN
        );
        log_info!("Queue capacity: {}", self.queue.capacity());
        log_info!(
            "Burst {}s / idle {}s / dwell {}s at {} Hz",
            self.timing.burst_window_secs,
            self.timing.idle_secs,
            self.timing.dwell_secs,
            self.timing.tick_rate_hz
        );
        log_info!("========================================");
    }

    /// Snapshot of queue occupancy and traffic
    pub fn queue_report(&self) -> QueueReport {
        QueueReport {
            occupied: self.queue.size(),
            capacity: self.queue.capacity(),
            stats: self.queue.stats(),
        }
    }

    /// Account for `seconds` of uptime, reporting once per status interval
    pub fn tick(&mut self, seconds: u64) -> Option<QueueReport> {
        self.uptime_seconds += seconds;
        if self.uptime_seconds - self.last_report < config::STATUS_INTERVAL_SECS {
            return None;
        }
        self.last_report = self.uptime_seconds;
        let report = self.queue_report();
        self.print_status(&report);
        Some(report)
    }

    /// Run the main supervisor loop
    pub async fn run(&mut self) {
        log_info!("Application supervisor started");

        loop {
            Timer::after(Duration::from_secs(1)).await;
            self.tick(1);
        }
    }

    fn print_status(&self, report: &QueueReport) {
        let minutes = self.uptime_seconds / 60;
        let hours = minutes / 60;

        if hours > 0 {
            log_info!("Status: Uptime {}h{}m", hours, minutes % 60);
        } else {
            log_info!("Status: Uptime {}m{}s", minutes, self.uptime_seconds % 60);
        }
        log_info!(
            "Queue: {}/{} queued, {} pushed, {} dropped, {} delivered",
            report.occupied,
            report.capacity,
            report.stats.pushed,
            report.stats.dropped,
            report.stats.delivered
        );
    }

    /// Get current uptime in seconds
    pub fn uptime(&self) -> u64 {
        self.uptime_seconds
    }
}
