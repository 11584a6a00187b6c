//! Hardware and timing configuration for ColorQueue
//! RP2040-based LED color producer/consumer demo

use crate::error::ConfigError;

// ===================================================================
// Scheduler Timing
// ===================================================================

pub const TICK_RATE_HZ: u32 = 1000; // Scheduler ticks per second

// ===================================================================
// Queue Configuration
// ===================================================================

pub const QUEUE_CAPACITY: usize = 10; // Colors buffered between producer and consumer
pub const COLOR_VALUES: u64 = 8; // Three lamp bits -> 0..=7

// ===================================================================
// Task Timing (seconds, converted to ticks by TimingConfig)
// ===================================================================

pub const BURST_WINDOW_SECS: u32 = 4; // Producer sends at random intervals for this long
pub const IDLE_WAIT_SECS: u32 = 16; // Producer stays quiet for this long afterwards
pub const DWELL_SECS: u32 = 2; // Consumer holds each color for this long
pub const STATUS_INTERVAL_SECS: u64 = 10; // Supervisor status period

// ===================================================================
// GPIO Pin Assignments - Raspberry Pi Pico
// ===================================================================

// Common-anode RGB LED: a lamp is lit when its pin is driven low
pub const LED_RED_PIN: u8 = 18;
pub const LED_GREEN_PIN: u8 = 19;
pub const LED_BLUE_PIN: u8 = 20;
pub const LED_ACTIVE_LOW: bool = true;

pub const LED_STATUS_PIN: u8 = 25; // Built-in LED on Pico

// ===================================================================
// Runtime timing view
// ===================================================================

/// Timing parameters handed to the producer and consumer tasks.
///
/// Firmware uses [`TimingConfig::default`]; tests shrink the windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub struct TimingConfig {
    pub tick_rate_hz: u32,
    pub burst_window_secs: u32,
    pub idle_secs: u32,
    pub dwell_secs: u32,
}

impl TimingConfig {
    pub const fn new(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz,
            burst_window_secs: BURST_WINDOW_SECS,
            idle_secs: IDLE_WAIT_SECS,
            dwell_secs: DWELL_SECS,
        }
    }

    /// Reject settings the tasks cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.burst_window_secs == 0 {
            return Err(ConfigError::ZeroBurstWindow);
        }
        Ok(())
    }

    pub const fn seconds_to_ticks(&self, secs: u32) -> u64 {
        secs as u64 * self.tick_rate_hz as u64
    }

    /// Upper bound (exclusive) of the producer's random pause: one second.
    pub const fn max_pause_ticks(&self) -> u64 {
        self.tick_rate_hz as u64
    }

    pub const fn burst_window_ticks(&self) -> u64 {
        self.seconds_to_ticks(self.burst_window_secs)
    }

    pub const fn idle_ticks(&self) -> u64 {
        self.seconds_to_ticks(self.idle_secs)
    }

    pub const fn dwell_ticks(&self) -> u64 {
        self.seconds_to_ticks(self.dwell_secs)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new(TICK_RATE_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_windows_match_tick_rate() {
        let timing = TimingConfig::default();
        assert_eq!(timing.burst_window_ticks(), 4 * 1000);
        assert_eq!(timing.idle_ticks(), 16 * 1000);
        assert_eq!(timing.dwell_ticks(), 2 * 1000);
        assert_eq!(timing.max_pause_ticks(), 1000);
        assert!(timing.validate().is_ok());
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let timing = TimingConfig::new(0);
        assert_eq!(timing.validate(), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn zero_burst_window_is_rejected() {
        let timing = TimingConfig {
            burst_window_secs: 0,
            ..TimingConfig::default()
        };
        assert_eq!(timing.validate(), Err(ConfigError::ZeroBurstWindow));
    }
}
