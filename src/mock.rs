//! Mock collaborators for host testing
//!
//! Available in test builds and with the `mock` feature:
//! - [`MockScheduler`]: virtual tick clock, delays complete instantly
//! - [`ScriptedRandom`]: replays a fixed sequence of draws
//! - [`MockLamps`]: records every lamp write
//! - [`MockPin`]: `embedded-hal` output pin

#![cfg(any(test, feature = "mock"))]

use core::convert::Infallible;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use heapless::Vec;

use crate::hardware::LampOutput;
use crate::scheduler::TickScheduler;
use crate::types::{Color, Lamp};

/// Entries kept by the recording mocks; later entries are discarded
pub const MOCK_RECORD_LEN: usize = 64;

/// Virtual clock: `delay` advances `now` by the requested ticks plus a
/// fixed scheduling latency and returns without suspending
#[derive(Debug, Default)]
pub struct MockScheduler {
    now: u64,
    latency: u64,
    delays: Vec<u64, MOCK_RECORD_LEN>,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra ticks that pass on every delay, as if other tasks ran
    pub fn with_latency(mut self, ticks: u64) -> Self {
        self.latency = ticks;
        self
    }

    pub fn starting_at(mut self, tick: u64) -> Self {
        self.now = tick;
        self
    }

    /// Delays requested so far
    pub fn delays(&self) -> &[u64] {
        &self.delays
    }

    pub fn advance(&mut self, ticks: u64) {
        self.now = self.now.wrapping_add(ticks);
    }
}

impl TickScheduler for MockScheduler {
    fn now(&self) -> u64 {
        self.now
    }

    async fn delay(&mut self, ticks: u64) {
        let _ = self.delays.push(ticks);
        self.advance(ticks + self.latency);
    }
}

/// Replays a script of draws, cycling when it runs out
///
/// Values are returned as-is, even when they exceed the requested bound,
/// so tests can force long pauses.
#[derive(Debug)]
pub struct ScriptedRandom {
    script: Vec<u64, MOCK_RECORD_LEN>,
    next: usize,
    bounds: Vec<u64, MOCK_RECORD_LEN>,
}

impl ScriptedRandom {
    pub fn new(script: &[u64]) -> Self {
        let mut values = Vec::new();
        for &v in script.iter().take(MOCK_RECORD_LEN) {
            let _ = values.push(v);
        }
        Self {
            script: values,
            next: 0,
            bounds: Vec::new(),
        }
    }

    /// Bounds passed to `next_below`, in call order
    pub fn bounds_seen(&self) -> &[u64] {
        &self.bounds
    }
}

impl crate::random::RandomSource for ScriptedRandom {
    fn next_below(&mut self, bound: u64) -> u64 {
        let _ = self.bounds.push(bound);
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.next % self.script.len()];
        self.next += 1;
        value
    }
}

/// Lamp sink that records writes
#[derive(Debug, Default)]
pub struct MockLamps {
    state: [bool; 3],
    writes: Vec<(Lamp, bool), MOCK_RECORD_LEN>,
}

impl MockLamps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self, lamp: Lamp) -> bool {
        self.state[lamp as usize]
    }

    /// Current lamp states as a color
    pub fn color(&self) -> Color {
        let bits = Lamp::ALL
            .iter()
            .filter(|&&lamp| self.is_on(lamp))
            .fold(0, |acc, lamp| acc | lamp.mask());
        Color::from_bits(bits)
    }

    pub fn writes(&self) -> &[(Lamp, bool)] {
        &self.writes
    }
}

impl LampOutput for MockLamps {
    type Error = Infallible;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        self.state = [false; 3];
        Ok(())
    }

    fn set_lamp(&mut self, lamp: Lamp, on: bool) -> Result<(), Self::Error> {
        self.state[lamp as usize] = on;
        let _ = self.writes.push((lamp, on));
        Ok(())
    }
}

/// Output pin holding its last level
#[derive(Debug, Default)]
pub struct MockPin {
    high: bool,
    fail: bool,
}

/// Error reported by a failing [`MockPin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin whose writes always fail
    pub fn failing() -> Self {
        Self {
            high: false,
            fail: true,
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockPinError);
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockPinError);
        }
        self.high = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomSource;
    use embassy_futures::block_on;

    #[test]
    fn mock_scheduler_advances_on_delay() {
        let mut scheduler = MockScheduler::new().starting_at(100).with_latency(1);
        block_on(scheduler.delay(10));
        assert_eq!(scheduler.now(), 111);
        assert_eq!(scheduler.delays(), &[10]);
    }

    #[test]
    fn scripted_random_cycles() {
        let mut rng = ScriptedRandom::new(&[1, 2]);
        let draws: [u64; 3] = core::array::from_fn(|_| rng.next_below(8));
        assert_eq!(draws, [1, 2, 1]);
        assert_eq!(rng.bounds_seen(), &[8, 8, 8]);
    }

    #[test]
    fn mock_lamps_report_color() {
        let mut lamps = MockLamps::new();
        lamps.apply(Color::from_bits(6)).unwrap();
        assert_eq!(lamps.color(), Color::from_bits(6));
        assert_eq!(lamps.writes().len(), 3);
    }
}
