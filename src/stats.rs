//! Queue traffic counters
//!
//! Updated by the queue itself on every push/pop outcome and read by the
//! supervisor. Purely observational: no task makes decisions from them.

use portable_atomic::{AtomicU32, Ordering};

/// Lock-free counters of queue traffic
pub struct QueueStats {
    pushed: AtomicU32,
    dropped: AtomicU32,
    delivered: AtomicU32,
}

/// Point-in-time copy of [`QueueStats`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub struct StatsSnapshot {
    pub pushed: u32,
    pub dropped: u32,
    pub delivered: u32,
}

impl QueueStats {
    pub const fn new() -> Self {
        Self {
            pushed: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            delivered: AtomicU32::new(0),
        }
    }

    pub fn record_pushed(&self) {
        self.pushed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            pushed: self.pushed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
        }
    }
}

impl Default for QueueStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let stats = QueueStats::new();
        stats.record_pushed();
        stats.record_pushed();
        stats.record_dropped();
        stats.record_delivered();

        let snap = stats.snapshot();
        assert_eq!(
            snap,
            StatsSnapshot {
                pushed: 2,
                dropped: 1,
                delivered: 1
            }
        );
    }
}
