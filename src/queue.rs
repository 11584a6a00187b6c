//! Fixed-capacity FIFO shared by the producer and consumer tasks
//!
//! The queue is the only mutable state crossing the task boundary. Pushing
//! never waits: a full queue rejects the item and hands it back. Popping
//! suspends the caller until an item arrives.
//!
//! ```text
//! ProducerTask ──try_push──▶ [c0][c1]..[c9] ──pop().await──▶ ConsumerTask
//!                 never blocks                 waits on empty
//! ```

use core::cell::RefCell;
use core::future::poll_fn;
use core::task::{Context, Poll};

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::waitqueue::WakerRegistration;
use embassy_time::{with_timeout, Duration, TimeoutError};
use heapless::Deque;

use crate::config::QUEUE_CAPACITY;
use crate::error::{QueueError, TryPushError};
use crate::stats::{QueueStats, StatsSnapshot};
use crate::types::Color;

/// Queue type used by the firmware tasks
pub type ColorQueue = BoundedQueue<CriticalSectionRawMutex, Color, QUEUE_CAPACITY>;

struct QueueState<T, const N: usize> {
    items: Deque<T, N>,
    receiver: WakerRegistration,
}

/// Bounded single-producer/single-consumer FIFO
///
/// `N` is the static storage; `capacity` (at most `N`) is the number of
/// items the queue accepts before rejecting pushes.
pub struct BoundedQueue<M: RawMutex, T, const N: usize> {
    capacity: usize,
    state: Mutex<M, RefCell<QueueState<T, N>>>,
    stats: QueueStats,
}

impl<M: RawMutex, T, const N: usize> BoundedQueue<M, T, N> {
    /// Create a queue holding at most `capacity` items
    ///
    /// Fails when `capacity` is zero or larger than the storage `N`.
    pub const fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 || capacity > N {
            return Err(QueueError::Allocation {
                requested: capacity,
                available: N,
            });
        }

        Ok(Self {
            capacity,
            state: Mutex::new(RefCell::new(QueueState {
                items: Deque::new(),
                receiver: WakerRegistration::new(),
            })),
            stats: QueueStats::new(),
        })
    }

    /// Create a queue using all of its storage
    pub const fn full_size() -> Self {
        Self {
            capacity: N,
            state: Mutex::new(RefCell::new(QueueState {
                items: Deque::new(),
                receiver: WakerRegistration::new(),
            })),
            stats: QueueStats::new(),
        }
    }

    /// Append `item` without waiting
    ///
    /// Returns `TryPushError::Full(item)` if the queue holds `capacity`
    /// items; the queue is left untouched in that case.
    pub fn try_push(&self, item: T) -> Result<(), TryPushError<T>> {
        let result = self.state.lock(|state| {
            let mut state = state.borrow_mut();
            if state.items.len() >= self.capacity {
                return Err(TryPushError::Full(item));
            }
            state.items.push_back(item).map_err(TryPushError::Full)?;
            state.receiver.wake();
            Ok(())
        });

        match result {
            Ok(()) => self.stats.record_pushed(),
            Err(_) => self.stats.record_dropped(),
        }
        result
    }

    /// Remove the oldest item if there is one
    pub fn try_pop(&self) -> Option<T> {
        let item = self
            .state
            .lock(|state| state.borrow_mut().items.pop_front());
        if item.is_some() {
            self.stats.record_delivered();
        }
        item
    }

    /// Poll for the oldest item, registering the waker when empty
    pub fn poll_pop(&self, cx: &mut Context<'_>) -> Poll<T> {
        let polled = self.state.lock(|state| {
            let mut state = state.borrow_mut();
            match state.items.pop_front() {
                Some(item) => Poll::Ready(item),
                None => {
                    state.receiver.register(cx.waker());
                    Poll::Pending
                }
            }
        });
        if polled.is_ready() {
            self.stats.record_delivered();
        }
        polled
    }

    /// Wait until an item is available and remove it (FIFO)
    pub async fn pop(&self) -> T {
        poll_fn(|cx| self.poll_pop(cx)).await
    }

    /// Like [`pop`](Self::pop) but gives up after `timeout`
    pub async fn pop_timeout(&self, timeout: Duration) -> Result<T, TimeoutError> {
        with_timeout(timeout, self.pop()).await
    }

    /// Occupancy snapshot; may be stale as soon as it is returned
    pub fn len(&self) -> usize {
        self.state.lock(|state| state.borrow().items.len())
    }

    /// Alias of [`len`](Self::len), named after the diagnostic it feeds
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Traffic counters since creation
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
