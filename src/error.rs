//! Error types
//!
//! Every failure in this crate is an explicit result value. Only the
//! startup errors are fatal; a full queue is an expected, lossy outcome.

use core::fmt;

/// Queue construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum QueueError {
    /// Requested capacity cannot be backed by the queue's static storage
    Allocation { requested: usize, available: usize },
}

/// Non-blocking push was rejected; the item is handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum TryPushError<T> {
    /// Queue held `capacity` items at the time of the call
    Full(T),
}

impl<T> TryPushError<T> {
    /// Take back the rejected item
    pub fn into_inner(self) -> T {
        match self {
            TryPushError::Full(item) => item,
        }
    }
}

/// Invalid timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum ConfigError {
    ZeroTickRate,
    ZeroBurstWindow,
}

/// Unrecoverable startup failures; the tasks must not be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum StartupError {
    /// Queue could not be created
    Queue(QueueError),
    /// Timing configuration is unusable
    Config(ConfigError),
    /// Executor refused to spawn a task
    Spawn,
}

impl From<QueueError> for StartupError {
    fn from(err: QueueError) -> Self {
        StartupError::Queue(err)
    }
}

impl From<ConfigError> for StartupError {
    fn from(err: ConfigError) -> Self {
        StartupError::Config(err)
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Allocation {
                requested,
                available,
            } => write!(
                f,
                "queue allocation failed: {} slots requested, {} available",
                requested, available
            ),
        }
    }
}

impl<T> fmt::Display for TryPushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryPushError::Full(_) => write!(f, "queue full"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTickRate => write!(f, "tick rate must be non-zero"),
            ConfigError::ZeroBurstWindow => write!(f, "burst window must be non-zero"),
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Queue(err) => write!(f, "startup failed: {}", err),
            StartupError::Config(err) => write!(f, "startup failed: {}", err),
            StartupError::Spawn => write!(f, "startup failed: task spawn rejected"),
        }
    }
}
