//! ColorQueue - producer/consumer LED color demo for RP2040
//!
//! Two Embassy tasks share one bounded queue of 3-bit colors:
//!
//! ```text
//! ProducerTask ──try_push──▶ BoundedQueue (10) ──pop──▶ ConsumerTask ──▶ RGB LED
//! ```
//!
//! ## Architecture
//! - **Producer**: random colors at random intervals for 4 s, then 16 s idle
//! - **Consumer**: waits for a color, lights the lamps, holds for 2 s
//! - **Queue**: non-blocking push (drops when full), waiting pop, strict FIFO
//! - **Host testable**: scheduler, randomness and lamps sit behind traits;
//!   the RP2040 wiring is behind the `rp2040` feature

#![cfg_attr(not(test), no_std)]

pub mod logging;

pub mod config;
pub mod consumer;
pub mod error;
pub mod hardware;
pub mod producer;
pub mod queue;
pub mod random;
pub mod scheduler;
pub mod stats;
pub mod supervisor;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use config::TimingConfig;
pub use consumer::ConsumerTask;
pub use error::{QueueError, StartupError, TryPushError};
pub use hardware::{LampOutput, Polarity, RgbLamps};
pub use producer::{BurstReport, ProducerTask};
pub use queue::{BoundedQueue, ColorQueue};
pub use scheduler::{EmbassyScheduler, TickScheduler};
pub use types::{Color, Lamp};
