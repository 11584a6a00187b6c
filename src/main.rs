//! ColorQueue - RP2040 firmware entry point
//!
//! Hardware: Raspberry Pi Pico (RP2040)
//! Lamps: common-anode RGB LED on GPIO 18/19/20
//! Tasks: color producer, color consumer, status heartbeat, supervisor

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_rp::clocks::RoscRng;
use panic_halt as _;
use defmt_rtt as _; // global logger
use rand::RngCore;

use colorqueue::config::TimingConfig;
use colorqueue::{log_error, log_info};
use colorqueue::hardware;
use colorqueue::random;
use colorqueue::supervisor::AppSupervisor;

/// Main application entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // Ring oscillator jitter makes every boot draw a different sequence
    let rng = random::seeded(RoscRng.next_u64());

    match hardware::init_hardware_tasks(&spawner, p, rng) {
        Ok(queue) => {
            let mut supervisor = AppSupervisor::new(queue, TimingConfig::default());
            supervisor.print_startup_banner();
            log_info!("ColorQueue initialized successfully");

            // Run the main supervisor loop
            supervisor.run().await;
        }
        Err(e) => {
            log_error!("Failed to start color tasks: {:?}", e);
            core::panic!("Startup failed");
        }
    }
}
