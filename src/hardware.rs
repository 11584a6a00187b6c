//! Lamp output abstraction and firmware task wiring
//!
//! The consumer only sees [`LampOutput`]. [`RgbLamps`] drives three
//! `embedded-hal` output pins; on the RP2040 those are `embassy_rp` GPIO
//! outputs, on the host they are mocks.

use embedded_hal::digital::{OutputPin, PinState};

use crate::types::{Color, Lamp};

/// Sink for lamp states, written only by the consumer task
pub trait LampOutput {
    type Error;

    /// Switch every lamp off
    fn initialize(&mut self) -> Result<(), Self::Error>;

    fn set_lamp(&mut self, lamp: Lamp, on: bool) -> Result<(), Self::Error>;

    /// Write all three lamps from `color`
    ///
    /// Every lamp is written even if an earlier write fails; the first
    /// failure is returned.
    fn apply(&mut self, color: Color) -> Result<(), Self::Error> {
        let mut first_err = None;
        for (lamp, on) in color.lamp_states() {
            if let Err(e) = self.set_lamp(lamp, on) {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Electrical level that lights a lamp
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    pub const fn from_active_low(active_low: bool) -> Self {
        if active_low {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }

    /// Pin level for a lamp that should be `on`
    pub fn level(self, on: bool) -> PinState {
        match self {
            Polarity::ActiveHigh => PinState::from(on),
            Polarity::ActiveLow => PinState::from(!on),
        }
    }
}

/// RGB LED on three GPIO outputs
pub struct RgbLamps<P> {
    pins: [P; 3],
    polarity: Polarity,
    lit: Color,
}

impl<P: OutputPin> RgbLamps<P> {
    /// Pins in red, green, blue order
    pub fn new(red: P, green: P, blue: P, polarity: Polarity) -> Self {
        Self {
            pins: [red, green, blue],
            polarity,
            lit: Color::OFF,
        }
    }

    /// Last color written to the pins
    pub fn lit(&self) -> Color {
        self.lit
    }

    pub fn pin(&self, lamp: Lamp) -> &P {
        &self.pins[lamp as usize]
    }
}

impl<P: OutputPin> LampOutput for RgbLamps<P> {
    type Error = P::Error;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        for lamp in Lamp::ALL {
            self.set_lamp(lamp, false)?;
        }
        Ok(())
    }

    fn set_lamp(&mut self, lamp: Lamp, on: bool) -> Result<(), Self::Error> {
        self.pins[lamp as usize].set_state(self.polarity.level(on))?;
        let bits = if on {
            self.lit.bits() | lamp.mask()
        } else {
            self.lit.bits() & !lamp.mask()
        };
        self.lit = Color::from_bits(bits);
        Ok(())
    }
}

// ===================================================================
// RP2040 firmware wiring
// ===================================================================

#[cfg(feature = "rp2040")]
pub use firmware::*;

#[cfg(feature = "rp2040")]
mod firmware {
    use defmt::*;
    use embassy_executor::Spawner;
    use embassy_rp::gpio::{Level, Output};
    use embassy_rp::Peripherals;
    use embassy_time::{Duration, Timer};
    use rand::rngs::SmallRng;
    use static_cell::StaticCell;

    use super::{LampOutput, Polarity, RgbLamps};
    use crate::config::{self, TimingConfig, LED_ACTIVE_LOW, QUEUE_CAPACITY};
    use crate::consumer::ConsumerTask;
    use crate::error::StartupError;
    use crate::producer::ProducerTask;
    use crate::queue::ColorQueue;
    use crate::scheduler::EmbassyScheduler;

    pub type FirmwareLamps = RgbLamps<Output<'static>>;

    static COLOR_QUEUE: StaticCell<ColorQueue> = StaticCell::new();

    /// Build the lamps, the queue and spawn both tasks
    ///
    /// On error nothing has been spawned.
    pub fn init_hardware_tasks(
        spawner: &Spawner,
        p: Peripherals,
        rng: SmallRng,
    ) -> Result<&'static ColorQueue, StartupError> {
        let timing = TimingConfig::default();
        timing.validate()?;

        let polarity = Polarity::from_active_low(LED_ACTIVE_LOW);
        let off = if LED_ACTIVE_LOW { Level::High } else { Level::Low };
        let mut lamps = RgbLamps::new(
            Output::new(p.PIN_18, off),
            Output::new(p.PIN_19, off),
            Output::new(p.PIN_20, off),
            polarity,
        );
        if let Err(e) = lamps.initialize() {
            match e {}
        }
        info!(
            "Lamps on GPIO {}/{}/{} ({:?})",
            config::LED_RED_PIN,
            config::LED_GREEN_PIN,
            config::LED_BLUE_PIN,
            polarity
        );

        let queue: &'static ColorQueue = COLOR_QUEUE.init(ColorQueue::new(QUEUE_CAPACITY)?);
        let scheduler = EmbassyScheduler::new(timing.tick_rate_hz);

        spawner
            .spawn(producer_task(ProducerTask::new(queue, scheduler, rng, timing)))
            .map_err(|_| StartupError::Spawn)?;
        spawner
            .spawn(consumer_task(ConsumerTask::new(queue, scheduler, lamps, timing)))
            .map_err(|_| StartupError::Spawn)?;
        spawner
            .spawn(status_task(Output::new(p.PIN_25, Level::Low)))
            .map_err(|_| StartupError::Spawn)?;

        Ok(queue)
    }

    /// LED color selection task
    #[embassy_executor::task]
    pub async fn producer_task(
        mut producer: ProducerTask<
            'static,
            embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex,
            EmbassyScheduler,
            SmallRng,
            QUEUE_CAPACITY,
        >,
    ) {
        producer.run().await
    }

    /// LED color set task
    #[embassy_executor::task]
    pub async fn consumer_task(
        mut consumer: ConsumerTask<
            'static,
            embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex,
            EmbassyScheduler,
            FirmwareLamps,
            QUEUE_CAPACITY,
        >,
    ) {
        consumer.run().await
    }

    /// Status LED task implementation
    #[embassy_executor::task]
    pub async fn status_task(mut status_led: Output<'static>) {
        info!("Status LED task started on GPIO{}", config::LED_STATUS_PIN);

        loop {
            // Heartbeat pattern - short blink every second
            status_led.set_high();
            Timer::after(Duration::from_millis(100)).await;
            status_led.set_low();
            Timer::after(Duration::from_millis(900)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPin;

    fn lamps(polarity: Polarity) -> RgbLamps<MockPin> {
        RgbLamps::new(MockPin::new(), MockPin::new(), MockPin::new(), polarity)
    }

    #[test]
    fn initialize_turns_everything_off_active_low() {
        let mut rgb = lamps(Polarity::ActiveLow);
        rgb.initialize().unwrap();
        for lamp in Lamp::ALL {
            assert!(rgb.pin(lamp).is_high());
        }
        assert_eq!(rgb.lit(), Color::OFF);
    }

    #[test]
    fn apply_decodes_bits_active_high() {
        let mut rgb = lamps(Polarity::ActiveHigh);
        rgb.apply(Color::from_bits(5)).unwrap();
        assert!(rgb.pin(Lamp::Red).is_high());
        assert!(!rgb.pin(Lamp::Green).is_high());
        assert!(rgb.pin(Lamp::Blue).is_high());
        assert_eq!(rgb.lit(), Color::from_bits(5));
    }

    #[test]
    fn apply_inverts_levels_active_low() {
        let mut rgb = lamps(Polarity::ActiveLow);
        rgb.apply(Color::from_bits(2)).unwrap();
        assert!(rgb.pin(Lamp::Red).is_high());
        assert!(!rgb.pin(Lamp::Green).is_high());
        assert!(rgb.pin(Lamp::Blue).is_high());
    }

    #[test]
    fn every_color_round_trips_through_pins() {
        let mut rgb = lamps(Polarity::ActiveHigh);
        for bits in 0..8 {
            let color = Color::from_bits(bits);
            rgb.apply(color).unwrap();
            assert_eq!(rgb.lit(), color);
            for lamp in Lamp::ALL {
                assert_eq!(rgb.pin(lamp).is_high(), color.is_lit(lamp));
            }
        }
    }

    #[test]
    fn failing_pin_still_writes_the_others() {
        let mut rgb = RgbLamps::new(
            MockPin::failing(),
            MockPin::new(),
            MockPin::new(),
            Polarity::ActiveHigh,
        );
        assert!(rgb.apply(Color::WHITE).is_err());
        assert!(rgb.pin(Lamp::Green).is_high());
        assert!(rgb.pin(Lamp::Blue).is_high());
    }
}
