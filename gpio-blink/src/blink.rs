//! The blink loop: drive the pin high, wait, drive it low, wait, forever.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use log::trace;

/// Dwell time in each level.
pub const BLINK_INTERVAL_MS: u32 = 1000;

/// Two-state square-wave generator over an output pin and a delay.
pub struct Blinker<P, D> {
    pin: P,
    delay: D,
    interval_ms: u32,
    state: Option<PinState>,
}

impl<P: OutputPin, D: DelayNs> Blinker<P, D> {
    pub fn new(pin: P, delay: D, interval_ms: u32) -> Self {
        Self {
            pin,
            delay,
            interval_ms,
            state: None,
        }
    }

    /// Level driven by the last [`step`](Self::step), `None` before the
    /// first one.
    pub fn state(&self) -> Option<PinState> {
        self.state
    }

    /// Drives the next level and dwells in it. The first step drives high.
    ///
    /// The dwell happens even when the pin fails to drive, so the cadence
    /// holds; [`state`](Self::state) only advances on success and the next
    /// step retries the same level.
    pub fn step(&mut self) -> Result<(), P::Error> {
        let next = match self.state {
            Some(PinState::High) => PinState::Low,
            Some(PinState::Low) | None => PinState::High,
        };

        let driven = self.pin.set_state(next);
        if driven.is_ok() {
            self.state = Some(next);
            trace!("blink {:?}", next);
        }

        self.delay.delay_ms(self.interval_ms);
        driven
    }

    /// Runs until reset.
    pub fn run(mut self) -> ! {
        loop {
            // A failed drive is retried on the next step.
            self.step().ok();
        }
    }
}
