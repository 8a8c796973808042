//! GPIO pin driver.
//!
//! The free functions are the raw register operations; [`Gpio`] wraps them
//! in a typestate handle so that only a pin configured as an output can be
//! driven.

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use log::{debug, trace};

use crate::registers::{FUNCTION_MASK, Function, GpioRegisters};

/// Number of GPIO lines on the BCM283x.
pub const PIN_COUNT: u8 = 54;
/// Pins covered by one `GPFSELn` register.
pub const FSEL_PINS_PER_REGISTER: u8 = 10;
/// Width of one function-select field.
pub const FSEL_FIELD_WIDTH: u8 = 3;
/// Pins covered by one `GPSETn`/`GPCLRn`/`GPLEVn` register.
pub const REGISTER_WIDTH: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GpioError {
    #[error("GPIO pin {0} does not exist")]
    InvalidPin(u8),
}

/// Index of the `GPFSELn` register holding `pin`'s function.
pub const fn fsel_index(pin: u8) -> usize {
    (pin / FSEL_PINS_PER_REGISTER) as usize
}

/// Bit offset of `pin`'s field inside its `GPFSELn` register.
pub const fn fsel_shift(pin: u8) -> u32 {
    ((pin % FSEL_PINS_PER_REGISTER) * FSEL_FIELD_WIDTH) as u32
}

/// Index of the set/clear/level register holding `pin`.
pub const fn bank_index(pin: u8) -> usize {
    (pin / REGISTER_WIDTH) as usize
}

/// Single-bit mask for `pin` inside its set/clear/level register.
pub const fn bank_mask(pin: u8) -> u32 {
    1 << (pin % REGISTER_WIDTH)
}

fn check_pin(pin: u8) {
    assert!(pin < PIN_COUNT, "GPIO pin {} does not exist", pin);
}

/// Writes `function` into `pin`'s function-select field, leaving every other
/// field of the register untouched.
pub fn select_function(regs: &GpioRegisters, pin: u8, function: Function) {
    check_pin(pin);
    let shift = fsel_shift(pin);
    regs.FSEL[fsel_index(pin)]
        .modify(|fsel| (fsel & !(FUNCTION_MASK << shift)) | ((function as u32) << shift));
}

/// Configures `pin` as a digital output. Calling it again is a no-op.
pub fn initialize_pin_as_output(regs: &GpioRegisters, pin: u8) {
    select_function(regs, pin, Function::Output);
    debug!("gpio {} configured as output", pin);
}

/// Drives `pin` high.
pub fn set_pin(regs: &GpioRegisters, pin: u8) {
    check_pin(pin);
    regs.SET[bank_index(pin)].or_mask(bank_mask(pin));
    trace!("gpio {} set", pin);
}

/// Drives `pin` low.
pub fn clear_pin(regs: &GpioRegisters, pin: u8) {
    check_pin(pin);
    regs.CLR[bank_index(pin)].or_mask(bank_mask(pin));
    trace!("gpio {} cleared", pin);
}

/// Current logic level of `pin`.
pub fn read_level(regs: &GpioRegisters, pin: u8) -> bool {
    check_pin(pin);
    regs.LEV[bank_index(pin)].read() & bank_mask(pin) != 0
}

pub mod states {
    /// Pin whose function has not been selected yet.
    pub struct Uninitialized;
    /// Pin configured as a digital output.
    pub struct Output;
}

use states::{Output, Uninitialized};

/// A single GPIO pin in state `State`.
pub struct Gpio<'a, State> {
    regs: &'a GpioRegisters,
    pin: u8,
    _state: PhantomData<State>,
}

impl<'a> Gpio<'a, Uninitialized> {
    /// Returns a handle to `pin`.
    ///
    /// # Panics
    ///
    /// Panics if `pin` is not below [`PIN_COUNT`].
    pub fn new(regs: &'a GpioRegisters, pin: u8) -> Self {
        check_pin(pin);
        Self::transition(regs, pin)
    }

    /// Like [`Gpio::new`] but reports an out-of-range pin instead of
    /// panicking.
    pub fn try_new(regs: &'a GpioRegisters, pin: u8) -> Result<Self, GpioError> {
        if pin >= PIN_COUNT {
            return Err(GpioError::InvalidPin(pin));
        }
        Ok(Self::transition(regs, pin))
    }

    /// Selects the output function for this pin.
    pub fn into_output(self) -> Gpio<'a, Output> {
        initialize_pin_as_output(self.regs, self.pin);
        Gpio::transition(self.regs, self.pin)
    }
}

impl<'a, State> Gpio<'a, State> {
    fn transition(regs: &'a GpioRegisters, pin: u8) -> Self {
        Gpio {
            regs,
            pin,
            _state: PhantomData,
        }
    }

    /// The pin number.
    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl Gpio<'_, Output> {
    pub fn set(&mut self) {
        set_pin(self.regs, self.pin);
    }

    pub fn clear(&mut self) {
        clear_pin(self.regs, self.pin);
    }

    pub fn level(&self) -> bool {
        read_level(self.regs, self.pin)
    }
}

impl ErrorType for Gpio<'_, Output> {
    type Error = Infallible;
}

impl OutputPin for Gpio<'_, Output> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set();
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.clear();
        Ok(())
    }
}

impl StatefulOutputPin for Gpio<'_, Output> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_geometry() {
        assert_eq!(fsel_index(16), 1);
        assert_eq!(fsel_shift(16), 18);
        assert_eq!(fsel_index(9), 0);
        assert_eq!(fsel_shift(9), 27);
        assert_eq!(fsel_index(53), 5);
        assert_eq!(bank_index(31), 0);
        assert_eq!(bank_index(32), 1);
        assert_eq!(bank_mask(16), 1 << 16);
        assert_eq!(bank_mask(33), 1 << 1);
    }

    #[test]
    fn output_field_replaces_previous_function() {
        let regs = GpioRegisters::zeroed();
        regs.FSEL[1].write((Function::Alt5 as u32) << 18);

        initialize_pin_as_output(&regs, 16);

        assert_eq!(regs.FSEL[1].read(), 0b001 << 18);
    }

    #[test]
    fn set_and_clear_use_their_own_registers() {
        let regs = GpioRegisters::zeroed();

        set_pin(&regs, 16);
        assert_eq!(regs.SET[0].read(), 1 << 16);
        assert_eq!(regs.CLR[0].read(), 0);

        clear_pin(&regs, 16);
        assert_eq!(regs.CLR[0].read(), 1 << 16);
    }

    #[test]
    fn high_pins_use_the_second_bank() {
        let regs = GpioRegisters::zeroed();

        set_pin(&regs, 47);
        clear_pin(&regs, 47);

        assert_eq!(regs.SET[0].read(), 0);
        assert_eq!(regs.SET[1].read(), 1 << 15);
        assert_eq!(regs.CLR[1].read(), 1 << 15);
    }

    #[test]
    fn try_new_rejects_missing_pins() {
        let regs = GpioRegisters::zeroed();

        assert!(matches!(
            Gpio::try_new(&regs, 54),
            Err(GpioError::InvalidPin(54))
        ));
        assert_eq!(Gpio::try_new(&regs, 53).map(|p| p.pin()).ok(), Some(53));
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn new_panics_on_missing_pin() {
        let regs = GpioRegisters::zeroed();
        let _ = Gpio::new(&regs, 60);
    }

    #[test]
    fn unconfigured_read_is_low() {
        let regs = GpioRegisters::zeroed();
        let mut led = Gpio::new(&regs, 16).into_output();

        assert_eq!(led.is_set_low(), Ok(true));
    }
}
