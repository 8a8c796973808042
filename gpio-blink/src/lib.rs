//! # gpio-blink
//!
//! Bare-metal GPIO blinking for the BCM283x (Raspberry Pi).
//!
//! - [`volatile`]: register cells whose accesses the compiler cannot elide
//!   or reorder
//! - [`registers`]: the GPIO register block at its fixed physical address
//! - [`gpio`]: pin function select, set and clear
//! - [`delay`]: calibrated no-op spin delay
//! - [`blink`]: the high/low loop
//!
//! ```rust,no_run
//! use gpio_blink::{BLINK_INTERVAL_MS, Blinker, CpuSpin, Gpio, GpioRegisters, SpinDelay};
//!
//! // Only sound on the board itself, where the GPIO block is mapped.
//! let regs = unsafe { GpioRegisters::bcm() };
//! let led = Gpio::new(regs, 16).into_output();
//! Blinker::new(led, SpinDelay::new(CpuSpin), BLINK_INTERVAL_MS).run()
//! ```

#![cfg_attr(not(test), no_std)]

pub mod blink;
pub mod delay;
pub mod gpio;
pub mod registers;
pub mod volatile;

pub use blink::{BLINK_INTERVAL_MS, Blinker};
pub use delay::{CpuSpin, SPINS_PER_MICROSECOND, Spin, SpinDelay};
pub use gpio::{Gpio, GpioError, clear_pin, initialize_pin_as_output, set_pin};
pub use registers::{Function, GPIO_BASE, GpioRegisters, PERIPHERAL_BASE};
