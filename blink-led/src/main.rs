#![no_std]
#![no_main]

mod init;

use gpio_blink::{BLINK_INTERVAL_MS, Blinker, CpuSpin, Gpio, GpioRegisters, SpinDelay};
use panic_halt as _;

/// GPIO 16, wired to the LED on the tutorial board.
const LED_PIN: u8 = 16;

#[unsafe(no_mangle)]
pub extern "C" fn kmain() -> ! {
    // STEP 1: Set GPIO Pin 16 as output.
    // kmain only ever runs on the board, where the GPIO block is mapped.
    let regs = unsafe { GpioRegisters::bcm() };
    let led = Gpio::new(regs, LED_PIN).into_output();

    // STEP 2: Continuously set and clear GPIO 16.
    let delay = SpinDelay::new(CpuSpin);
    Blinker::new(led, delay, BLINK_INTERVAL_MS).run()
}
