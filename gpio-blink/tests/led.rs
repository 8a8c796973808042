use std::cell::Cell;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use gpio_blink::gpio::{fsel_shift, states::Output};
use gpio_blink::registers::FUNCTION_MASK;
use gpio_blink::{
    Blinker, Gpio, GpioRegisters, Spin, SpinDelay, clear_pin, initialize_pin_as_output, set_pin,
};

const LED: u8 = 16;

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

#[test]
fn init_preserves_unrelated_bits() {
    init_logging();
    let regs = GpioRegisters::zeroed();
    let others = 0xDEAD_BEEF & !(FUNCTION_MASK << fsel_shift(LED));
    regs.FSEL[1].write(others);

    initialize_pin_as_output(&regs, LED);

    let fsel = regs.FSEL[1].read();
    assert_eq!((fsel >> 18) & FUNCTION_MASK, 0b001);
    assert_eq!(fsel & !(FUNCTION_MASK << 18), others);
}

#[test]
fn init_is_idempotent() {
    init_logging();
    let regs = GpioRegisters::zeroed();

    for _ in 0..5 {
        initialize_pin_as_output(&regs, LED);
        assert_eq!(regs.FSEL[1].read(), 0b001 << 18);
    }
}

#[test]
fn set_and_clear_assert_only_the_led_bit() {
    init_logging();
    let regs = GpioRegisters::zeroed();

    set_pin(&regs, LED);
    clear_pin(&regs, LED);

    assert_eq!(regs.SET[0].read(), 1 << 16);
    assert_eq!(regs.CLR[0].read(), 1 << 16);
    assert_eq!(regs.SET[1].read(), 0);
    assert_eq!(regs.CLR[1].read(), 0);
    assert!(regs.FSEL.iter().all(|fsel| fsel.read() == 0));
}

#[test]
fn output_pin_drives_the_registers() {
    init_logging();
    let regs = GpioRegisters::zeroed();
    let mut led: Gpio<'_, Output> = Gpio::new(&regs, LED).into_output();

    assert_eq!(regs.FSEL[1].read(), 0b001 << 18);

    led.set_high().unwrap();
    assert_eq!(regs.SET[0].read(), 1 << 16);
    assert_eq!(regs.CLR[0].read(), 0);

    led.set_low().unwrap();
    assert_eq!(regs.CLR[0].read(), 1 << 16);
}

struct Ticks<'a>(&'a Cell<u64>);

impl Spin for Ticks<'_> {
    fn spin(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn one_blink_period_spins_two_seconds() {
    init_logging();
    let regs = GpioRegisters::zeroed();
    let ticks = Cell::new(0);
    let led = Gpio::new(&regs, LED).into_output();
    let mut blinker = Blinker::new(led, SpinDelay::new(Ticks(&ticks)), 1000);

    blinker.step().unwrap();
    assert_eq!(regs.SET[0].read(), 1 << 16);
    assert_eq!(regs.CLR[0].read(), 0);
    assert_eq!(ticks.get(), 6_000_000);

    blinker.step().unwrap();
    assert_eq!(regs.CLR[0].read(), 1 << 16);
    assert_eq!(ticks.get(), 12_000_000);
}

#[test]
fn delay_trait_matches_spin_sleep() {
    let ticks = Cell::new(0);
    let mut delay = SpinDelay::new(Ticks(&ticks));

    delay.delay_ms(3);
    assert_eq!(ticks.get(), 18_000);

    delay.spin_sleep_us(7);
    assert_eq!(ticks.get(), 18_042);
}
