//! Busy-wait delays.
//!
//! There is no timer behind these: a delay is a counted number of no-op
//! iterations, so its accuracy depends on the CPU clock and on the code the
//! compiler generates around the no-op.

use embedded_hal::delay::DelayNs;

/// No-op iterations per microsecond.
///
/// Measured empirically on the reference board at its boot clock. Other
/// clocks need a different value; pass it to [`SpinDelay::with_calibration`].
pub const SPINS_PER_MICROSECOND: u32 = 6;

/// Iterations needed to wait `us` microseconds at `spins_per_us`.
pub const fn spin_count(us: u32, spins_per_us: u32) -> u64 {
    us as u64 * spins_per_us as u64
}

/// One iteration of a busy-wait.
pub trait Spin {
    fn spin(&mut self);
}

/// Executes a single `nop` on the CPU.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuSpin;

impl Spin for CpuSpin {
    #[inline(always)]
    fn spin(&mut self) {
        #[cfg(any(target_arch = "aarch64", target_arch = "arm"))]
        unsafe {
            core::arch::asm!("nop", options(nomem, nostack, preserves_flags));
        }

        #[cfg(not(any(target_arch = "aarch64", target_arch = "arm")))]
        core::hint::spin_loop();
    }
}

/// Calibrated spin delay.
pub struct SpinDelay<S = CpuSpin> {
    spin: S,
    spins_per_us: u32,
}

impl<S: Spin> SpinDelay<S> {
    pub fn new(spin: S) -> Self {
        Self::with_calibration(spin, SPINS_PER_MICROSECOND)
    }

    pub fn with_calibration(spin: S, spins_per_us: u32) -> Self {
        Self { spin, spins_per_us }
    }

    pub fn spins_per_us(&self) -> u32 {
        self.spins_per_us
    }

    /// Busy-waits `us` microseconds.
    pub fn spin_sleep_us(&mut self, us: u32) {
        self.spin_for(spin_count(us, self.spins_per_us));
    }

    /// Busy-waits `ms` milliseconds.
    pub fn spin_sleep_ms(&mut self, ms: u32) {
        self.spin_for(spin_count(ms, self.spins_per_us).saturating_mul(1000));
    }

    #[inline(never)]
    fn spin_for(&mut self, iterations: u64) {
        for _ in 0..iterations {
            self.spin.spin();
        }
    }

    pub fn into_inner(self) -> S {
        self.spin
    }
}

impl<S: Spin> DelayNs for SpinDelay<S> {
    fn delay_ns(&mut self, ns: u32) {
        let iterations = (ns as u64 * self.spins_per_us as u64).div_ceil(1000);
        self.spin_for(iterations);
    }

    fn delay_us(&mut self, us: u32) {
        self.spin_sleep_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.spin_sleep_ms(ms);
    }
}
