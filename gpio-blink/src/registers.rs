//! BCM283x GPIO register block.

use crate::volatile::{ReadVolatile, Reserved, Volatile, WriteVolatile};

/// Start of the peripheral window as seen by the ARM core.
#[cfg(not(feature = "bcm2835"))]
pub const PERIPHERAL_BASE: usize = 0x3F00_0000;

/// Start of the peripheral window as seen by the ARM core.
#[cfg(feature = "bcm2835")]
pub const PERIPHERAL_BASE: usize = 0x2000_0000;

/// GPIO register block base address.
pub const GPIO_BASE: usize = PERIPHERAL_BASE + 0x20_0000;

/// Pin function codes written into a 3-bit `GPFSELn` field.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Input = 0b000,
    Output = 0b001,
    Alt0 = 0b100,
    Alt1 = 0b101,
    Alt2 = 0b110,
    Alt3 = 0b111,
    Alt4 = 0b011,
    Alt5 = 0b010,
}

/// Mask of a single function-select field, before shifting.
pub const FUNCTION_MASK: u32 = 0b111;

#[repr(C)]
#[allow(non_snake_case, dead_code)]
pub struct GpioRegisters {
    pub FSEL: [Volatile<u32>; 6],
    __r0: Reserved<u32>,
    pub SET: [WriteVolatile<u32>; 2],
    __r1: Reserved<u32>,
    pub CLR: [WriteVolatile<u32>; 2],
    __r2: Reserved<u32>,
    pub LEV: [ReadVolatile<u32>; 2],
}

const _: () = {
    use core::mem::{offset_of, size_of};

    assert!(offset_of!(GpioRegisters, FSEL) + size_of::<u32>() == 0x04);
    assert!(offset_of!(GpioRegisters, SET) == 0x1C);
    assert!(offset_of!(GpioRegisters, CLR) == 0x28);
    assert!(offset_of!(GpioRegisters, LEV) == 0x34);
    assert!(size_of::<GpioRegisters>() == 0x3C);
};

impl GpioRegisters {
    /// Overlays the register block on `addr`.
    ///
    /// # Safety
    ///
    /// `addr` must be the base of a GPIO register block (or memory laid out
    /// like one) that stays valid for the rest of the program.
    pub unsafe fn at(addr: usize) -> &'static GpioRegisters {
        unsafe { &*(addr as *const GpioRegisters) }
    }

    /// The SoC's GPIO block at [`GPIO_BASE`].
    ///
    /// # Safety
    ///
    /// Only valid when running on a BCM283x with the peripheral window
    /// mapped at [`PERIPHERAL_BASE`]. On any other machine the returned
    /// reference dangles.
    ///
    /// ```compile_fail,E0133
    /// let regs = gpio_blink::GpioRegisters::bcm();
    /// ```
    pub unsafe fn bcm() -> &'static GpioRegisters {
        unsafe { Self::at(GPIO_BASE) }
    }

    /// A block backed by ordinary memory with every register zeroed.
    pub const fn zeroed() -> GpioRegisters {
        GpioRegisters {
            FSEL: [const { Volatile::new(0) }; 6],
            __r0: Reserved::new(0),
            SET: [WriteVolatile::new(0), WriteVolatile::new(0)],
            __r1: Reserved::new(0),
            CLR: [WriteVolatile::new(0), WriteVolatile::new(0)],
            __r2: Reserved::new(0),
            LEV: [ReadVolatile::new(0), ReadVolatile::new(0)],
        }
    }
}
