//! Volatile memory cells for memory-mapped registers.
//!
//! Every access goes through `read_volatile`/`write_volatile`, so the
//! compiler never elides, merges or caches a register access and keeps
//! them in program order relative to each other.

use core::cell::UnsafeCell;
use core::ops::{BitAnd, BitOr};
use core::ptr::{read_volatile, write_volatile};

/// A read/write register.
#[repr(transparent)]
pub struct Volatile<T: Copy>(UnsafeCell<T>);

/// A register that only supports reads.
#[repr(transparent)]
pub struct ReadVolatile<T: Copy>(UnsafeCell<T>);

/// A register the hardware treats as write-only.
///
/// Reads are still allowed: on the GPIO block they return zero, which is
/// what the read-modify-write in `set`/`clear` relies on.
#[repr(transparent)]
pub struct WriteVolatile<T: Copy>(UnsafeCell<T>);

/// Padding between registers. Has no accessors.
#[repr(transparent)]
#[allow(dead_code)]
pub struct Reserved<T: Copy>(UnsafeCell<T>);

// Registers are only touched from the single execution context.
unsafe impl<T: Copy> Sync for Volatile<T> {}
unsafe impl<T: Copy> Sync for ReadVolatile<T> {}
unsafe impl<T: Copy> Sync for WriteVolatile<T> {}
unsafe impl<T: Copy> Sync for Reserved<T> {}

macro_rules! cell_new {
    ($($cell:ident),*) => {
        $(
            impl<T: Copy> $cell<T> {
                /// Creates a cell holding `value`. Used to back a register
                /// block with ordinary memory.
                pub const fn new(value: T) -> Self {
                    Self(UnsafeCell::new(value))
                }
            }
        )*
    };
}

cell_new!(Volatile, ReadVolatile, WriteVolatile, Reserved);

macro_rules! cell_read {
    ($($cell:ident),*) => {
        $(
            impl<T: Copy> $cell<T> {
                /// Volatile read of the cell.
                #[inline(always)]
                pub fn read(&self) -> T {
                    unsafe { read_volatile(self.0.get()) }
                }
            }
        )*
    };
}

cell_read!(Volatile, ReadVolatile, WriteVolatile);

macro_rules! cell_write {
    ($($cell:ident),*) => {
        $(
            impl<T: Copy> $cell<T> {
                /// Volatile write of `value` into the cell.
                #[inline(always)]
                pub fn write(&self, value: T) {
                    unsafe { write_volatile(self.0.get(), value) }
                }

                /// Reads the cell, applies `f`, writes the result back.
                #[inline(always)]
                pub fn modify<F: FnOnce(T) -> T>(&self, f: F) {
                    self.write(f(self.read()));
                }

                /// `*cell |= mask`
                #[inline(always)]
                pub fn or_mask(&self, mask: T)
                where
                    T: BitOr<Output = T>,
                {
                    self.modify(|value| value | mask);
                }

                /// `*cell &= mask`
                #[inline(always)]
                pub fn and_mask(&self, mask: T)
                where
                    T: BitAnd<Output = T>,
                {
                    self.modify(|value| value & mask);
                }
            }
        )*
    };
}

cell_write!(Volatile, WriteVolatile);
