// Entry point the GPU firmware jumps to. Core 0 sets up a stack below the
// image, zeroes .bss and calls `kmain`; cores 1..3 sleep forever.
#[cfg(target_arch = "aarch64")]
core::arch::global_asm!(
    r#"
.section .text.boot
.global _start
_start:
    mrs     x1, mpidr_el1
    and     x1, x1, #3
    cbz     x1, 2f
1:
    wfe
    b       1b
2:
    ldr     x1, =_start
    mov     sp, x1
    ldr     x1, =__bss_start
    ldr     x2, =__bss_end
3:
    cmp     x1, x2
    b.hs    4f
    str     xzr, [x1], #8
    b       3b
4:
    bl      kmain
    b       1b
"#
);
