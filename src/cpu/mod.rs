// CPU module - 6502 processor core
//
// The interpreter is split across four files:
// - mod.rs: register file, status flags, stack helpers, interrupt lines
// - opcodes.rs: the immutable 256-entry instruction metadata table
// - addressing.rs: effective-address resolution for all 13 modes
// - instructions.rs: instruction semantics
// - execute.rs: the fetch/decode/execute step and trace logging

pub mod addressing;
pub mod execute;
pub mod instructions;
pub mod opcodes;

use crate::bus::Bus;

/// Processor status flags (P register)
///
/// Bit layout:
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001;
    pub const ZERO: u8 = 0b0000_0010;
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    pub const DECIMAL: u8 = 0b0000_1000; // decimal mode is ignored on this CPU variant
    pub const BREAK: u8 = 0b0001_0000;
    pub const UNUSED: u8 = 0b0010_0000; // always reads as 1
    pub const OVERFLOW: u8 = 0b0100_0000;
    pub const NEGATIVE: u8 = 0b1000_0000;
}

/// NMI vector address
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector address
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector address
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// The 6502 register file plus interrupt and stall bookkeeping
pub struct Cpu {
    /// Accumulator
    pub a: u8,
    /// Index register X
    pub x: u8,
    /// Index register Y
    pub y: u8,
    /// Stack pointer (stack lives at $0100-$01FF)
    pub sp: u8,
    /// Program counter
    pub pc: u16,
    /// Processor status flags
    pub status: u8,

    /// Total cycles executed since power-on
    pub cycles: u64,

    /// Pending edge-triggered NMI
    pub(crate) nmi_pending: bool,
    /// Pending maskable IRQ
    pub(crate) irq_pending: bool,
}

impl Cpu {
    /// Create a CPU in its power-on state
    ///
    /// The program counter is 0 until `reset` loads it from the reset
    /// vector; flags come up as $24 (unused + interrupt-disable).
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: flags::UNUSED | flags::INTERRUPT_DISABLE,
            cycles: 0,
            nmi_pending: false,
            irq_pending: false,
        }
    }

    /// Reset the CPU
    ///
    /// Loads PC from the reset vector at $FFFC/$FFFD, restores SP to $FD and
    /// flags to $24, clears the registers and any pending interrupts.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.pc = self.read16(bus, RESET_VECTOR);
        self.sp = 0xFD;
        self.status = flags::UNUSED | flags::INTERRUPT_DISABLE;
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.cycles = 0;
        self.nmi_pending = false;
        self.irq_pending = false;
    }

    /// Raise the non-maskable interrupt line
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Raise the maskable interrupt line
    ///
    /// Ignored while the interrupt-disable flag is set; the caller is
    /// expected to keep re-asserting a level interrupt each step.
    pub fn trigger_irq(&mut self) {
        if !self.get_flag(flags::INTERRUPT_DISABLE) {
            self.irq_pending = true;
        }
    }

    // ========================================
    // Status flag helpers
    // ========================================

    /// Test a status flag
    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    /// Set or clear a status flag
    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    /// Update Zero and Negative from a result value
    ///
    /// Every load/ALU/compare result feeds the flags through this one rule:
    /// zero when the result is 0, negative when bit 7 is set.
    #[inline]
    pub fn update_zero_and_negative(&mut self, value: u8) {
        self.update_flag(flags::ZERO, value == 0);
        self.update_flag(flags::NEGATIVE, value & 0x80 != 0);
    }

    // ========================================
    // Bus and stack helpers
    // ========================================

    /// Read a little-endian word
    pub(crate) fn read16(&self, bus: &mut Bus, addr: u16) -> u16 {
        let lo = bus.read(addr) as u16;
        let hi = bus.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Push a byte onto the stack at $0100 + SP
    pub(crate) fn push(&mut self, bus: &mut Bus, val: u8) {
        bus.write(0x0100 | self.sp as u16, val);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pull a byte from the stack
    pub(crate) fn pull(&mut self, bus: &mut Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 | self.sp as u16)
    }

    /// Push a word onto the stack, high byte first
    pub(crate) fn push16(&mut self, bus: &mut Bus, val: u16) {
        self.push(bus, (val >> 8) as u8);
        self.push(bus, val as u8);
    }

    /// Pull a word from the stack
    pub(crate) fn pull16(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.pull(bus) as u16;
        let hi = self.pull(bus) as u16;
        (hi << 8) | lo
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
