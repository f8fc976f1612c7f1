// CPU execution - the fetch/decode/execute step and trace logging

use crate::bus::Bus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::{OpcodeInfo, OPCODE_TABLE};
use crate::cpu::{flags, Cpu, IRQ_VECTOR, NMI_VECTOR};

/// Cycles charged for servicing an interrupt
const INTERRUPT_CYCLES: u32 = 7;

impl Cpu {
    /// Execute exactly one step
    ///
    /// Returns the number of cycles consumed. A step is one of, in priority
    /// order:
    ///
    /// 1. A pending OAM-DMA transfer: the 256-byte copy runs and the CPU is
    ///    stalled for 513 cycles, plus one when it started on an odd cycle.
    /// 2. A pending DMC-fetch stall: the stalled cycles are consumed with no
    ///    instruction executed.
    /// 3. A pending interrupt: PC and flags are pushed (break clear in the
    ///    live flags, bit 4 forced set in the pushed byte), PC loads from the
    ///    vector, interrupt-disable is set, 7 cycles are charged, and no
    ///    instruction dispatches this step. NMI wins over IRQ.
    /// 4. An instruction: fetch, resolve the addressing mode, advance PC by
    ///    the table length, charge the base cost plus any page-cross or
    ///    branch penalty, and run the semantics.
    pub fn step(&mut self, bus: &mut Bus) -> u32 {
        if let Some(page) = bus.take_oam_dma() {
            bus.oam_dma_transfer(page);
            let cycles = 513 + (self.cycles % 2) as u32;
            self.cycles += cycles as u64;
            return cycles;
        }

        let stall = bus.take_stall();
        if stall > 0 {
            self.cycles += stall as u64;
            return stall;
        }

        if self.nmi_pending {
            self.nmi_pending = false;
            self.service_interrupt(bus, NMI_VECTOR);
            return INTERRUPT_CYCLES;
        }
        if self.irq_pending {
            self.irq_pending = false;
            self.service_interrupt(bus, IRQ_VECTOR);
            return INTERRUPT_CYCLES;
        }

        let opcode_pc = self.pc;
        let opcode = bus.read(opcode_pc);
        let info = &OPCODE_TABLE[opcode as usize];

        let result = self.resolve(info.mode, bus, opcode_pc.wrapping_add(1));
        self.pc = self.pc.wrapping_add(info.bytes as u16);

        let mut cycles = info.cycles as u32;
        if info.page_cycle && result.page_crossed {
            cycles += 1;
        }

        if info.illegal {
            // Undocumented opcode: a sized no-op, never fatal
            log::warn!("illegal opcode {:02X} at {:04X}", opcode, opcode_pc);
        } else {
            cycles += self.dispatch(opcode, bus, &result);
        }

        self.cycles += cycles as u64;
        cycles
    }

    /// Push state and vector for a hardware interrupt
    fn service_interrupt(&mut self, bus: &mut Bus, vector: u16) {
        self.push16(bus, self.pc);
        self.push(bus, self.status | flags::BREAK);
        self.pc = self.read16(bus, vector);
        self.update_flag(flags::INTERRUPT_DISABLE, true);
        self.cycles += INTERRUPT_CYCLES as u64;
    }

    /// Dispatch one documented opcode; returns extra cycles (branches only)
    fn dispatch(
        &mut self,
        opcode: u8,
        bus: &mut Bus,
        r: &crate::cpu::addressing::AddressingResult,
    ) -> u32 {
        match opcode {
            // Load/store
            0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 => self.lda(bus, r),
            0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => self.ldx(bus, r),
            0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => self.ldy(bus, r),
            0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 => self.sta(bus, r),
            0x86 | 0x96 | 0x8E => self.stx(bus, r),
            0x84 | 0x94 | 0x8C => self.sty(bus, r),

            // Arithmetic
            0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 => self.adc(bus, r),
            0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 => self.sbc(bus, r),
            0xE6 | 0xF6 | 0xEE | 0xFE => self.inc(bus, r),
            0xC6 | 0xD6 | 0xCE | 0xDE => self.dec(bus, r),
            0xE8 => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative(self.x);
            }
            0xC8 => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative(self.y);
            }
            0xCA => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative(self.x);
            }
            0x88 => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative(self.y);
            }

            // Logic
            0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 => self.and(bus, r),
            0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 => self.ora(bus, r),
            0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 => self.eor(bus, r),
            0x24 | 0x2C => self.bit(bus, r),

            // Shifts and rotates
            0x0A => self.asl(bus, r, true),
            0x06 | 0x16 | 0x0E | 0x1E => self.asl(bus, r, false),
            0x4A => self.lsr(bus, r, true),
            0x46 | 0x56 | 0x4E | 0x5E => self.lsr(bus, r, false),
            0x2A => self.rol(bus, r, true),
            0x26 | 0x36 | 0x2E | 0x3E => self.rol(bus, r, false),
            0x6A => self.ror(bus, r, true),
            0x66 | 0x76 | 0x6E | 0x7E => self.ror(bus, r, false),

            // Compares
            0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 => self.cmp(bus, r),
            0xE0 | 0xE4 | 0xEC => self.cpx(bus, r),
            0xC0 | 0xC4 | 0xCC => self.cpy(bus, r),

            // Branches (return extra cycles)
            0x90 => return self.branch_if(!self.get_flag(flags::CARRY), r),
            0xB0 => return self.branch_if(self.get_flag(flags::CARRY), r),
            0xF0 => return self.branch_if(self.get_flag(flags::ZERO), r),
            0xD0 => return self.branch_if(!self.get_flag(flags::ZERO), r),
            0x30 => return self.branch_if(self.get_flag(flags::NEGATIVE), r),
            0x10 => return self.branch_if(!self.get_flag(flags::NEGATIVE), r),
            0x70 => return self.branch_if(self.get_flag(flags::OVERFLOW), r),
            0x50 => return self.branch_if(!self.get_flag(flags::OVERFLOW), r),

            // Jumps and subroutines
            0x4C | 0x6C => self.jmp(r),
            0x20 => self.jsr(bus, r),
            0x60 => self.rts(bus),
            0x00 => self.brk(bus),
            0x40 => self.rti(bus),

            // Stack
            0x48 => self.pha(bus),
            0x68 => self.pla(bus),
            0x08 => self.php(bus),
            0x28 => self.plp(bus),

            // Transfers
            0xAA => self.tax(),
            0xA8 => self.tay(),
            0x8A => self.txa(),
            0x98 => self.tya(),
            0xBA => self.tsx(),
            0x9A => self.txs(),

            // Flag operations
            0x18 => self.update_flag(flags::CARRY, false),
            0x38 => self.update_flag(flags::CARRY, true),
            0x58 => self.update_flag(flags::INTERRUPT_DISABLE, false),
            0x78 => self.update_flag(flags::INTERRUPT_DISABLE, true),
            0xB8 => self.update_flag(flags::OVERFLOW, false),
            0xD8 => self.update_flag(flags::DECIMAL, false),
            0xF8 => self.update_flag(flags::DECIMAL, true),

            // NOP
            0xEA => {}

            // Unreachable: every other opcode is marked illegal in the table
            _ => {}
        }
        0
    }

    /// Format one trace line for the instruction at the current PC
    ///
    /// Layout follows the common nestest trace convention:
    /// `PC  B1 B2 B3  MNEMONIC operand  A:.. X:.. Y:.. P:.. SP:.. CYC:..`
    pub fn trace(&self, bus: &mut Bus) -> String {
        let pc = self.pc;
        let opcode = bus.read(pc);
        let info = &OPCODE_TABLE[opcode as usize];

        let b1 = opcode;
        let b2 = if info.bytes >= 2 {
            bus.read(pc.wrapping_add(1))
        } else {
            0
        };
        let b3 = if info.bytes >= 3 {
            bus.read(pc.wrapping_add(2))
        } else {
            0
        };

        let hex = match info.bytes {
            2 => format!("{:02X} {:02X}   ", b1, b2),
            3 => format!("{:02X} {:02X} {:02X}", b1, b2, b3),
            _ => format!("{:02X}      ", b1),
        };

        let operand = self.format_operand(info, pc, b2, b3);
        let disasm = format!("{} {}", info.mnemonic, operand);

        format!(
            "{:04X}  {}  {:<30}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, hex, disasm, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }

    /// Render the operand field of a trace line
    fn format_operand(&self, info: &OpcodeInfo, pc: u16, b2: u8, b3: u8) -> String {
        let word = u16::from_le_bytes([b2, b3]);
        match info.mode {
            AddressingMode::Implied => String::new(),
            AddressingMode::Accumulator => "A".to_string(),
            AddressingMode::Immediate => format!("#${:02X}", b2),
            AddressingMode::ZeroPage => format!("${:02X}", b2),
            AddressingMode::ZeroPageX => format!("${:02X},X", b2),
            AddressingMode::ZeroPageY => format!("${:02X},Y", b2),
            AddressingMode::Relative => {
                let target = pc.wrapping_add(2).wrapping_add(b2 as i8 as i16 as u16);
                format!("${:04X}", target)
            }
            AddressingMode::Absolute => format!("${:04X}", word),
            AddressingMode::AbsoluteX => format!("${:04X},X", word),
            AddressingMode::AbsoluteY => format!("${:04X},Y", word),
            AddressingMode::Indirect => format!("(${:04X})", word),
            AddressingMode::IndexedIndirect => format!("(${:02X},X)", b2),
            AddressingMode::IndirectIndexed => format!("(${:02X}),Y", b2),
        }
    }
}
