// Opcode metadata table
//
// A fixed 256-entry table mapping every opcode, documented or not, to its
// addressing mode, byte length, base cycle cost and page-cross penalty flag.
// The table is complete by construction: undocumented opcodes carry their
// conventional sizes and timings and are dispatched as logged no-ops.

use crate::cpu::addressing::AddressingMode;

/// Static metadata for one opcode
pub struct OpcodeInfo {
    /// Mnemonic, "*"-prefixed for undocumented opcodes
    pub mnemonic: &'static str,
    /// Addressing mode
    pub mode: AddressingMode,
    /// Instruction length in bytes (opcode + operands)
    pub bytes: u8,
    /// Base cycle cost
    pub cycles: u8,
    /// Whether a page-crossing read adds one cycle
    pub page_cycle: bool,
    /// Undocumented opcode, executed as a sized no-op
    pub illegal: bool,
}

const fn op(
    mnemonic: &'static str,
    mode: AddressingMode,
    bytes: u8,
    cycles: u8,
    page_cycle: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        bytes,
        cycles,
        page_cycle,
        illegal: false,
    }
}

const fn ill(
    mnemonic: &'static str,
    mode: AddressingMode,
    bytes: u8,
    cycles: u8,
    page_cycle: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        bytes,
        cycles,
        page_cycle,
        illegal: true,
    }
}

use crate::cpu::addressing::AddressingMode::*;

/// The complete instruction metadata table, indexed by opcode
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeInfo; 256] = [
    // 0x00
    op("BRK", Implied, 1, 7, false),
    op("ORA", IndexedIndirect, 2, 6, false),
    ill("*KIL", Implied, 1, 2, false),
    ill("*SLO", IndexedIndirect, 2, 8, false),
    ill("*NOP", ZeroPage, 2, 3, false),
    op("ORA", ZeroPage, 2, 3, false),
    op("ASL", ZeroPage, 2, 5, false),
    ill("*SLO", ZeroPage, 2, 5, false),
    op("PHP", Implied, 1, 3, false),
    op("ORA", Immediate, 2, 2, false),
    op("ASL", Accumulator, 1, 2, false),
    ill("*ANC", Immediate, 2, 2, false),
    ill("*NOP", Absolute, 3, 4, false),
    op("ORA", Absolute, 3, 4, false),
    op("ASL", Absolute, 3, 6, false),
    ill("*SLO", Absolute, 3, 6, false),
    // 0x10
    op("BPL", Relative, 2, 2, false),
    op("ORA", IndirectIndexed, 2, 5, true),
    ill("*KIL", Implied, 1, 2, false),
    ill("*SLO", IndirectIndexed, 2, 8, false),
    ill("*NOP", ZeroPageX, 2, 4, false),
    op("ORA", ZeroPageX, 2, 4, false),
    op("ASL", ZeroPageX, 2, 6, false),
    ill("*SLO", ZeroPageX, 2, 6, false),
    op("CLC", Implied, 1, 2, false),
    op("ORA", AbsoluteY, 3, 4, true),
    ill("*NOP", Implied, 1, 2, false),
    ill("*SLO", AbsoluteY, 3, 7, false),
    ill("*NOP", AbsoluteX, 3, 4, true),
    op("ORA", AbsoluteX, 3, 4, true),
    op("ASL", AbsoluteX, 3, 7, false),
    ill("*SLO", AbsoluteX, 3, 7, false),
    // 0x20
    op("JSR", Absolute, 3, 6, false),
    op("AND", IndexedIndirect, 2, 6, false),
    ill("*KIL", Implied, 1, 2, false),
    ill("*RLA", IndexedIndirect, 2, 8, false),
    op("BIT", ZeroPage, 2, 3, false),
    op("AND", ZeroPage, 2, 3, false),
    op("ROL", ZeroPage, 2, 5, false),
    ill("*RLA", ZeroPage, 2, 5, false),
    op("PLP", Implied, 1, 4, false),
    op("AND", Immediate, 2, 2, false),
    op("ROL", Accumulator, 1, 2, false),
    ill("*ANC", Immediate, 2, 2, false),
    op("BIT", Absolute, 3, 4, false),
    op("AND", Absolute, 3, 4, false),
    op("ROL", Absolute, 3, 6, false),
    ill("*RLA", Absolute, 3, 6, false),
    // 0x30
    op("BMI", Relative, 2, 2, false),
    op("AND", IndirectIndexed, 2, 5, true),
    ill("*KIL", Implied, 1, 2, false),
    ill("*RLA", IndirectIndexed, 2, 8, false),
    ill("*NOP", ZeroPageX, 2, 4, false),
    op("AND", ZeroPageX, 2, 4, false),
    op("ROL", ZeroPageX, 2, 6, false),
    ill("*RLA", ZeroPageX, 2, 6, false),
    op("SEC", Implied, 1, 2, false),
    op("AND", AbsoluteY, 3, 4, true),
    ill("*NOP", Implied, 1, 2, false),
    ill("*RLA", AbsoluteY, 3, 7, false),
    ill("*NOP", AbsoluteX, 3, 4, true),
    op("AND", AbsoluteX, 3, 4, true),
    op("ROL", AbsoluteX, 3, 7, false),
    ill("*RLA", AbsoluteX, 3, 7, false),
    // 0x40
    op("RTI", Implied, 1, 6, false),
    op("EOR", IndexedIndirect, 2, 6, false),
    ill("*KIL", Implied, 1, 2, false),
    ill("*SRE", IndexedIndirect, 2, 8, false),
    ill("*NOP", ZeroPage, 2, 3, false),
    op("EOR", ZeroPage, 2, 3, false),
    op("LSR", ZeroPage, 2, 5, false),
    ill("*SRE", ZeroPage, 2, 5, false),
    op("PHA", Implied, 1, 3, false),
    op("EOR", Immediate, 2, 2, false),
    op("LSR", Accumulator, 1, 2, false),
    ill("*ALR", Immediate, 2, 2, false),
    op("JMP", Absolute, 3, 3, false),
    op("EOR", Absolute, 3, 4, false),
    op("LSR", Absolute, 3, 6, false),
    ill("*SRE", Absolute, 3, 6, false),
    // 0x50
    op("BVC", Relative, 2, 2, false),
    op("EOR", IndirectIndexed, 2, 5, true),
    ill("*KIL", Implied, 1, 2, false),
    ill("*SRE", IndirectIndexed, 2, 8, false),
    ill("*NOP", ZeroPageX, 2, 4, false),
    op("EOR", ZeroPageX, 2, 4, false),
    op("LSR", ZeroPageX, 2, 6, false),
    ill("*SRE", ZeroPageX, 2, 6, false),
    op("CLI", Implied, 1, 2, false),
    op("EOR", AbsoluteY, 3, 4, true),
    ill("*NOP", Implied, 1, 2, false),
    ill("*SRE", AbsoluteY, 3, 7, false),
    ill("*NOP", AbsoluteX, 3, 4, true),
    op("EOR", AbsoluteX, 3, 4, true),
    op("LSR", AbsoluteX, 3, 7, false),
    ill("*SRE", AbsoluteX, 3, 7, false),
    // 0x60
    op("RTS", Implied, 1, 6, false),
    op("ADC", IndexedIndirect, 2, 6, false),
    ill("*KIL", Implied, 1, 2, false),
    ill("*RRA", IndexedIndirect, 2, 8, false),
    ill("*NOP", ZeroPage, 2, 3, false),
    op("ADC", ZeroPage, 2, 3, false),
    op("ROR", ZeroPage, 2, 5, false),
    ill("*RRA", ZeroPage, 2, 5, false),
    op("PLA", Implied, 1, 4, false),
    op("ADC", Immediate, 2, 2, false),
    op("ROR", Accumulator, 1, 2, false),
    ill("*ARR", Immediate, 2, 2, false),
    op("JMP", Indirect, 3, 5, false),
    op("ADC", Absolute, 3, 4, false),
    op("ROR", Absolute, 3, 6, false),
    ill("*RRA", Absolute, 3, 6, false),
    // 0x70
    op("BVS", Relative, 2, 2, false),
    op("ADC", IndirectIndexed, 2, 5, true),
    ill("*KIL", Implied, 1, 2, false),
    ill("*RRA", IndirectIndexed, 2, 8, false),
    ill("*NOP", ZeroPageX, 2, 4, false),
    op("ADC", ZeroPageX, 2, 4, false),
    op("ROR", ZeroPageX, 2, 6, false),
    ill("*RRA", ZeroPageX, 2, 6, false),
    op("SEI", Implied, 1, 2, false),
    op("ADC", AbsoluteY, 3, 4, true),
    ill("*NOP", Implied, 1, 2, false),
    ill("*RRA", AbsoluteY, 3, 7, false),
    ill("*NOP", AbsoluteX, 3, 4, true),
    op("ADC", AbsoluteX, 3, 4, true),
    op("ROR", AbsoluteX, 3, 7, false),
    ill("*RRA", AbsoluteX, 3, 7, false),
    // 0x80
    ill("*NOP", Immediate, 2, 2, false),
    op("STA", IndexedIndirect, 2, 6, false),
    ill("*NOP", Immediate, 2, 2, false),
    ill("*SAX", IndexedIndirect, 2, 6, false),
    op("STY", ZeroPage, 2, 3, false),
    op("STA", ZeroPage, 2, 3, false),
    op("STX", ZeroPage, 2, 3, false),
    ill("*SAX", ZeroPage, 2, 3, false),
    op("DEY", Implied, 1, 2, false),
    ill("*NOP", Immediate, 2, 2, false),
    op("TXA", Implied, 1, 2, false),
    ill("*XAA", Immediate, 2, 2, false),
    op("STY", Absolute, 3, 4, false),
    op("STA", Absolute, 3, 4, false),
    op("STX", Absolute, 3, 4, false),
    ill("*SAX", Absolute, 3, 4, false),
    // 0x90
    op("BCC", Relative, 2, 2, false),
    op("STA", IndirectIndexed, 2, 6, false),
    ill("*KIL", Implied, 1, 2, false),
    ill("*AHX", IndirectIndexed, 2, 6, false),
    op("STY", ZeroPageX, 2, 4, false),
    op("STA", ZeroPageX, 2, 4, false),
    op("STX", ZeroPageY, 2, 4, false),
    ill("*SAX", ZeroPageY, 2, 4, false),
    op("TYA", Implied, 1, 2, false),
    op("STA", AbsoluteY, 3, 5, false),
    op("TXS", Implied, 1, 2, false),
    ill("*TAS", AbsoluteY, 3, 5, false),
    ill("*SHY", AbsoluteX, 3, 5, false),
    op("STA", AbsoluteX, 3, 5, false),
    ill("*SHX", AbsoluteY, 3, 5, false),
    ill("*AHX", AbsoluteY, 3, 5, false),
    // 0xA0
    op("LDY", Immediate, 2, 2, false),
    op("LDA", IndexedIndirect, 2, 6, false),
    op("LDX", Immediate, 2, 2, false),
    ill("*LAX", IndexedIndirect, 2, 6, false),
    op("LDY", ZeroPage, 2, 3, false),
    op("LDA", ZeroPage, 2, 3, false),
    op("LDX", ZeroPage, 2, 3, false),
    ill("*LAX", ZeroPage, 2, 3, false),
    op("TAY", Implied, 1, 2, false),
    op("LDA", Immediate, 2, 2, false),
    op("TAX", Implied, 1, 2, false),
    ill("*LAX", Immediate, 2, 2, false),
    op("LDY", Absolute, 3, 4, false),
    op("LDA", Absolute, 3, 4, false),
    op("LDX", Absolute, 3, 4, false),
    ill("*LAX", Absolute, 3, 4, false),
    // 0xB0
    op("BCS", Relative, 2, 2, false),
    op("LDA", IndirectIndexed, 2, 5, true),
    ill("*KIL", Implied, 1, 2, false),
    ill("*LAX", IndirectIndexed, 2, 5, true),
    op("LDY", ZeroPageX, 2, 4, false),
    op("LDA", ZeroPageX, 2, 4, false),
    op("LDX", ZeroPageY, 2, 4, false),
    ill("*LAX", ZeroPageY, 2, 4, false),
    op("CLV", Implied, 1, 2, false),
    op("LDA", AbsoluteY, 3, 4, true),
    op("TSX", Implied, 1, 2, false),
    ill("*LAS", AbsoluteY, 3, 4, true),
    op("LDY", AbsoluteX, 3, 4, true),
    op("LDA", AbsoluteX, 3, 4, true),
    op("LDX", AbsoluteY, 3, 4, true),
    ill("*LAX", AbsoluteY, 3, 4, true),
    // 0xC0
    op("CPY", Immediate, 2, 2, false),
    op("CMP", IndexedIndirect, 2, 6, false),
    ill("*NOP", Immediate, 2, 2, false),
    ill("*DCP", IndexedIndirect, 2, 8, false),
    op("CPY", ZeroPage, 2, 3, false),
    op("CMP", ZeroPage, 2, 3, false),
    op("DEC", ZeroPage, 2, 5, false),
    ill("*DCP", ZeroPage, 2, 5, false),
    op("INY", Implied, 1, 2, false),
    op("CMP", Immediate, 2, 2, false),
    op("DEX", Implied, 1, 2, false),
    ill("*AXS", Immediate, 2, 2, false),
    op("CPY", Absolute, 3, 4, false),
    op("CMP", Absolute, 3, 4, false),
    op("DEC", Absolute, 3, 6, false),
    ill("*DCP", Absolute, 3, 6, false),
    // 0xD0
    op("BNE", Relative, 2, 2, false),
    op("CMP", IndirectIndexed, 2, 5, true),
    ill("*KIL", Implied, 1, 2, false),
    ill("*DCP", IndirectIndexed, 2, 8, false),
    ill("*NOP", ZeroPageX, 2, 4, false),
    op("CMP", ZeroPageX, 2, 4, false),
    op("DEC", ZeroPageX, 2, 6, false),
    ill("*DCP", ZeroPageX, 2, 6, false),
    op("CLD", Implied, 1, 2, false),
    op("CMP", AbsoluteY, 3, 4, true),
    ill("*NOP", Implied, 1, 2, false),
    ill("*DCP", AbsoluteY, 3, 7, false),
    ill("*NOP", AbsoluteX, 3, 4, true),
    op("CMP", AbsoluteX, 3, 4, true),
    op("DEC", AbsoluteX, 3, 7, false),
    ill("*DCP", AbsoluteX, 3, 7, false),
    // 0xE0
    op("CPX", Immediate, 2, 2, false),
    op("SBC", IndexedIndirect, 2, 6, false),
    ill("*NOP", Immediate, 2, 2, false),
    ill("*ISC", IndexedIndirect, 2, 8, false),
    op("CPX", ZeroPage, 2, 3, false),
    op("SBC", ZeroPage, 2, 3, false),
    op("INC", ZeroPage, 2, 5, false),
    ill("*ISC", ZeroPage, 2, 5, false),
    op("INX", Implied, 1, 2, false),
    op("SBC", Immediate, 2, 2, false),
    op("NOP", Implied, 1, 2, false),
    ill("*SBC", Immediate, 2, 2, false),
    op("CPX", Absolute, 3, 4, false),
    op("SBC", Absolute, 3, 4, false),
    op("INC", Absolute, 3, 6, false),
    ill("*ISC", Absolute, 3, 6, false),
    // 0xF0
    op("BEQ", Relative, 2, 2, false),
    op("SBC", IndirectIndexed, 2, 5, true),
    ill("*KIL", Implied, 1, 2, false),
    ill("*ISC", IndirectIndexed, 2, 8, false),
    ill("*NOP", ZeroPageX, 2, 4, false),
    op("SBC", ZeroPageX, 2, 4, false),
    op("INC", ZeroPageX, 2, 6, false),
    ill("*ISC", ZeroPageX, 2, 6, false),
    op("SED", Implied, 1, 2, false),
    op("SBC", AbsoluteY, 3, 4, true),
    ill("*NOP", Implied, 1, 2, false),
    ill("*ISC", AbsoluteY, 3, 7, false),
    ill("*NOP", AbsoluteX, 3, 4, true),
    op("SBC", AbsoluteX, 3, 4, true),
    op("INC", AbsoluteX, 3, 7, false),
    ill("*ISC", AbsoluteX, 3, 7, false),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete() {
        // Every entry carries a size and a base cost so that even illegal
        // opcodes advance the PC and charge cycles
        for (opcode, info) in OPCODE_TABLE.iter().enumerate() {
            assert!(
                (1..=3).contains(&info.bytes),
                "opcode {:02X} has bad size",
                opcode
            );
            assert!(info.cycles >= 2, "opcode {:02X} has bad cycle count", opcode);
        }
    }

    #[test]
    fn test_known_entries() {
        let lda_imm = &OPCODE_TABLE[0xA9];
        assert_eq!(lda_imm.mnemonic, "LDA");
        assert_eq!(lda_imm.bytes, 2);
        assert_eq!(lda_imm.cycles, 2);

        let brk = &OPCODE_TABLE[0x00];
        assert_eq!(brk.mnemonic, "BRK");
        assert_eq!(brk.cycles, 7);

        let sta_abx = &OPCODE_TABLE[0x9D];
        assert_eq!(sta_abx.mnemonic, "STA");
        assert!(
            !sta_abx.page_cycle,
            "indexed stores never take the page-cross bonus"
        );

        let lda_abx = &OPCODE_TABLE[0xBD];
        assert!(lda_abx.page_cycle);
    }

    #[test]
    fn test_page_cycle_only_on_indexed_modes() {
        for (opcode, info) in OPCODE_TABLE.iter().enumerate() {
            if info.page_cycle {
                assert!(
                    matches!(
                        info.mode,
                        AddressingMode::AbsoluteX
                            | AddressingMode::AbsoluteY
                            | AddressingMode::IndirectIndexed
                    ),
                    "opcode {:02X} flags page cycle on a non-indexed mode",
                    opcode
                );
            }
        }
    }
}
