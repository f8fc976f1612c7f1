//! Delta modulation channel

use crate::apu::constants::DMC_PERIOD_TABLE;
use crate::cartridge::Mapper;

/// Cycles the CPU is stalled for each sample byte fetched from the bus
const FETCH_STALL_CYCLES: u32 = 4;

/// 1-bit delta-modulated sample player
///
/// A byte reader walks the sample through cartridge space ($C000 upward,
/// wrapping to $8000), feeding a shift register whose bits nudge the 7-bit
/// output level up or down by 2. Each byte fetch steals the bus from the
/// CPU for a fixed 4-cycle stall, which the APU reports back to the
/// orchestrator.
pub struct DmcChannel {
    enabled: bool,
    /// Current 7-bit output level
    value: u8,

    /// Programmed sample start ($4012)
    sample_address: u16,
    /// Programmed sample length ($4013)
    sample_length: u16,
    /// Read cursor
    current_address: u16,
    /// Bytes remaining
    current_length: u16,

    /// Bits being played out
    shift_register: u8,
    /// Bits left in the shift register
    bit_count: u8,

    pub(crate) timer_value: u8,
    pub(crate) timer_period: u8,

    /// Loop flag ($4010 bit 6)
    looping: bool,
    /// IRQ enable ($4010 bit 7)
    irq_enabled: bool,
    /// End-of-sample interrupt flag
    pub(crate) irq_pending: bool,
}

impl DmcChannel {
    pub fn new() -> Self {
        DmcChannel {
            enabled: false,
            value: 0,
            sample_address: 0,
            sample_length: 0,
            current_address: 0,
            current_length: 0,
            shift_register: 0,
            bit_count: 0,
            timer_value: 0,
            timer_period: 0,
            looping: false,
            irq_enabled: false,
            irq_pending: false,
        }
    }

    /// $4010: IRQ enable, loop flag, rate index
    pub fn write_control(&mut self, val: u8) {
        self.irq_enabled = val & 0x80 != 0;
        if !self.irq_enabled {
            self.irq_pending = false;
        }
        self.looping = val & 0x40 != 0;
        self.timer_period = DMC_PERIOD_TABLE[(val & 0x0F) as usize];
    }

    /// $4011: direct load of the output level
    pub fn write_value(&mut self, val: u8) {
        self.value = val & 0x7F;
    }

    /// $4012: sample address = $C000 + 64 * value
    pub fn write_address(&mut self, val: u8) {
        self.sample_address = 0xC000 | ((val as u16) << 6);
    }

    /// $4013: sample length = 16 * value + 1
    pub fn write_length(&mut self, val: u8) {
        self.sample_length = ((val as u16) << 4) | 1;
    }

    /// $4015 channel enable bit; enabling an idle channel restarts the
    /// sample, disabling cuts the remaining bytes
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.current_length = 0;
        } else if self.current_length == 0 {
            self.restart();
        }
    }

    /// Bytes still queued?
    pub fn length_active(&self) -> bool {
        self.current_length > 0
    }

    fn restart(&mut self) {
        self.current_address = self.sample_address;
        self.current_length = self.sample_length;
    }

    /// Refill the shift register when it runs dry
    ///
    /// Returns the CPU stall cycles incurred by the fetch.
    fn clock_reader(&mut self, mapper: &mut dyn Mapper) -> u32 {
        if self.current_length == 0 || self.bit_count != 0 {
            return 0;
        }

        self.shift_register = mapper.read(self.current_address);
        self.bit_count = 8;

        self.current_address = self.current_address.checked_add(1).unwrap_or(0x8000);
        self.current_length -= 1;
        if self.current_length == 0 {
            if self.looping {
                self.restart();
            } else if self.irq_enabled {
                self.irq_pending = true;
            }
        }

        FETCH_STALL_CYCLES
    }

    /// Play out one bit: +2 or -2 on the output level, saturating
    fn clock_shifter(&mut self) {
        if self.bit_count == 0 {
            return;
        }
        if self.shift_register & 1 != 0 {
            if self.value <= 125 {
                self.value += 2;
            }
        } else if self.value >= 2 {
            self.value -= 2;
        }
        self.shift_register >>= 1;
        self.bit_count -= 1;
    }

    /// Timer clock (every other CPU cycle)
    ///
    /// Returns any CPU stall cycles caused by a sample fetch.
    pub fn clock_timer(&mut self, mapper: &mut dyn Mapper) -> u32 {
        if !self.enabled {
            return 0;
        }

        let stall = self.clock_reader(mapper);

        if self.timer_value == 0 {
            self.timer_value = self.timer_period;
            self.clock_shifter();
        } else {
            self.timer_value -= 1;
        }

        stall
    }

    /// Current amplitude (0-127)
    pub fn output(&self) -> u8 {
        self.value
    }
}

impl Default for DmcChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::{mappers::Mapper0, Cartridge, Mirroring};

    /// NROM cart whose PRG is a known ramp for sample fetches
    fn sample_mapper() -> Mapper0 {
        let mut prg = vec![0u8; 32 * 1024];
        for (i, byte) in prg.iter_mut().enumerate() {
            *byte = (i & 0xFF) as u8;
        }
        Mapper0::new(Cartridge {
            prg_rom: prg,
            chr: vec![0; 8 * 1024],
            chr_is_ram: true,
            mirroring: Mirroring::Horizontal,
            mapper: 0,
            battery: false,
        })
    }

    #[test]
    fn test_register_decoding() {
        let mut dmc = DmcChannel::new();

        dmc.write_address(0x10);
        assert_eq!(dmc.sample_address, 0xC400);

        dmc.write_length(0x02);
        assert_eq!(dmc.sample_length, 0x21);

        dmc.write_value(0xFF);
        assert_eq!(dmc.output(), 0x7F);
    }

    #[test]
    fn test_fetch_stalls_and_consumes_bytes() {
        let mut dmc = DmcChannel::new();
        let mut mapper = sample_mapper();

        dmc.write_control(0x0F);
        dmc.write_address(0x00);
        dmc.write_length(0x00); // 1 byte
        dmc.set_enabled(true);

        // First timer clock fetches the byte and stalls the CPU
        let stall = dmc.clock_timer(&mut mapper);
        assert_eq!(stall, FETCH_STALL_CYCLES);
        assert!(!dmc.length_active(), "single-byte sample consumed");

        // No further fetches, no further stalls
        assert_eq!(dmc.clock_timer(&mut mapper), 0);
    }

    #[test]
    fn test_delta_steps_move_output() {
        let mut dmc = DmcChannel::new();
        let mut mapper = sample_mapper();

        dmc.write_control(0x00); // fastest rate irrelevant; period from table
        dmc.write_value(64);
        dmc.write_address(0x00);
        dmc.write_length(0x00);
        dmc.set_enabled(true);

        dmc.clock_timer(&mut mapper); // fetch
        let before = dmc.output();
        // Play all 8 bits
        for _ in 0..8 * (dmc.timer_period as u32 + 1) {
            dmc.clock_timer(&mut mapper);
        }
        assert_ne!(dmc.output(), before);
        assert!(dmc.output() <= 127);
    }

    #[test]
    fn test_loop_restarts_sample() {
        let mut dmc = DmcChannel::new();
        let mut mapper = sample_mapper();

        dmc.write_control(0x40); // loop
        dmc.write_address(0x00);
        dmc.write_length(0x00);
        dmc.set_enabled(true);

        dmc.clock_timer(&mut mapper);
        assert!(dmc.length_active(), "looping sample restarts itself");
        assert!(!dmc.irq_pending);
    }

    #[test]
    fn test_irq_on_sample_end() {
        let mut dmc = DmcChannel::new();
        let mut mapper = sample_mapper();

        dmc.write_control(0x8F); // IRQ enabled
        dmc.write_address(0x00);
        dmc.write_length(0x00);
        dmc.set_enabled(true);

        dmc.clock_timer(&mut mapper);
        assert!(dmc.irq_pending);

        // Clearing the IRQ enable bit acknowledges the flag
        dmc.write_control(0x0F);
        assert!(!dmc.irq_pending);
    }
}
