// APU test suites

mod mixer_tests;
mod register_tests;

use crate::cartridge::{mappers::Mapper0, Cartridge, Mirroring};

/// NROM mapper for DMC fetches during APU ticks
pub(super) fn test_mapper() -> Mapper0 {
    Mapper0::new(Cartridge {
        prg_rom: vec![0x55; 32 * 1024],
        chr: vec![0; 8 * 1024],
        chr_is_ram: true,
        mirroring: Mirroring::Horizontal,
        mapper: 0,
        battery: false,
    })
}
