// PPU test suites


use crate::cartridge::{mappers::Mapper0, Cartridge, Mapper, Mirroring};

/// A CHR-RAM NROM mapper for driving the PPU in isolation
pub(super) fn test_mapper() -> Mapper0 {
    Mapper0::new(Cartridge {
        prg_rom: vec![0; 16 * 1024],
        chr: vec![0; 8 * 1024],
        chr_is_ram: true,
        mirroring: Mirroring::Vertical,
        mapper: 0,
        battery: false,
    })
}

/// Fill one 8x8 tile's low bitplane so every pixel has color 1
pub(super) fn fill_solid_tile(mapper: &mut dyn Mapper, table: u16, tile: u16) {
    let base = table + tile * 16;
    for row in 0..8 {
        mapper.write(base + row, 0xFF);
    }
}
