// PPU memory routing - pattern tables, nametables, palette RAM

use super::constants::NAMETABLE_SIZE;
use super::Ppu;
use crate::cartridge::{Mapper, Mirroring};

/// Physical nametable page for each of the four logical tables, per mode
///
/// Rows: horizontal, vertical, single-screen 0, single-screen 1, four-screen.
/// Four-screen indexes past the console's 2KB and is reduced modulo the VRAM
/// size, since the cartridge-supplied extra pages are outside this core.
const MIRROR_LOOKUP: [[usize; 4]; 5] = [
    [0, 0, 1, 1],
    [0, 1, 0, 1],
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [0, 1, 2, 3],
];

fn mirror_row(mode: Mirroring) -> &'static [usize; 4] {
    let row = match mode {
        Mirroring::Horizontal => 0,
        Mirroring::Vertical => 1,
        Mirroring::SingleScreen0 => 2,
        Mirroring::SingleScreen1 => 3,
        Mirroring::FourScreen => 4,
    };
    &MIRROR_LOOKUP[row]
}

impl Ppu {
    /// Fold a nametable address ($2000-$3EFF) onto the 2KB VRAM
    pub(crate) fn mirror_vram_index(&self, mode: Mirroring, addr: u16) -> usize {
        let addr = (addr as usize - 0x2000) % 0x1000;
        let table = addr / NAMETABLE_SIZE;
        let offset = addr % NAMETABLE_SIZE;
        (mirror_row(mode)[table] * NAMETABLE_SIZE + offset) % self.vram.len()
    }

    /// Fold a palette address onto the 32-byte palette RAM
    ///
    /// Entries $10/$14/$18/$1C mirror $00/$04/$08/$0C: sprite palette slot 0
    /// is the shared backdrop color.
    fn mirror_palette_index(addr: u16) -> usize {
        let mut index = (addr & 0x1F) as usize;
        if index >= 16 && index % 4 == 0 {
            index -= 16;
        }
        index
    }

    /// Read palette RAM through the mirror rule
    pub(crate) fn palette_read(&self, addr: u16) -> u8 {
        self.palette_ram[Self::mirror_palette_index(addr)]
    }

    /// Write palette RAM through the mirror rule
    pub(crate) fn palette_write(&mut self, addr: u16, val: u8) {
        self.palette_ram[Self::mirror_palette_index(addr)] = val;
    }

    /// Read a byte from PPU address space ($0000-$3FFF)
    pub(crate) fn ppu_read(&self, mapper: &mut dyn Mapper, addr: u16) -> u8 {
        let addr = addr % 0x4000;
        if addr < 0x2000 {
            mapper.read(addr)
        } else if addr < 0x3F00 {
            self.vram[self.mirror_vram_index(mapper.mirroring(), addr)]
        } else {
            self.palette_read(addr % 32)
        }
    }

    /// Write a byte into PPU address space ($0000-$3FFF)
    pub(crate) fn ppu_write(&mut self, mapper: &mut dyn Mapper, addr: u16, val: u8) {
        let addr = addr % 0x4000;
        if addr < 0x2000 {
            mapper.write(addr, val);
        } else if addr < 0x3F00 {
            let index = self.mirror_vram_index(mapper.mirroring(), addr);
            self.vram[index] = val;
        } else {
            self.palette_write(addr % 32, val);
        }
    }
}
