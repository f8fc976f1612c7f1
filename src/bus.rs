// Bus module - the single address-decode point
//
// Every CPU memory access lands here and is routed by address range:
//
// ```text
// $0000-$07FF: 2KB internal RAM
// $0800-$1FFF: RAM mirrors (every $0800)
// $2000-$3FFF: PPU registers (8 bytes, mirrored every 8)
// $4000-$4013: APU channel registers (write-only)
// $4014:       OAM DMA
// $4015:       APU status
// $4016:       controller port 0 (read) / strobe (write)
// $4017:       controller port 1 (read) / APU frame counter (write)
// $4018-$5FFF: open bus (logged; reads 0, writes discarded)
// $6000-$FFFF: cartridge via the mapper
// ```
//
// The bus also owns the OAM-DMA latch and the CPU stall accounting fed by
// the APU's DMC fetches, and routes the PPU/APU tick clocks to the mapper.

use crate::apu::Apu;
use crate::cartridge::Mapper;
use crate::input::ControllerIO;
use crate::ppu::Ppu;

/// Default audio sample rate when none is configured
const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default sample ring capacity
const DEFAULT_SAMPLE_CAPACITY: usize = 32_768;

/// The system bus
pub struct Bus {
    /// 2KB internal RAM, mirrored across $0000-$1FFF
    ram: [u8; 2048],
    /// Picture processing unit
    ppu: Ppu,
    /// Audio processing unit
    apu: Apu,
    /// Controller shift registers at $4016/$4017
    controller_io: ControllerIO,
    /// Cartridge mapper; emulation is inert until one is attached
    mapper: Option<Box<dyn Mapper>>,

    /// Page latched by a $4014 write, consumed by the CPU's next step
    dma_page: Option<u8>,
    /// CPU stall cycles accumulated by DMC sample fetches
    stall: u32,
}

impl Bus {
    /// Create a bus with default audio parameters and no cartridge
    pub fn new() -> Self {
        Self::with_audio(DEFAULT_SAMPLE_RATE, DEFAULT_SAMPLE_CAPACITY)
    }

    /// Create a bus with an APU producing samples at `sample_rate`
    pub fn with_audio(sample_rate: u32, sample_capacity: usize) -> Self {
        Bus {
            ram: [0; 2048],
            ppu: Ppu::new(),
            apu: Apu::new(sample_rate, sample_capacity),
            controller_io: ControllerIO::new(),
            mapper: None,
            dma_page: None,
            stall: 0,
        }
    }

    /// Attach the cartridge mapper
    pub fn attach_mapper(&mut self, mapper: Box<dyn Mapper>) {
        self.mapper = Some(mapper);
    }

    /// Read a byte
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => match self.mapper.as_deref_mut() {
                Some(mapper) => self.ppu.read_register(mapper, addr & 0x0007),
                None => 0,
            },
            // $4000-$4013 and $4014 are write-only
            0x4000..=0x4014 => 0,
            0x4015 => self.apu.read_status(),
            0x4016 => self.controller_io.read(0),
            0x4017 => self.controller_io.read(1),
            0x4018..=0x5FFF => {
                log::warn!("unknown bus read at {:04X}", addr);
                0
            }
            0x6000..=0xFFFF => match self.mapper.as_deref_mut() {
                Some(mapper) => mapper.read(addr),
                None => 0,
            },
        }
    }

    /// Write a byte
    pub fn write(&mut self, addr: u16, val: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = val,
            0x2000..=0x3FFF => {
                if let Some(mapper) = self.mapper.as_deref_mut() {
                    self.ppu.write_register(mapper, addr & 0x0007, val);
                }
            }
            0x4014 => self.dma_page = Some(val),
            0x4016 => self.controller_io.write(val),
            0x4000..=0x4013 | 0x4015 | 0x4017 => self.apu.write_register(addr, val),
            0x4018..=0x5FFF => {
                log::warn!("unknown bus write at {:04X} = {:02X}", addr, val);
            }
            0x6000..=0xFFFF => {
                if let Some(mapper) = self.mapper.as_deref_mut() {
                    mapper.write(addr, val);
                }
            }
        }
    }

    // ========================================
    // Clock distribution
    // ========================================

    /// Advance the PPU one dot and give the mapper its tick
    pub fn tick_ppu(&mut self) {
        if let Some(mapper) = self.mapper.as_deref_mut() {
            self.ppu.tick(&mut *mapper);
            mapper.tick();
        }
    }

    /// Advance the APU one CPU cycle, accumulating any DMC stall
    pub fn tick_apu(&mut self) {
        if let Some(mapper) = self.mapper.as_deref_mut() {
            self.stall += self.apu.tick(&mut *mapper);
        }
    }

    /// Drain the delayed NMI edge from the PPU
    pub fn poll_nmi(&mut self) -> bool {
        self.ppu.take_nmi()
    }

    /// Level state of the APU's IRQ line
    pub fn irq_asserted(&self) -> bool {
        self.apu.irq_asserted()
    }

    // ========================================
    // DMA and stall accounting
    // ========================================

    /// Take a latched OAM-DMA request
    pub(crate) fn take_oam_dma(&mut self) -> Option<u8> {
        self.dma_page.take()
    }

    /// Copy 256 bytes from `page << 8` into the PPU's OAM
    pub(crate) fn oam_dma_transfer(&mut self, page: u8) {
        let base = (page as u16) << 8;
        for i in 0..256u16 {
            let val = self.read(base + i);
            self.ppu.oam_dma_write(val);
        }
    }

    /// Take the accumulated DMC stall cycles
    pub(crate) fn take_stall(&mut self) -> u32 {
        std::mem::take(&mut self.stall)
    }

    // ========================================
    // Component access
    // ========================================

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    pub fn controllers_mut(&mut self) -> &mut ControllerIO {
        &mut self.controller_io
    }

    pub fn mapper(&self) -> Option<&dyn Mapper> {
        self.mapper.as_deref()
    }

    pub fn mapper_mut(&mut self) -> Option<&mut (dyn Mapper + 'static)> {
        self.mapper.as_deref_mut()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
