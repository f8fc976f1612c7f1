// Emulator module - the clock orchestrator
//
// Drives the shared clock relationship: one CPU step, then three PPU dots
// (plus a mapper tick) per CPU cycle and one APU tick per CPU cycle, with
// DMA stalls consumed by the CPU before its next instruction.

mod config;

pub use config::{AudioConfig, EmulatorConfig, VideoConfig};

use crate::apu::CPU_CLOCK_HZ;
use crate::bus::Bus;
use crate::cartridge::{create_mapper, Cartridge, INesError, MapperError};
use crate::cpu::Cpu;
use crate::input::Controller;
use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};
use std::path::Path;

/// NTSC CPU clock rate, re-exported for pacing shells
pub const CLOCK_HZ: u32 = CPU_CLOCK_HZ;

/// Callback receiving each completed 256x240 frame
pub type FrameCallback = Box<dyn FnMut(&[u32])>;

/// Errors that prevent the emulator from starting
///
/// Both variants are fatal: without a parseable image and a supported
/// mapper there is no program memory to execute.
#[derive(Debug)]
pub enum LoadError {
    /// The cartridge image could not be parsed
    Cartridge(INesError),
    /// The image names a mapper this core does not implement
    Mapper(MapperError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Cartridge(err) => write!(f, "{}", err),
            LoadError::Mapper(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<INesError> for LoadError {
    fn from(err: INesError) -> Self {
        LoadError::Cartridge(err)
    }
}

impl From<MapperError> for LoadError {
    fn from(err: MapperError) -> Self {
        LoadError::Mapper(err)
    }
}

/// The emulator: CPU + bus, plus the frame hand-off callback
pub struct Emulator {
    cpu: Cpu,
    bus: Bus,
    frame_callback: Option<FrameCallback>,
}

impl Emulator {
    /// Create an emulator with default configuration and no cartridge
    pub fn new() -> Self {
        Self::with_config(&EmulatorConfig::default())
    }

    /// Create an emulator from a configuration
    pub fn with_config(config: &EmulatorConfig) -> Self {
        Emulator {
            cpu: Cpu::new(),
            bus: Bus::with_audio(config.audio.sample_rate, config.audio.ring_capacity()),
            frame_callback: None,
        }
    }

    /// Load a cartridge from an iNES file and reset
    ///
    /// # Errors
    /// Fatal on unreadable/truncated images and on unsupported mapper ids.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let cartridge = Cartridge::from_ines_file(path)?;
        self.insert_cartridge(cartridge)
    }

    /// Load a cartridge from an iNES image in memory and reset
    pub fn load_rom_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        let cartridge = Cartridge::from_ines_bytes(bytes)?;
        self.insert_cartridge(cartridge)
    }

    fn insert_cartridge(&mut self, cartridge: Cartridge) -> Result<(), LoadError> {
        let mapper = create_mapper(cartridge)?;
        self.bus.attach_mapper(mapper);
        self.reset();
        Ok(())
    }

    /// Press the reset button: CPU vectors through $FFFC, PPU timing
    /// restarts; cartridge RAM survives
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        self.bus.ppu_mut().reset();
    }

    /// Register the collaborator receiving each completed frame
    pub fn set_frame_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&[u32]) + 'static,
    {
        self.frame_callback = Some(Box::new(callback));
    }

    /// Run one CPU step and fan its cycles out to the other clocks
    ///
    /// Returns the CPU cycles consumed. Interrupt lines are polled first so
    /// that edges raised during the previous step are serviced before the
    /// next instruction.
    pub fn step(&mut self) -> u32 {
        if self.bus.poll_nmi() {
            self.cpu.trigger_nmi();
        }
        if self.bus.irq_asserted() {
            self.cpu.trigger_irq();
        }

        let cycles = self.cpu.step(&mut self.bus);

        // 3 PPU dots (each with a mapper tick) per CPU cycle
        for _ in 0..cycles * 3 {
            self.bus.tick_ppu();
        }
        // 1 APU tick per CPU cycle
        for _ in 0..cycles {
            self.bus.tick_apu();
        }

        cycles
    }

    /// Run until the PPU completes the current frame
    ///
    /// Returns the CPU cycles consumed. The completed frame is pushed to
    /// the registered frame callback.
    pub fn emulate_frame(&mut self) -> u64 {
        if self.bus.mapper().is_none() {
            log::warn!("emulate_frame called with no cartridge loaded");
            return 0;
        }

        let frame = self.bus.ppu().frame();
        let mut cycles = 0u64;

        while self.bus.ppu().frame() == frame {
            cycles += self.step() as u64;
        }

        if self.bus.ppu_mut().take_frame_ready() {
            if let Some(callback) = self.frame_callback.as_mut() {
                callback(self.bus.ppu().frame_buffer());
            }
        }

        cycles
    }

    /// Drain mixed audio samples (silence on underrun)
    pub fn fill_audio(&self, out: &mut [f32]) -> usize {
        self.bus.apu().fill(out)
    }

    /// Controller on the given port (0 or 1)
    pub fn controller_mut(&mut self, port: usize) -> &mut Controller {
        self.bus.controllers_mut().controller_mut(port)
    }

    /// The last completed frame
    pub fn frame_buffer(&self) -> &[u32] {
        self.bus.ppu().frame_buffer()
    }

    /// Completed-frame count
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu().frame()
    }

    /// Total CPU cycles executed
    pub fn cpu_cycles(&self) -> u64 {
        self.cpu.cycles
    }

    /// Battery-backed cartridge RAM, when the board carries it
    pub fn sram(&self) -> Option<&[u8]> {
        self.bus.mapper().and_then(|m| m.prg_ram())
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Expected frame-buffer length for callers allocating their own copy
    pub fn frame_pixels() -> usize {
        SCREEN_WIDTH * SCREEN_HEIGHT
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
