// famicore - a cycle-stepped NES emulation core
//
// The crate models the console's digital logic: a 6502 interpreter with
// per-instruction cycle accounting, a dot-clocked PPU, a sample-accurate
// APU, and the bus/mapper layer routing the 64KB address space. Display,
// input-device mapping and real-time pacing are left to embedding shells;
// the core exposes `Emulator::emulate_frame`, a frame callback, and an
// audio pull interface.

pub mod apu;
pub mod audio;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod emulator;
pub mod input;
pub mod ppu;

// Re-export the main types for convenience
pub use apu::Apu;
pub use audio::{SampleBuffer, SharedSampleBuffer};
pub use bus::Bus;
pub use cartridge::{create_mapper, Cartridge, INesError, INesHeader, Mapper, MapperError, Mirroring};
pub use cpu::Cpu;
pub use emulator::{Emulator, EmulatorConfig, LoadError};
pub use input::{Controller, ControllerIO};
pub use ppu::Ppu;
