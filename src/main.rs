// famicore - headless runner
//
// Loads a cartridge image, emulates a number of frames and reports timing
// and audio statistics. Real shells wire the frame callback and audio ring
// to a display/audio backend and pace `emulate_frame` themselves.

use famicore::emulator::{Emulator, EmulatorConfig};
use std::process;

fn main() {
    let mut args = std::env::args().skip(1);
    let rom_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: famicore <rom.nes> [frames]");
            process::exit(2);
        }
    };
    let frames: u64 = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(60);

    let config = EmulatorConfig::load_or_default();
    let mut emulator = Emulator::with_config(&config);

    if let Err(err) = emulator.load_rom(&rom_path) {
        eprintln!("famicore: {}", err);
        process::exit(1);
    }

    println!("famicore: running {} for {} frames", rom_path, frames);

    let mut total_cycles = 0u64;
    for _ in 0..frames {
        total_cycles += emulator.emulate_frame();
    }

    let mut audio = vec![0.0f32; 4096];
    let mut samples = 0usize;
    loop {
        // Drain whatever the APU produced; stop at the first short read
        let got = emulator.fill_audio(&mut audio);
        samples += got;
        if got < audio.len() {
            break;
        }
    }

    println!(
        "frames: {}  cpu cycles: {}  audio samples: {}",
        emulator.frame_count(),
        total_cycles,
        samples
    );
}
