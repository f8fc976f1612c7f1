// APU register interface tests

use super::test_mapper;
use crate::apu::Apu;

fn apu() -> Apu {
    Apu::new(44_100, 4096)
}

#[test]
fn test_status_reports_active_lengths() {
    let mut apu = apu();

    assert_eq!(apu.read_status() & 0x1F, 0, "all channels idle at power-on");

    // Enable pulse 1 and load a length
    apu.write_register(0x4015, 0x01);
    apu.write_register(0x4003, 0x08); // length index 1

    assert_eq!(apu.read_status() & 0x1F, 0x01);
}

#[test]
fn test_disable_clears_length() {
    let mut apu = apu();

    apu.write_register(0x4015, 0x0F);
    apu.write_register(0x4003, 0x08);
    apu.write_register(0x4007, 0x08);
    assert_eq!(apu.read_status() & 0x03, 0x03);

    apu.write_register(0x4015, 0x00);
    assert_eq!(apu.read_status() & 0x1F, 0, "disabling clears the counters");
}

#[test]
fn test_length_load_ignored_while_disabled() {
    let mut apu = apu();

    apu.write_register(0x4003, 0x08); // pulse 1 disabled
    assert_eq!(apu.read_status() & 0x01, 0);
}

#[test]
fn test_frame_irq_reported_and_cleared_by_status_read() {
    let mut apu = apu();
    let mut mapper = test_mapper();

    // Run a full 4-step sequence to raise the frame IRQ
    for _ in 0..29_830 {
        apu.tick(&mut mapper);
    }
    assert!(apu.irq_asserted());

    let status = apu.read_status();
    assert!(status & 0x40 != 0, "frame IRQ visible in bit 6");
    assert!(!apu.irq_asserted(), "status read acknowledges the frame IRQ");
}

#[test]
fn test_irq_inhibit_via_4017() {
    let mut apu = apu();
    let mut mapper = test_mapper();

    apu.write_register(0x4017, 0x40); // inhibit
    for _ in 0..29_830 {
        apu.tick(&mut mapper);
    }
    assert!(!apu.irq_asserted());
}

#[test]
fn test_five_step_mode_never_interrupts() {
    let mut apu = apu();
    let mut mapper = test_mapper();

    apu.write_register(0x4017, 0x80);
    for _ in 0..37_282 {
        apu.tick(&mut mapper);
    }
    assert!(!apu.irq_asserted());
}

#[test]
fn test_dmc_fetch_returns_stall_cycles() {
    let mut apu = apu();
    let mut mapper = test_mapper();

    apu.write_register(0x4010, 0x0F);
    apu.write_register(0x4012, 0x00);
    apu.write_register(0x4013, 0x01); // 17 bytes
    apu.write_register(0x4015, 0x10);

    // The first divide-by-2 tick that runs the DMC fetches a byte
    let mut stall_seen = 0;
    for _ in 0..4 {
        stall_seen += apu.tick(&mut mapper);
    }
    assert_eq!(stall_seen, 4, "one fetch stalls the CPU four cycles");
}

#[test]
fn test_samples_accumulate_in_ring() {
    let mut apu = apu();
    let mut mapper = test_mapper();

    // One frame's worth of CPU cycles at 44.1kHz yields ~735 samples
    for _ in 0..29_830 {
        apu.tick(&mut mapper);
    }
    let buffered = apu.sample_buffer().lock().unwrap().len();
    assert!(
        (700..800).contains(&buffered),
        "expected ~735 samples, got {}",
        buffered
    );

    let mut out = vec![0.0f32; buffered];
    assert_eq!(apu.fill(&mut out), buffered);
    assert!(apu.sample_buffer().lock().unwrap().is_empty());
}
