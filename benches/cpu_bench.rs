// CPU benchmarks - instruction dispatch and execution throughput

use criterion::{criterion_group, criterion_main, Criterion};
use famicore::{Bus, Cpu};
use std::hint::black_box;

/// Fill RAM with a repeating instruction pattern and aim the PC at it
fn program(bus: &mut Bus, cpu: &mut Cpu, pattern: &[u8]) {
    let mut addr = 0u16;
    while (addr as usize) < 0x0700 {
        for &byte in pattern {
            bus.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }
    cpu.pc = 0;
}

fn bench_cpu_instructions(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_instructions");

    group.bench_function("nop", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        program(&mut bus, &mut cpu, &[0xEA]);

        b.iter(|| {
            if cpu.pc >= 0x0700 {
                cpu.pc = 0;
            }
            cpu.step(black_box(&mut bus));
        });
    });

    group.bench_function("lda_immediate", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        program(&mut bus, &mut cpu, &[0xA9, 0x42]);

        b.iter(|| {
            if cpu.pc >= 0x0700 {
                cpu.pc = 0;
            }
            cpu.step(black_box(&mut bus));
        });
    });

    group.bench_function("adc_absolute_x", |b| {
        let mut cpu = Cpu::new();
        let mut bus = Bus::new();
        cpu.x = 0x10;
        program(&mut bus, &mut cpu, &[0x7D, 0x00, 0x07]);

        b.iter(|| {
            if cpu.pc >= 0x0700 {
                cpu.pc = 0;
            }
            cpu.step(black_box(&mut bus));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cpu_instructions);
criterion_main!(benches);
