// PPU benchmarks - dot-clock and full-frame rendering throughput

use criterion::{criterion_group, criterion_main, Criterion};
use famicore::cartridge::{mappers::Mapper0, Cartridge, Mirroring};
use famicore::Ppu;
use std::hint::black_box;

fn chr_ram_mapper() -> Mapper0 {
    Mapper0::new(Cartridge {
        prg_rom: vec![0; 32 * 1024],
        chr: vec![0xAA; 8 * 1024],
        chr_is_ram: true,
        mirroring: Mirroring::Vertical,
        mapper: 0,
        battery: false,
    })
}

fn bench_ppu(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppu");

    group.bench_function("tick_rendering_enabled", |b| {
        let mut ppu = Ppu::new();
        let mut mapper = chr_ram_mapper();
        ppu.write_register(&mut mapper, 1, 0x1E);

        b.iter(|| {
            ppu.tick(black_box(&mut mapper));
        });
    });

    group.bench_function("full_frame", |b| {
        let mut ppu = Ppu::new();
        let mut mapper = chr_ram_mapper();
        ppu.write_register(&mut mapper, 1, 0x1E);

        b.iter(|| {
            let frame = ppu.frame();
            while ppu.frame() == frame {
                ppu.tick(&mut mapper);
            }
            black_box(ppu.frame_buffer());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_ppu);
criterion_main!(benches);
