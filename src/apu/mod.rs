// APU module - audio processing unit
//
// Five sound generators, a frame sequencer clocking their envelope/sweep/
// length units, a non-linear mixer, and a fixed-ratio downsampler feeding
// the shared sample ring.
//
// `tick` runs once per CPU cycle. The triangle timer is clocked every tick;
// pulse, noise and DMC timers every other tick. The DMC's byte reader may
// steal the bus, which surfaces as CPU stall cycles in `tick`'s return
// value.

pub mod channels;
pub mod components;
pub mod constants;

#[cfg(test)]
mod tests;

use crate::audio::{shared_buffer, SharedSampleBuffer};
use crate::cartridge::Mapper;
use channels::{DmcChannel, NoiseChannel, PulseChannel, TriangleChannel};
use components::{FrameCounter, FrameEvent};

/// NTSC CPU clock rate; the APU tick rate
pub const CPU_CLOCK_HZ: u32 = 1_789_773;

/// The audio processing unit
pub struct Apu {
    pulse1: PulseChannel,
    pulse2: PulseChannel,
    triangle: TriangleChannel,
    noise: NoiseChannel,
    dmc: DmcChannel,

    frame_counter: FrameCounter,

    /// Ticks since power-on
    cycle: u64,
    /// CPU cycles per output sample
    sample_period: f64,

    /// Mixer lookup, indexed by pulse1 + pulse2 (0-30)
    pulse_table: [f32; 32],
    /// Mixer lookup, indexed by 3*triangle + 2*noise + dmc (0-202)
    tnd_table: [f32; 204],

    /// Ring buffer shared with the audio callback thread
    samples: SharedSampleBuffer,
}

impl Apu {
    /// Create an APU producing samples at `sample_rate`, buffering up to
    /// `buffer_capacity` of them
    ///
    /// The mixer tables are precomputed here, once, from the hardware's
    /// non-linear transfer function.
    pub fn new(sample_rate: u32, buffer_capacity: usize) -> Self {
        let mut pulse_table = [0.0f32; 32];
        for (n, entry) in pulse_table.iter_mut().enumerate().skip(1) {
            *entry = 95.52 / (8128.0 / n as f32 + 100.0);
        }
        let mut tnd_table = [0.0f32; 204];
        for (n, entry) in tnd_table.iter_mut().enumerate().skip(1) {
            *entry = 163.67 / (24329.0 / n as f32 + 100.0);
        }

        Apu {
            pulse1: PulseChannel::new(1),
            pulse2: PulseChannel::new(2),
            triangle: TriangleChannel::new(),
            noise: NoiseChannel::new(),
            dmc: DmcChannel::new(),
            frame_counter: FrameCounter::new(),
            cycle: 0,
            sample_period: CPU_CLOCK_HZ as f64 / sample_rate as f64,
            pulse_table,
            tnd_table,
            samples: shared_buffer(buffer_capacity),
        }
    }

    /// Advance one CPU cycle
    ///
    /// Returns CPU stall cycles incurred by DMC sample fetches.
    pub fn tick(&mut self, mapper: &mut dyn Mapper) -> u32 {
        let c1 = self.cycle;
        self.cycle += 1;
        let c2 = self.cycle;

        let mut stall = 0;
        if c2 % 2 == 0 {
            self.pulse1.clock_timer();
            self.pulse2.clock_timer();
            self.noise.clock_timer();
            stall = self.dmc.clock_timer(mapper);
        }
        self.triangle.clock_timer();

        for event in self.frame_counter.clock() {
            self.apply_frame_event(event);
        }

        // Emit a sample whenever the cycle count crosses a sample boundary
        let s1 = (c1 as f64 / self.sample_period) as u64;
        let s2 = (c2 as f64 / self.sample_period) as u64;
        if s1 != s2 {
            let sample = self.output();
            self.samples.lock().unwrap().push(sample);
        }

        stall
    }

    /// Route a frame-sequencer edge to the channel units
    fn apply_frame_event(&mut self, event: FrameEvent) {
        match event {
            FrameEvent::QuarterFrame => self.clock_quarter_frame(),
            FrameEvent::HalfFrame => {
                self.clock_quarter_frame();
                self.pulse1.clock_sweep_and_length();
                self.pulse2.clock_sweep_and_length();
                self.triangle.clock_length_counter();
                self.noise.clock_length_counter();
            }
            FrameEvent::SetIrq => {} // the flag lives in the frame counter
        }
    }

    fn clock_quarter_frame(&mut self) {
        self.pulse1.clock_envelope();
        self.pulse2.clock_envelope();
        self.triangle.clock_linear_counter();
        self.noise.clock_envelope();
    }

    /// Mix the channel outputs into one sample in [0, 1)
    pub fn output(&self) -> f32 {
        let p1 = self.pulse1.output() as usize;
        let p2 = self.pulse2.output() as usize;
        let t = self.triangle.output() as usize;
        let n = self.noise.output() as usize;
        let d = self.dmc.output() as usize;
        self.pulse_table[p1 + p2] + self.tnd_table[3 * t + 2 * n + d]
    }

    /// Either interrupt source asserted?
    pub fn irq_asserted(&self) -> bool {
        self.frame_counter.irq_pending() || self.dmc.irq_pending
    }

    /// Handle to the sample ring for an audio backend
    pub fn sample_buffer(&self) -> SharedSampleBuffer {
        std::sync::Arc::clone(&self.samples)
    }

    /// Drain mixed samples into caller-owned storage (silence on underrun)
    pub fn fill(&self, out: &mut [f32]) -> usize {
        self.samples.lock().unwrap().fill(out)
    }

    // ========================================
    // Register interface
    // ========================================

    /// Write an APU register ($4000-$4017)
    pub fn write_register(&mut self, addr: u16, val: u8) {
        match addr {
            0x4000 => self.pulse1.write_control(val),
            0x4001 => self.pulse1.write_sweep(val),
            0x4002 => self.pulse1.write_timer_low(val),
            0x4003 => self.pulse1.write_timer_high(val),

            0x4004 => self.pulse2.write_control(val),
            0x4005 => self.pulse2.write_sweep(val),
            0x4006 => self.pulse2.write_timer_low(val),
            0x4007 => self.pulse2.write_timer_high(val),

            0x4008 => self.triangle.write_control(val),
            0x400A => self.triangle.write_timer_low(val),
            0x400B => self.triangle.write_timer_high(val),

            0x400C => self.noise.write_control(val),
            0x400E => self.noise.write_period(val),
            0x400F => self.noise.write_length(val),

            0x4010 => self.dmc.write_control(val),
            0x4011 => self.dmc.write_value(val),
            0x4012 => self.dmc.write_address(val),
            0x4013 => self.dmc.write_length(val),

            0x4015 => self.write_status(val),
            0x4017 => {
                for event in self.frame_counter.write_control(val) {
                    self.apply_frame_event(event);
                }
            }

            _ => {}
        }
    }

    /// $4015 write: per-channel enable mask; acknowledges the DMC IRQ
    fn write_status(&mut self, val: u8) {
        self.pulse1.set_enabled(val & 0x01 != 0);
        self.pulse2.set_enabled(val & 0x02 != 0);
        self.triangle.set_enabled(val & 0x04 != 0);
        self.noise.set_enabled(val & 0x08 != 0);
        self.dmc.set_enabled(val & 0x10 != 0);
        self.dmc.irq_pending = false;
    }

    /// $4015 read: length-active bits plus the interrupt flags; reading
    /// acknowledges the frame IRQ
    pub fn read_status(&mut self) -> u8 {
        let mut status = 0u8;
        if self.pulse1.length_active() {
            status |= 0x01;
        }
        if self.pulse2.length_active() {
            status |= 0x02;
        }
        if self.triangle.length_active() {
            status |= 0x04;
        }
        if self.noise.length_active() {
            status |= 0x08;
        }
        if self.dmc.length_active() {
            status |= 0x10;
        }
        if self.frame_counter.irq_pending() {
            status |= 0x40;
        }
        if self.dmc.irq_pending {
            status |= 0x80;
        }

        self.frame_counter.clear_irq();
        status
    }
}
