//! Pulse wave channel

use crate::apu::components::{Envelope, LengthCounter, Sweep, Timer};
use crate::apu::constants::DUTY_PATTERNS;

/// Square wave generator, used for both pulse channels
///
/// The timer steps an 8-position duty sequencer; envelope, sweep and length
/// counter shape the result. Register layout:
///
/// - reg 0: duty (bits 6-7), halt/loop (5), envelope control (0-4)
/// - reg 1: sweep unit
/// - reg 2: timer low
/// - reg 3: length load (bits 3-7), timer high (0-2)
pub struct PulseChannel {
    enabled: bool,
    duty: u8,
    duty_position: u8,
    pub(crate) envelope: Envelope,
    sweep: Sweep,
    pub(crate) length_counter: LengthCounter,
    pub(crate) timer: Timer,
}

impl PulseChannel {
    /// `channel_number` is 1 or 2; it selects the sweep negate arithmetic
    pub fn new(channel_number: u8) -> Self {
        PulseChannel {
            enabled: false,
            duty: 0,
            duty_position: 0,
            envelope: Envelope::new(),
            sweep: Sweep::new(channel_number),
            length_counter: LengthCounter::new(),
            timer: Timer::new(),
        }
    }

    /// Duty / halt / envelope register
    pub fn write_control(&mut self, val: u8) {
        self.duty = (val >> 6) & 0x03;
        self.length_counter.set_halt(val & 0x20 != 0);
        self.envelope.write_control(val);
    }

    /// Sweep register
    pub fn write_sweep(&mut self, val: u8) {
        self.sweep.write_control(val);
    }

    /// Timer low byte
    pub fn write_timer_low(&mut self, val: u8) {
        self.timer.set_period_low(val);
    }

    /// Length load + timer high; restarts the envelope and duty phase
    pub fn write_timer_high(&mut self, val: u8) {
        self.timer.set_period_high(val);
        if self.enabled {
            self.length_counter.load(val >> 3);
        }
        self.envelope.restart();
        self.duty_position = 0;
    }

    /// $4015 channel enable bit
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.clear();
        }
    }

    /// Length counter still running?
    pub fn length_active(&self) -> bool {
        self.length_counter.is_active()
    }

    /// Timer clock (every other CPU cycle)
    pub fn clock_timer(&mut self) {
        if self.timer.clock() {
            self.duty_position = (self.duty_position + 1) % 8;
        }
    }

    /// Quarter-frame clock
    pub fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    /// Half-frame clock
    pub fn clock_sweep_and_length(&mut self) {
        if let Some(period) = self.sweep.clock(self.timer.period) {
            self.timer.set_period(period);
        }
        self.length_counter.clock();
    }

    /// Current amplitude (0-15)
    pub fn output(&self) -> u8 {
        if !self.enabled
            || !self.length_counter.is_active()
            || self.sweep.is_muting(self.timer.period)
        {
            return 0;
        }
        if DUTY_PATTERNS[self.duty as usize][self.duty_position as usize] == 0 {
            return 0;
        }
        self.envelope.volume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audible_pulse() -> PulseChannel {
        let mut pulse = PulseChannel::new(1);
        pulse.set_enabled(true);
        pulse.write_control(0b1011_1000); // duty 2, halt, constant volume 8
        pulse.write_timer_low(0x40);
        pulse.write_timer_high(0x01); // period $140, length index 0
        pulse
    }

    #[test]
    fn test_silent_when_disabled() {
        let mut pulse = audible_pulse();
        pulse.set_enabled(false);
        assert_eq!(pulse.output(), 0);
        assert!(!pulse.length_active(), "disabling clears the length counter");
    }

    #[test]
    fn test_duty_cycle_shapes_output() {
        let mut pulse = audible_pulse();

        // Walk a full duty cycle; duty 2 is high for 4 of 8 steps
        let mut highs = 0;
        for _ in 0..8 {
            if pulse.output() > 0 {
                highs += 1;
            }
            // Step the sequencer once (timer period + 1 clocks)
            for _ in 0..0x141 {
                pulse.clock_timer();
            }
        }
        assert_eq!(highs, 4);
    }

    #[test]
    fn test_output_uses_envelope_volume() {
        let pulse = audible_pulse();
        let out = pulse.output();
        assert!(out == 0 || out == 8, "amplitude is 0 or the constant volume");
    }

    #[test]
    fn test_sweep_mute_silences() {
        let mut pulse = audible_pulse();
        pulse.write_timer_low(0x04);
        pulse.write_timer_high(0x00); // period 4 < 8 mutes
        assert_eq!(pulse.output(), 0);
    }

    #[test]
    fn test_length_expiry_silences() {
        let mut pulse = audible_pulse();
        pulse.write_control(0b1001_1000); // clear halt so length counts
        pulse.write_timer_high(0b0001_1001); // length index 3 -> 2

        pulse.clock_sweep_and_length();
        pulse.clock_sweep_and_length();
        assert!(!pulse.length_active());
        assert_eq!(pulse.output(), 0);
    }

    #[test]
    fn test_write_timer_high_resets_duty_phase() {
        let mut pulse = audible_pulse();
        for _ in 0..0x141 {
            pulse.clock_timer();
        }
        pulse.write_timer_high(0x01);
        // Duty position 0 of pattern 2 is low
        assert_eq!(pulse.output(), 0);
    }
}
