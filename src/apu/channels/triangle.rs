//! Triangle wave channel

use crate::apu::components::{LengthCounter, LinearCounter, Timer};
use crate::apu::constants::TRIANGLE_SEQUENCE;

/// Triangle wave generator
///
/// Steps a 32-entry sequence (15 down to 0 and back). The timer runs at the
/// full CPU rate, and the sequencer only advances while both the length
/// counter and the linear counter are nonzero; the output holds its last
/// value when gated, so there are no clicks.
pub struct TriangleChannel {
    enabled: bool,
    sequence_position: u8,
    pub(crate) linear_counter: LinearCounter,
    pub(crate) length_counter: LengthCounter,
    pub(crate) timer: Timer,
}

impl TriangleChannel {
    pub fn new() -> Self {
        TriangleChannel {
            enabled: false,
            sequence_position: 0,
            linear_counter: LinearCounter::new(),
            length_counter: LengthCounter::new(),
            timer: Timer::new(),
        }
    }

    /// $4008: control flag + linear counter period
    pub fn write_control(&mut self, val: u8) {
        self.length_counter.set_halt(val & 0x80 != 0);
        self.linear_counter.write_control(val);
    }

    /// $400A: timer low
    pub fn write_timer_low(&mut self, val: u8) {
        self.timer.set_period_low(val);
    }

    /// $400B: length load + timer high; arms the linear-counter reload
    pub fn write_timer_high(&mut self, val: u8) {
        self.timer.set_period_high(val);
        if self.enabled {
            self.length_counter.load(val >> 3);
        }
        self.linear_counter.arm_reload();
    }

    /// $4015 channel enable bit
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.clear();
        }
    }

    pub fn length_active(&self) -> bool {
        self.length_counter.is_active()
    }

    /// Timer clock (every CPU cycle)
    pub fn clock_timer(&mut self) {
        if self.timer.clock()
            && self.enabled
            && self.length_counter.is_active()
            && self.linear_counter.is_active()
        {
            self.sequence_position = (self.sequence_position + 1) % 32;
        }
    }

    /// Quarter-frame clock
    pub fn clock_linear_counter(&mut self) {
        self.linear_counter.clock();
    }

    /// Half-frame clock
    pub fn clock_length_counter(&mut self) {
        self.length_counter.clock();
    }

    /// Current amplitude (0-15)
    pub fn output(&self) -> u8 {
        TRIANGLE_SEQUENCE[self.sequence_position as usize]
    }
}

impl Default for TriangleChannel {
    fn default() -> Self {
        Self::new()
    }
}
