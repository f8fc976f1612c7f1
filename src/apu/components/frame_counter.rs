//! Frame sequencer
//!
//! A divider over the CPU clock that produces the low-frequency clocks for
//! the channels' envelope/linear-counter units (quarter frames) and
//! sweep/length-counter units (half frames). 4-step mode runs at ~240Hz per
//! step and raises the frame IRQ on its last step unless inhibited; 5-step
//! mode is slightly slower and never interrupts.

use crate::apu::constants::{
    FRAME_4_STEP_CYCLES, FRAME_4_STEP_PERIOD, FRAME_5_STEP_CYCLES, FRAME_5_STEP_PERIOD,
};

/// Clock edges the sequencer can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Clock envelopes and linear counters
    QuarterFrame,
    /// Clock everything: envelopes, linear counters, sweeps, length counters
    HalfFrame,
    /// Raise the frame IRQ (4-step mode only)
    SetIrq,
}

/// Sequencer mode, selected by bit 7 of $4017
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    FourStep,
    FiveStep,
}

/// The frame sequencer itself
#[derive(Debug, Clone)]
pub struct FrameCounter {
    mode: FrameMode,
    /// CPU cycles into the current sequence
    cycle: u32,
    /// Next step index
    step: usize,
    /// IRQ inhibit flag (bit 6 of $4017)
    irq_inhibit: bool,
    /// Frame interrupt flag
    irq_pending: bool,
}

impl FrameCounter {
    pub fn new() -> Self {
        FrameCounter {
            mode: FrameMode::FourStep,
            cycle: 0,
            step: 0,
            irq_inhibit: false,
            irq_pending: false,
        }
    }

    /// Write $4017: select the mode and IRQ inhibit, restart the sequence
    ///
    /// Setting the inhibit bit also clears a pending frame IRQ. Entering
    /// 5-step mode clocks the half-frame units immediately.
    pub fn write_control(&mut self, val: u8) -> Vec<FrameEvent> {
        self.mode = if val & 0x80 != 0 {
            FrameMode::FiveStep
        } else {
            FrameMode::FourStep
        };
        self.irq_inhibit = val & 0x40 != 0;
        if self.irq_inhibit {
            self.irq_pending = false;
        }

        self.cycle = 0;
        self.step = 0;

        let mut events = Vec::new();
        if self.mode == FrameMode::FiveStep {
            events.push(FrameEvent::HalfFrame);
        }
        events
    }

    /// Advance one CPU cycle; boundary cycles emit the step's events
    pub fn clock(&mut self) -> Vec<FrameEvent> {
        let mut events = Vec::new();
        self.cycle += 1;

        match self.mode {
            FrameMode::FourStep => self.clock_4_step(&mut events),
            FrameMode::FiveStep => self.clock_5_step(&mut events),
        }

        events
    }

    fn clock_4_step(&mut self, events: &mut Vec<FrameEvent>) {
        if self.step < 4 && self.cycle == FRAME_4_STEP_CYCLES[self.step] {
            match self.step {
                0 | 2 => events.push(FrameEvent::QuarterFrame),
                1 => events.push(FrameEvent::HalfFrame),
                _ => {
                    events.push(FrameEvent::HalfFrame);
                    if !self.irq_inhibit {
                        self.irq_pending = true;
                        events.push(FrameEvent::SetIrq);
                    }
                }
            }
            self.step += 1;
        }

        if self.cycle >= FRAME_4_STEP_PERIOD {
            // The IRQ flag is also raised on the sequence's final cycle
            if !self.irq_inhibit {
                self.irq_pending = true;
                events.push(FrameEvent::SetIrq);
            }
            self.cycle = 0;
            self.step = 0;
        }
    }

    fn clock_5_step(&mut self, events: &mut Vec<FrameEvent>) {
        if self.step < 5 && self.cycle == FRAME_5_STEP_CYCLES[self.step] {
            match self.step {
                0 | 2 => events.push(FrameEvent::QuarterFrame),
                1 | 3 => events.push(FrameEvent::HalfFrame),
                _ => {} // step 5 is silent
            }
            self.step += 1;
        }

        if self.cycle >= FRAME_5_STEP_PERIOD {
            self.cycle = 0;
            self.step = 0;
        }
    }

    /// Frame IRQ asserted?
    pub fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    /// Acknowledge the frame IRQ ($4015 read)
    pub fn clear_irq(&mut self) {
        self.irq_pending = false;
    }

    pub fn mode(&self) -> FrameMode {
        self.mode
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}
