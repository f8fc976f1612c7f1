//! Triangle linear counter

/// The triangle channel's fine-grained length gate
///
/// Quarter-frame clocked. A write to the timer-high register sets the reload
/// flag; the next clock reloads the counter from the period. The control
/// flag keeps the reload flag armed (and doubles as the length-counter
/// halt).
#[derive(Debug, Clone, Default)]
pub struct LinearCounter {
    /// Current count
    counter: u8,
    /// Reload value (7 bits)
    period: u8,
    /// Reload requested
    reload: bool,
    /// Control flag (register bit 7)
    control: bool,
}

impl LinearCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the control register ($4008)
    pub fn write_control(&mut self, val: u8) {
        self.control = val & 0x80 != 0;
        self.period = val & 0x7F;
    }

    /// Arm the reload flag (timer-high write)
    pub fn arm_reload(&mut self) {
        self.reload = true;
    }

    /// Quarter-frame clock
    pub fn clock(&mut self) {
        if self.reload {
            self.counter = self.period;
        } else if self.counter > 0 {
            self.counter -= 1;
        }
        if !self.control {
            self.reload = false;
        }
    }

    /// Sequencer may advance while nonzero
    pub fn is_active(&self) -> bool {
        self.counter > 0
    }
}
