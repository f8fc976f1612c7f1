//! Shared channel building blocks: the clocked units the frame sequencer
//! drives and the timers that pace each waveform generator.

mod envelope;
mod frame_counter;
mod length_counter;
mod linear_counter;
mod sweep;
mod timer;

pub use envelope::Envelope;
pub use frame_counter::{FrameCounter, FrameEvent, FrameMode};
pub use length_counter::LengthCounter;
pub use linear_counter::LinearCounter;
pub use sweep::Sweep;
pub use timer::Timer;
