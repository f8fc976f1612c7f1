// Audio module - the sample ring buffer between emulation and playback
//
// The APU appends mixed samples from the emulation thread; an audio device
// callback drains them from its own thread. The buffer is the only state
// shared between the two, so both ends go through one mutex.
//
// Overrun (producer outpacing the consumer) drops the sample; underrun
// (consumer outpacing the producer) pads with silence. Both are logged and
// counted, and neither corrupts state.

#[cfg(feature = "audio")]
pub mod output;

#[cfg(feature = "audio")]
pub use output::AudioOutput;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Bounded FIFO of mixed audio samples
pub struct SampleBuffer {
    data: VecDeque<f32>,
    capacity: usize,
    overruns: u64,
    underruns: u64,
}

impl SampleBuffer {
    /// Create a buffer holding at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        SampleBuffer {
            data: VecDeque::with_capacity(capacity),
            capacity,
            overruns: 0,
            underruns: 0,
        }
    }

    /// Append one sample; a full buffer drops it
    pub fn push(&mut self, sample: f32) -> bool {
        if self.data.len() >= self.capacity {
            self.overruns += 1;
            log::warn!("audio ring overrun, dropping sample");
            return false;
        }
        self.data.push_back(sample);
        true
    }

    /// Drain into `out`, padding with silence when the ring runs dry
    ///
    /// Returns how many real samples were delivered.
    pub fn fill(&mut self, out: &mut [f32]) -> usize {
        let available = self.data.len().min(out.len());
        for slot in out.iter_mut().take(available) {
            *slot = self.data.pop_front().unwrap_or(0.0);
        }
        if available < out.len() {
            self.underruns += 1;
            log::warn!(
                "audio ring underrun, padding {} samples with silence",
                out.len() - available
            );
            for slot in out.iter_mut().skip(available) {
                *slot = 0.0;
            }
        }
        available
    }

    /// Samples currently buffered
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximum number of buffered samples
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discard everything buffered
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Dropped-sample count since creation
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Short-read count since creation
    pub fn underruns(&self) -> u64 {
        self.underruns
    }
}

/// Handle shared between the emulation thread and the audio callback
pub type SharedSampleBuffer = Arc<Mutex<SampleBuffer>>;

/// Create a shareable sample buffer
pub fn shared_buffer(capacity: usize) -> SharedSampleBuffer {
    Arc::new(Mutex::new(SampleBuffer::new(capacity)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut buf = SampleBuffer::new(8);
        buf.push(0.1);
        buf.push(0.2);
        buf.push(0.3);

        let mut out = [0.0f32; 3];
        assert_eq!(buf.fill(&mut out), 3);
        assert_eq!(out, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_overrun_drops_sample() {
        let mut buf = SampleBuffer::new(2);
        assert!(buf.push(1.0));
        assert!(buf.push(2.0));
        assert!(!buf.push(3.0), "full ring drops the sample");

        assert_eq!(buf.len(), 2);
        assert_eq!(buf.overruns(), 1);

        let mut out = [0.0f32; 2];
        buf.fill(&mut out);
        assert_eq!(out, [1.0, 2.0], "buffered samples survive the overrun");
    }

    #[test]
    fn test_underrun_pads_with_silence() {
        let mut buf = SampleBuffer::new(8);
        buf.push(0.5);

        let mut out = [1.0f32; 4];
        assert_eq!(buf.fill(&mut out), 1);
        assert_eq!(out, [0.5, 0.0, 0.0, 0.0]);
        assert_eq!(buf.underruns(), 1);
    }

    #[test]
    fn test_shared_buffer_across_threads() {
        let shared = shared_buffer(1024);

        let producer = Arc::clone(&shared);
        let handle = std::thread::spawn(move || {
            for i in 0..256 {
                producer.lock().unwrap().push(i as f32);
            }
        });
        handle.join().unwrap();

        let mut out = [0.0f32; 256];
        assert_eq!(shared.lock().unwrap().fill(&mut out), 256);
        assert_eq!(out[255], 255.0);
    }
}
