// Audio output - optional cpal playback sink (feature "audio")
//
// External-collaborator glue: builds an output stream whose device callback
// drains the shared sample ring. The emulation core never depends on this;
// it only fills the ring.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};

use super::SharedSampleBuffer;

/// A running audio stream pulling from a sample ring
pub struct AudioOutput {
    stream: Stream,
    sample_rate: u32,
}

impl AudioOutput {
    /// Open the default output device at `sample_rate` (mono) and start
    /// draining `buffer` from the device callback
    pub fn new(buffer: SharedSampleBuffer, sample_rate: u32) -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("no audio output device available")?;

        let config = StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    buffer.lock().unwrap().fill(data);
                },
                |err| {
                    log::warn!("audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| format!("failed to build audio stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("failed to start audio stream: {}", e))?;

        Ok(AudioOutput {
            stream,
            sample_rate,
        })
    }

    /// Configured device sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Pause playback
    pub fn pause(&self) -> Result<(), String> {
        self.stream
            .pause()
            .map_err(|e| format!("failed to pause audio: {}", e))
    }

    /// Resume playback
    pub fn resume(&self) -> Result<(), String> {
        self.stream
            .play()
            .map_err(|e| format!("failed to resume audio: {}", e))
    }
}
