// Configuration management
//
// User-tunable settings persisted as TOML next to the executable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// Default configuration file path
const CONFIG_FILE: &str = "famicore.toml";

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Audio settings
    pub audio: AudioConfig,

    /// Video settings
    pub video: VideoConfig,
}

/// Audio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,

    /// Sample ring capacity in milliseconds of audio
    pub buffer_ms: u32,

    /// Master volume (0.0-1.0), applied by the output shell
    pub volume: f32,
}

impl AudioConfig {
    /// Ring capacity in samples
    pub fn ring_capacity(&self) -> usize {
        (self.sample_rate as usize * self.buffer_ms as usize) / 1000
    }
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Frames to emulate per displayed frame (1 = every frame)
    pub frame_skip: u32,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            audio: AudioConfig {
                sample_rate: 44_100,
                buffer_ms: 250,
                volume: 0.7,
            },
            video: VideoConfig { frame_skip: 1 },
        }
    }
}

impl EmulatorConfig {
    /// Load the configuration file, falling back to (and writing) defaults
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| {
            let config = Self::default();
            let _ = config.save();
            config
        })
    }

    /// Load the configuration from disk
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(CONFIG_FILE)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the configuration to disk
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_FILE, contents)
    }
}
