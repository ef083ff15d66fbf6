use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::audio::DEFAULT_DEVICE;
use crate::resolver::NoteRequest;
use crate::types::note::OutputHandle;
use crate::types::waveform::Waveform;

/// Longest tone a configuration may ask for, in seconds
pub const MAX_DURATION: f64 = 60.0;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub tone: ToneConfig,

    /// Note to play when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteRequest>,
}

impl PlayerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: PlayerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.device.audioout.trim().is_empty() {
            return Err(anyhow!("Audio output device must not be empty"));
        }

        self.tone.validate().context("Invalid tone configuration")?;

        if let Some(note) = &self.note {
            note.pitch().context("Invalid note configuration")?;
        }

        Ok(())
    }
}

/// Device configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Device name substring, device index, or "default"
    #[serde(default = "default_audioout")]
    pub audioout: String,
}

impl DeviceConfig {
    pub fn handle(&self) -> OutputHandle {
        OutputHandle::new(self.audioout.clone())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            audioout: default_audioout(),
        }
    }
}

/// Tone shaping and defaults applied to every played note
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToneConfig {
    #[serde(default)]
    pub wave: Waveform,

    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Fixed duration in seconds; random per note when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Seed for the random default duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ToneConfig {
    pub fn validate(&self) -> Result<()> {
        validate_volume(self.volume)?;
        if let Some(duration) = self.duration {
            validate_duration(duration)?;
        }
        Ok(())
    }
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            wave: Waveform::default(),
            volume: default_volume(),
            duration: None,
            seed: None,
        }
    }
}

pub fn validate_volume(volume: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&volume) {
        return Err(anyhow!("Volume must be between 0.0 and 1.0"));
    }
    Ok(())
}

pub fn validate_duration(duration: f64) -> Result<()> {
    if !(duration > 0.0 && duration <= MAX_DURATION) {
        return Err(anyhow!(
            "Duration must be greater than 0 and at most {} seconds",
            MAX_DURATION
        ));
    }
    Ok(())
}

// Default value functions for serde
fn default_audioout() -> String {
    DEFAULT_DEVICE.to_string()
}

fn default_volume() -> f64 {
    1.0
}
