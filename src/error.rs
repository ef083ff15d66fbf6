use std::fmt;

use thiserror::Error;

/// What a failed lookup was searching for
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Name(String),
    KeyNumber(i32),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Name(name) => write!(f, "name '{}'", name),
            Lookup::KeyNumber(key) => write!(f, "key number {}", key),
        }
    }
}

/// Failure to turn a pitch identifier into a `Note`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoteError {
    /// No keyboard entry matches the requested name or key number
    #[error("no piano key matches {0}")]
    NotFound(Lookup),

    /// Frequency lies outside the span of the 88-key table
    #[error("frequency {frequency} Hz is outside the keyboard range ({min} Hz - {max} Hz)")]
    OutOfRange { frequency: f64, min: f64, max: f64 },

    /// Request does not identify exactly one pitch
    #[error("cannot build note: {0}")]
    Construction(String),
}

impl NoteError {
    pub fn construction(reason: impl Into<String>) -> Self {
        NoteError::Construction(reason.into())
    }
}

/// Failure while starting playback on an output device
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output devices found")]
    NoDevices,

    #[error("audio device index {index} out of range (0-{max})")]
    DeviceIndexOutOfRange { index: usize, max: usize },

    #[error("audio device '{0}' not found")]
    DeviceNotFound(String),

    #[error("unsupported sample format: {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("failed to enumerate devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[error("failed to fetch default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("note has no output destination")]
    NoDestination,

    #[error("playback ended without an end-of-tone signal")]
    Disconnected,
}
