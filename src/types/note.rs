use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::key::KeyEntry;

/// Opaque selector for an audio output, resolved by the playback layer
/// Holds a device name (substring match) or a device index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct OutputHandle(String);

impl OutputHandle {
    pub fn new(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    pub fn selector(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutputHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved, playable note
///
/// Pitch fields are fixed at construction. Duration, volume and destination
/// may be changed until the note is handed to a tone emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    key_number: u8,
    frequency: f64,
    octave: u8,
    name: String,
    /// Seconds
    duration: f64,
    /// 0.0 to 1.0, not clamped here
    volume: f64,
    destination: Option<OutputHandle>,
}

impl Note {
    pub(crate) fn new(
        key: &KeyEntry,
        duration: f64,
        destination: Option<OutputHandle>,
    ) -> Self {
        Self {
            key_number: key.key_number,
            frequency: key.frequency,
            octave: octave_of(&key.name),
            name: key.name.clone(),
            duration,
            volume: 1.0,
            destination,
        }
    }

    pub fn key_number(&self) -> u8 {
        self.key_number
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn octave(&self) -> u8 {
        self.octave
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn destination(&self) -> Option<&OutputHandle> {
        self.destination.as_ref()
    }

    /// Replace the duration; `None` leaves it untouched
    pub fn set_duration(&mut self, duration: Option<f64>) {
        if let Some(duration) = duration {
            self.duration = duration;
        }
    }

    /// Replace the volume; `None` leaves it untouched
    pub fn set_volume(&mut self, volume: Option<f64>) {
        if let Some(volume) = volume {
            self.volume = volume;
        }
    }

    /// Replace the output destination; `None` leaves it untouched
    pub fn set_destination(&mut self, destination: Option<OutputHandle>) {
        if let Some(destination) = destination {
            self.destination = Some(destination);
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (key {}, {:.3} Hz, {:.2}s @ {:.2})",
            self.name, self.key_number, self.frequency, self.duration, self.volume
        )
    }
}

/// Octave digit at the end of a key name ("C#4" -> 4)
fn octave_of(name: &str) -> u8 {
    name.chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .map_or(0, |d| d as u8)
}
