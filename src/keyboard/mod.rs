//! The 88-key piano frequency table
//!
//! Frequencies follow twelve-tone equal temperament tuned to A4 = 440 Hz.
//! Every key is derived from a fixed anchor by repeated semitone steps, so
//! the table is bit-for-bit reproducible as long as the iteration order
//! (octave outer, pitch class inner) stays the same.

use std::sync::LazyLock;

use tracing::debug;

use crate::types::key::{KeyEntry, PitchClass};

/// Number of keys on a standard piano
pub const KEY_COUNT: usize = 88;

/// G#-1, one semitone below A0 under A4 = 440 Hz tuning
pub const ANCHOR_FREQUENCY: f64 = 25.95654359874657;

/// Octave cycles walked before truncating to `KEY_COUNT`
const OCTAVE_CYCLES: u8 = 9;

static TABLE: LazyLock<Vec<KeyEntry>> = LazyLock::new(generate);

/// Build the keyboard table from scratch
pub fn generate() -> Vec<KeyEntry> {
    let semitone = 2.0_f64.powf(1.0 / 12.0);

    let mut keys = Vec::with_capacity(OCTAVE_CYCLES as usize * PitchClass::CYCLE.len());
    let mut frequency = ANCHOR_FREQUENCY;
    let mut key_number: u8 = 0;

    for octave in 0..OCTAVE_CYCLES {
        for pitch in PitchClass::CYCLE {
            key_number += 1;
            frequency *= semitone;
            keys.push(KeyEntry {
                key_number,
                frequency,
                name: format!("{}{}", pitch, octave + pitch.octave_offset()),
            });
        }
    }

    keys.truncate(KEY_COUNT);
    debug!(keys = keys.len(), "generated keyboard table");
    keys
}

/// The process-wide table, built on first access
pub fn notes_info() -> &'static [KeyEntry] {
    &TABLE
}

/// A0
pub fn lowest() -> &'static KeyEntry {
    &TABLE[0]
}

/// C8
pub fn highest() -> &'static KeyEntry {
    &TABLE[KEY_COUNT - 1]
}
