//! Turning a pitch identifier into a playable `Note`

mod request;

pub use request::{NoteRequest, Pitch};

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{Lookup, NoteError};
use crate::keyboard;
use crate::types::key::KeyEntry;
use crate::types::note::{Note, OutputHandle};

/// Lower bound (inclusive) of the randomised default duration, in seconds
pub const MIN_DEFAULT_DURATION: f64 = 0.5;
/// Upper bound (exclusive) of the randomised default duration, in seconds
pub const MAX_DEFAULT_DURATION: f64 = 3.0;

/// Resolves names, frequencies and key numbers against the keyboard table
///
/// The random source only feeds the default duration of new notes.
pub struct NoteResolver<R = ThreadRng> {
    rng: R,
}

impl NoteResolver<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for NoteResolver<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteResolver<StdRng> {
    /// Resolver with reproducible default durations
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NoteResolver<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Resolve any typed pitch identifier
    pub fn resolve(
        &mut self,
        pitch: &Pitch,
        destination: Option<OutputHandle>,
    ) -> Result<Note, NoteError> {
        match pitch {
            Pitch::Name(name) => self.resolve_by_name(name, destination),
            Pitch::Frequency(frequency) => self.resolve_by_frequency(*frequency, destination),
            Pitch::KeyNumber(key_number) => self.resolve_by_key_number(*key_number, destination),
        }
    }

    /// Exact, case-sensitive match on the key name ("C#4")
    pub fn resolve_by_name(
        &mut self,
        name: &str,
        destination: Option<OutputHandle>,
    ) -> Result<Note, NoteError> {
        let key = keyboard::notes_info()
            .iter()
            .find(|key| key.name == name)
            .ok_or_else(|| NoteError::NotFound(Lookup::Name(name.to_string())))?;

        Ok(self.build(key, destination))
    }

    /// Closest key to `frequency`; the lower key wins an exact tie
    pub fn resolve_by_frequency(
        &mut self,
        frequency: f64,
        destination: Option<OutputHandle>,
    ) -> Result<Note, NoteError> {
        let key = closest_key(frequency)?;
        debug!(frequency, key = %key.name, "matched frequency to key");

        self.resolve_by_name(&key.name, destination)
    }

    /// Exact match on the 1-based key number
    pub fn resolve_by_key_number(
        &mut self,
        key_number: i32,
        destination: Option<OutputHandle>,
    ) -> Result<Note, NoteError> {
        let key = keyboard::notes_info()
            .iter()
            .find(|key| i32::from(key.key_number) == key_number)
            .ok_or(NoteError::NotFound(Lookup::KeyNumber(key_number)))?;

        Ok(self.build(key, destination))
    }

    fn build(&mut self, key: &KeyEntry, destination: Option<OutputHandle>) -> Note {
        let duration = self.rng.gen_range(MIN_DEFAULT_DURATION..MAX_DEFAULT_DURATION);
        debug!(key = %key.name, duration, "resolved note");
        Note::new(key, duration, destination)
    }
}

/// Key whose frequency is nearest to `frequency`
///
/// Fails when the frequency lies outside the A0..C8 span.
pub fn closest_key(frequency: f64) -> Result<&'static KeyEntry, NoteError> {
    if frequency.is_nan() {
        return Err(NoteError::construction("frequency is not a number"));
    }

    let (min, max) = (keyboard::lowest().frequency, keyboard::highest().frequency);
    if frequency < min || frequency > max {
        return Err(NoteError::OutOfRange { frequency, min, max });
    }

    nearest(keyboard::notes_info(), frequency).ok_or(NoteError::OutOfRange { frequency, min, max })
}

/// `min_by` keeps the first of equally distant keys, so ties go to the lower key
fn nearest(keys: &[KeyEntry], frequency: f64) -> Option<&KeyEntry> {
    keys.iter().min_by(|a, b| {
        let da = (a.frequency - frequency).abs();
        let db = (b.frequency - frequency).abs();
        da.total_cmp(&db)
    })
}
