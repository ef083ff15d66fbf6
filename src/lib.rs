//! Single-note piano model: resolve a pitch by name, frequency or key
//! number against the 88-key equal-temperament table, then play it as a
//! timed tone.

pub mod audio;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod resolver;
pub mod types;

pub use error::{Lookup, NoteError};
pub use resolver::{NoteRequest, NoteResolver, Pitch};
pub use types::key::KeyEntry;
pub use types::note::{Note, OutputHandle};

/// Note named `name` ("A4", "C#3"), with a random default duration
pub fn build_from_name(name: &str, destination: Option<OutputHandle>) -> Result<Note, NoteError> {
    NoteResolver::new().resolve_by_name(name, destination)
}

/// Note closest to `frequency` Hz
pub fn build_from_frequency(
    frequency: f64,
    destination: Option<OutputHandle>,
) -> Result<Note, NoteError> {
    NoteResolver::new().resolve_by_frequency(frequency, destination)
}

/// Note at 1-based piano key `key_number`
pub fn build_from_key_number(
    key_number: i32,
    destination: Option<OutputHandle>,
) -> Result<Note, NoteError> {
    NoteResolver::new().resolve_by_key_number(key_number, destination)
}

/// All 88 keys, lowest first
pub fn notes_info() -> &'static [KeyEntry] {
    keyboard::notes_info()
}
