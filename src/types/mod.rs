pub mod events;
pub mod key;
pub mod note;
pub mod waveform;
