pub mod emitter;
pub mod oscillator;
pub mod output;
pub mod tone;
pub mod vca;

pub use emitter::{play, OnEnded, Playback, ToneEmitter};
pub use output::{list_devices, CpalEmitter, DEFAULT_DEVICE};
