use std::any::Any;
use std::thread;

use crossbeam_channel::{bounded, Receiver};
use tracing::{debug, info};

use crate::error::AudioError;
use crate::types::events::ToneEvent;
use crate::types::note::{Note, OutputHandle};

/// Completion callback, run once the output reports the tone has ended
pub type OnEnded = Box<dyn FnOnce() + Send + 'static>;

/// Anything that can turn a frequency into sound for a fixed duration
pub trait ToneEmitter {
    fn emit(
        &self,
        frequency: f64,
        volume: f64,
        duration: f64,
        destination: &OutputHandle,
        on_ended: OnEnded,
    ) -> Result<Playback, AudioError>;
}

/// A tone in flight
///
/// Dropping it releases the output and cuts the tone short; the completion
/// callback then never runs.
pub struct Playback {
    done: Receiver<()>,
    _output: Option<Box<dyn Any>>,
}

impl Playback {
    /// Watch `events` on a helper thread and run `on_ended` on `Ended`
    pub fn watch(events: Receiver<ToneEvent>, on_ended: OnEnded) -> Self {
        let (done_tx, done_rx) = bounded(1);

        thread::spawn(move || {
            for event in events.iter() {
                debug!(?event, "tone event");
                if event.is_ended() {
                    on_ended();
                    let _ = done_tx.send(());
                    return;
                }
            }
        });

        Self {
            done: done_rx,
            _output: None,
        }
    }

    /// Keep a backend resource (e.g. an output stream) alive for the tone
    pub fn holding(mut self, output: impl Any) -> Self {
        self._output = Some(Box::new(output));
        self
    }

    /// Block until the completion callback has run
    pub fn wait(self) -> Result<(), AudioError> {
        self.done.recv().map_err(|_| AudioError::Disconnected)
    }
}

/// Hand a resolved note to an emitter
///
/// The note must already carry its destination; choosing a default output
/// is the caller's job.
pub fn play<E>(
    emitter: &E,
    note: &Note,
    on_ended: impl FnOnce() + Send + 'static,
) -> Result<Playback, AudioError>
where
    E: ToneEmitter + ?Sized,
{
    let destination = note.destination().ok_or(AudioError::NoDestination)?;

    info!(
        note = note.name(),
        frequency = note.frequency(),
        duration = note.duration(),
        volume = note.volume(),
        %destination,
        "playing note"
    );

    emitter.emit(
        note.frequency(),
        note.volume(),
        note.duration(),
        destination,
        Box::new(on_ended),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tone::Tone;
    use crate::resolver::NoteResolver;
    use crate::types::waveform::Waveform;
    use crossbeam_channel::unbounded;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Renders the whole tone synchronously into a discarded buffer
    #[derive(Default)]
    struct OfflineEmitter {
        calls: Mutex<Vec<(f64, f64, f64, OutputHandle)>>,
    }

    impl ToneEmitter for OfflineEmitter {
        fn emit(
            &self,
            frequency: f64,
            volume: f64,
            duration: f64,
            destination: &OutputHandle,
            on_ended: OnEnded,
        ) -> Result<Playback, AudioError> {
            self.calls
                .lock()
                .unwrap()
                .push((frequency, volume, duration, destination.clone()));

            let (tx, rx) = unbounded();
            let mut tone = Tone::new(
                1000.0,
                frequency as f32,
                volume as f32,
                duration,
                Waveform::Sine,
                tx,
            );
            let mut buffer = [0.0; 128];
            while !tone.is_ended() {
                tone.process(&mut buffer, 1);
            }

            Ok(Playback::watch(rx, on_ended))
        }
    }

    #[test]
    fn test_play_requires_destination() {
        let note = NoteResolver::seeded(3).resolve_by_name("A4", None).unwrap();
        let result = play(&OfflineEmitter::default(), &note, || {});
        assert!(matches!(result, Err(AudioError::NoDestination)));
    }

    #[test]
    fn test_play_forwards_note() {
        let mut note = NoteResolver::seeded(3)
            .resolve_by_name("A4", Some(OutputHandle::new("test")))
            .unwrap();
        note.set_duration(Some(0.25));
        note.set_volume(Some(0.6));

        let emitter = OfflineEmitter::default();
        play(&emitter, &note, || {}).unwrap().wait().unwrap();

        let calls = emitter.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, note.frequency());
        assert_eq!(calls[0].1, 0.6);
        assert_eq!(calls[0].2, 0.25);
        assert_eq!(calls[0].3, OutputHandle::new("test"));
    }

    #[test]
    fn test_callback_runs_before_wait_returns() {
        let note = NoteResolver::seeded(3)
            .resolve_by_key_number(40, Some(OutputHandle::new("test")))
            .unwrap();

        let ended = Arc::new(AtomicBool::new(false));
        let flag = ended.clone();
        let playback = play(&OfflineEmitter::default(), &note, move || {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();

        playback.wait().unwrap();
        assert!(ended.load(Ordering::SeqCst));
    }

    #[test]
    fn test_no_callback_without_ended() {
        let (tx, rx) = unbounded();
        let ended = Arc::new(AtomicBool::new(false));
        let flag = ended.clone();
        let playback = Playback::watch(rx, Box::new(move || flag.store(true, Ordering::SeqCst)));

        tx.send(ToneEvent::Started).unwrap();
        tx.send(ToneEvent::Stopped).unwrap();
        drop(tx);

        assert!(matches!(playback.wait(), Err(AudioError::Disconnected)));
        assert!(!ended.load(Ordering::SeqCst));
    }
}
