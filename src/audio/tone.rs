use crossbeam_channel::Sender;

use super::{oscillator::Oscillator, vca::Vca};
use crate::types::events::ToneEvent;
use crate::types::waveform::Waveform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToneState {
    Pending,
    Sounding,
    Stopped,
    Ended,
}

/// Render side of a single timed tone: Oscillator → VCA
/// Runs inside the output callback, so it never blocks or allocates
pub struct Tone {
    oscillator: Oscillator,
    vca: Vca,
    /// Sample index at which the tone stops
    stop_at: u64,
    position: u64,
    state: ToneState,
    events: Sender<ToneEvent>,
}

impl Tone {
    pub fn new(
        sample_rate: f32,
        frequency: f32,
        volume: f32,
        duration: f64,
        waveform: Waveform,
        events: Sender<ToneEvent>,
    ) -> Self {
        // Negative or NaN durations saturate to an immediate stop
        let stop_at = (duration * sample_rate as f64).round() as u64;

        Self {
            oscillator: Oscillator::new(sample_rate, frequency, waveform),
            vca: Vca::new(volume),
            stop_at,
            position: 0,
            state: ToneState::Pending,
            events,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.state == ToneState::Ended
    }

    /// Fill an interleaved buffer, the same signal on every channel
    pub fn process(&mut self, output: &mut [f32], channels: usize) {
        match self.state {
            ToneState::Pending => self.transition(ToneState::Sounding, ToneEvent::Started),
            // The buffer holding the stop point has been consumed by the device
            ToneState::Stopped => self.transition(ToneState::Ended, ToneEvent::Ended),
            ToneState::Sounding | ToneState::Ended => {}
        }

        for frame in output.chunks_mut(channels.max(1)) {
            let sample = if self.position < self.stop_at {
                self.vca.process(self.oscillator.next_sample(), 1.0)
            } else {
                if self.state == ToneState::Sounding {
                    self.transition(ToneState::Stopped, ToneEvent::Stopped);
                }
                0.0
            };

            frame.fill(sample);
            self.position = self.position.saturating_add(1);
        }
    }

    fn transition(&mut self, state: ToneState, event: ToneEvent) {
        self.state = state;
        // Receiver gone means nobody is waiting for the tone any more
        let _ = self.events.try_send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, Receiver};

    fn tone(duration: f64) -> (Tone, Receiver<ToneEvent>) {
        let (tx, rx) = unbounded();
        // 1 kHz sample rate keeps the sample arithmetic readable
        (Tone::new(1000.0, 100.0, 0.5, duration, Waveform::Square, tx), rx)
    }

    #[test]
    fn test_first_buffer_starts() {
        let (mut tone, rx) = tone(1.0);
        let mut buffer = [0.0; 64];
        tone.process(&mut buffer, 2);

        assert_eq!(rx.try_recv(), Ok(ToneEvent::Started));
        assert!(rx.try_recv().is_err());
        assert_eq!(buffer[0], 0.5);
        assert_eq!(buffer[1], 0.5);
    }

    #[test]
    fn test_stops_after_exact_duration() {
        let (mut tone, rx) = tone(0.1);
        let mut buffer = [1.0; 256];
        tone.process(&mut buffer, 1);

        // 0.1s at 1 kHz is 100 samples of sound
        assert!(buffer[..100].iter().any(|s| *s != 0.0));
        assert!(buffer[100..].iter().all(|s| *s == 0.0));
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![ToneEvent::Started, ToneEvent::Stopped]);
        assert!(!tone.is_ended());
    }

    #[test]
    fn test_ended_follows_stop_buffer() {
        // Stop at sample 150, inside the third 64-sample buffer
        let (mut tone, rx) = tone(0.15);
        let mut buffer = [0.0; 64];

        tone.process(&mut buffer, 1);
        tone.process(&mut buffer, 1);
        assert!(!tone.is_ended());

        // Stop lands in this buffer, ended only once the next one is requested
        tone.process(&mut buffer, 1);
        assert!(!tone.is_ended());
        tone.process(&mut buffer, 1);
        assert!(tone.is_ended());

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![ToneEvent::Started, ToneEvent::Stopped, ToneEvent::Ended]
        );

        tone.process(&mut buffer, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_zero_duration_is_silent() {
        let (mut tone, rx) = tone(0.0);
        let mut buffer = [1.0; 8];
        tone.process(&mut buffer, 2);
        assert!(buffer.iter().all(|s| *s == 0.0));
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![ToneEvent::Started, ToneEvent::Stopped]);
    }
}
