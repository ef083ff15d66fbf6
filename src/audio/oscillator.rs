use crate::types::waveform::Waveform;

/// Phase-accumulating tone source
pub struct Oscillator {
    /// Current phase position (0.0 to 1.0)
    phase: f32,
    /// Phase increment per sample (frequency / sample_rate)
    phase_delta: f32,
    waveform: Waveform,
}

impl Oscillator {
    pub fn new(sample_rate: f32, frequency: f32, waveform: Waveform) -> Self {
        Self {
            phase: 0.0,
            phase_delta: frequency / sample_rate,
            waveform,
        }
    }

    /// Generate next sample and advance phase
    pub fn next_sample(&mut self) -> f32 {
        let output = self.waveform.generate(self.phase);

        self.phase += self.phase_delta;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero_phase() {
        let mut osc = Oscillator::new(48000.0, 440.0, Waveform::Sawtooth);
        assert_eq!(osc.next_sample(), -1.0);
    }

    #[test]
    fn test_period_matches_frequency() {
        // 100 Hz at 1 kHz: one cycle every 10 samples
        let mut osc = Oscillator::new(1000.0, 100.0, Waveform::Square);
        let cycle: Vec<f32> = (0..10).map(|_| osc.next_sample()).collect();
        assert_eq!(&cycle[..4], &[1.0; 4]);
        assert_eq!(&cycle[6..], &[-1.0; 4]);
    }

    #[test]
    fn test_phase_stays_in_cycle() {
        let mut osc = Oscillator::new(44100.0, 4186.0, Waveform::Sine);
        for _ in 0..44100 {
            let sample = osc.next_sample();
            assert!((-1.0..=1.0).contains(&sample));
        }
        assert!(osc.phase >= 0.0 && osc.phase < 1.0);
    }
}
