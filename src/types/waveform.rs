use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// Oscillator shape of the emitted tone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

impl Waveform {
    /// Amplitude in [-1, 1] at `phase`, where one cycle spans 0.0..1.0
    pub fn generate(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Square if phase < 0.5 => 1.0,
            Waveform::Square => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_quarter_points() {
        assert!(Waveform::Sine.generate(0.0).abs() < 1e-6);
        assert!((Waveform::Sine.generate(0.25) - 1.0).abs() < 1e-6);
        assert!((Waveform::Sine.generate(0.75) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_peaks_mid_cycle() {
        assert!((Waveform::Triangle.generate(0.0) + 1.0).abs() < 1e-6);
        assert!((Waveform::Triangle.generate(0.5) - 1.0).abs() < 1e-6);
        assert!(Waveform::Triangle.generate(0.75).abs() < 1e-6);
    }

    #[test]
    fn test_square_halves() {
        assert_eq!(Waveform::Square.generate(0.1), 1.0);
        assert_eq!(Waveform::Square.generate(0.6), -1.0);
    }

    #[test]
    fn test_parse_lowercase() {
        let wave: Waveform = serde_yaml::from_str("sawtooth").unwrap();
        assert_eq!(wave, Waveform::Sawtooth);
        assert_eq!(Waveform::default(), Waveform::Sine);
    }
}
