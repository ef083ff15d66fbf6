/// Fixed-gain amplifier stage between the oscillator and the output
pub struct Vca {
    /// 0.0 to 1.0
    gain: f32,
}

impl Vca {
    /// Out-of-range volumes are clamped here, at the last stage before output
    pub fn new(gain: f32) -> Self {
        Self {
            gain: gain.clamp(0.0, 1.0),
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Apply gain to `signal`; `gate` is 1.0 while the tone sounds, 0.0 after
    pub fn process(&self, signal: f32, gate: f32) -> f32 {
        signal * gate * self.gain
    }
}
