use std::fmt;

/// The twelve pitch classes, in keyboard order starting from A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    A,
    ASharp,
    B,
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
}

impl PitchClass {
    /// One octave of the piano keyboard, lowest key first
    pub const CYCLE: [PitchClass; 12] = [
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
        }
    }

    /// Scientific pitch notation numbers octaves from C, so every class
    /// from C upwards sits one octave number above the A opening its cycle
    pub fn octave_offset(self) -> u8 {
        match self {
            PitchClass::A | PitchClass::ASharp | PitchClass::B => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One key of the 88-key piano
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEntry {
    /// 1-based position on the keyboard (A0 = 1, C8 = 88)
    pub key_number: u8,
    /// Frequency in Hz
    pub frequency: f64,
    /// Pitch class followed by octave digit, e.g. "C#4"
    pub name: String,
}

impl fmt::Display for KeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2}  {:<3}  {:>9.3} Hz", self.key_number, self.name, self.frequency)
    }
}
