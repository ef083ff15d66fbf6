/// Lifecycle events sent from the audio thread while a tone plays
/// Must be simple and fast to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    /// First buffer containing the tone was rendered
    Started,
    /// Scheduled stop point reached; output goes silent from here
    Stopped,
    /// Output rendered past the stop point, the sound is over
    Ended,
}

impl ToneEvent {
    pub fn is_ended(&self) -> bool {
        matches!(self, ToneEvent::Ended)
    }
}
