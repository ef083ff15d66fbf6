use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use piano_note::audio::{self, CpalEmitter};
use piano_note::config::{self, PlayerConfig};
use piano_note::types::waveform::Waveform;
use piano_note::{notes_info, Note, NoteRequest, NoteResolver, OutputHandle, Pitch};

/// Play a single piano note by name, frequency or key number
#[derive(Parser, Debug)]
#[command(name = "piano-note")]
#[command(about = "Play one note of the 88-key piano", long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short = 'c', long = "config")]
    config: Option<std::path::PathBuf>,

    /// Note name, e.g. A4 or C#3
    #[arg(short = 'n', long = "name", conflicts_with_all = ["frequency", "key"])]
    name: Option<String>,

    /// Frequency in Hz; snapped to the closest key
    #[arg(short = 'f', long = "freq", conflicts_with = "key")]
    frequency: Option<f64>,

    /// Piano key number (1-88)
    #[arg(short = 'k', long = "key", allow_negative_numbers = true)]
    key: Option<i32>,

    /// Duration in seconds (random 0.5-3.0 when omitted)
    #[arg(short = 'd', long = "duration")]
    duration: Option<f64>,

    /// Volume (0.0-1.0)
    #[arg(short = 'v', long = "volume")]
    volume: Option<f64>,

    /// Oscillator waveform
    #[arg(short = 'w', long = "wave", value_enum)]
    wave: Option<Waveform>,

    /// Seed for the random default duration
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Audio output device (name, index or "default")
    #[arg(short = 'o', long = "device")]
    device: Option<String>,

    /// List available output devices and exit
    #[arg(short = 'l', long = "list")]
    list_devices: bool,

    /// Print the 88-key table and exit
    #[arg(short = 't', long = "table")]
    table: bool,
}

impl Args {
    fn note_request(&self) -> NoteRequest {
        NoteRequest {
            name: self.name.clone(),
            frequency: self.frequency,
            key_number: self.key,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.list_devices {
        println!("Available Audio Output Devices:");
        for (i, device) in audio::list_devices()?.iter().enumerate() {
            println!("  {}: {}", i, device);
        }
        return Ok(());
    }

    if args.table {
        for key in notes_info() {
            println!("{}", key);
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    };

    let note = build_note(&args, &config)?;
    info!(%note, "resolved note");

    let emitter = CpalEmitter::new(args.wave.unwrap_or(config.tone.wave));
    let name = note.name().to_string();
    let playback = audio::play(&emitter, &note, move || info!(note = %name, "note ended"))?;
    playback.wait()?;

    Ok(())
}

/// Resolve the requested pitch and apply duration, volume and output,
/// command line taking precedence over the config file
fn build_note(args: &Args, config: &PlayerConfig) -> Result<Note> {
    let request = config
        .note
        .clone()
        .unwrap_or_default()
        .overridden_by(&args.note_request());
    let pitch: Pitch = request.pitch().context("No playable note requested")?;

    let note = match args.seed.or(config.tone.seed) {
        Some(seed) => NoteResolver::seeded(seed).resolve(&pitch, None),
        None => NoteResolver::new().resolve(&pitch, None),
    };
    let mut note = note.with_context(|| format!("Failed to resolve {:?}", pitch))?;

    if let Some(duration) = args.duration {
        config::validate_duration(duration)?;
    }
    if let Some(volume) = args.volume {
        config::validate_volume(volume)?;
    }

    note.set_duration(args.duration.or(config.tone.duration));
    note.set_volume(Some(args.volume.unwrap_or(config.tone.volume)));

    // Resolution never picks an output; fall back to the configured device here
    let device = args
        .device
        .as_ref()
        .map(OutputHandle::new)
        .unwrap_or_else(|| config.device.handle());
    note.set_destination(Some(device));

    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("piano-note").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_pitch_flags_conflict() {
        let result = Args::try_parse_from(["piano-note", "--name", "A4", "--key", "49"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = PlayerConfig::default();
        config.note = Some(NoteRequest {
            name: Some("C4".to_string()),
            ..Default::default()
        });
        config.tone.volume = 0.3;
        config.tone.duration = Some(2.0);

        let note = build_note(&args(&["--key", "49", "--volume", "0.9", "--device", "2"]), &config).unwrap();
        assert_eq!(note.name(), "A4");
        assert_eq!(note.volume(), 0.9);
        assert_eq!(note.duration(), 2.0);
        assert_eq!(note.destination(), Some(&OutputHandle::new("2")));
    }

    #[test]
    fn test_config_note_and_default_device() {
        let mut config = PlayerConfig::default();
        config.note = Some(NoteRequest {
            frequency: Some(262.0),
            ..Default::default()
        });

        let note = build_note(&args(&["--seed", "5", "--duration", "1.5"]), &config).unwrap();
        assert_eq!(note.name(), "C4");
        assert_eq!(note.duration(), 1.5);
        assert_eq!(note.volume(), 1.0);
        assert_eq!(note.destination(), Some(&OutputHandle::new("default")));
    }

    #[test]
    fn test_missing_note_fails() {
        assert!(build_note(&args(&[]), &PlayerConfig::default()).is_err());
    }

    #[test]
    fn test_out_of_range_frequency_fails() {
        assert!(build_note(&args(&["--freq", "5000"]), &PlayerConfig::default()).is_err());
    }

    #[test]
    fn test_invalid_volume_rejected() {
        assert!(build_note(&args(&["--name", "A4", "--volume", "2"]), &PlayerConfig::default()).is_err());
    }
}
