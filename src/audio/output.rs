use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::unbounded;
use tracing::{debug, error};

use super::emitter::{OnEnded, Playback, ToneEmitter};
use super::tone::Tone;
use crate::error::AudioError;
use crate::types::note::OutputHandle;
use crate::types::waveform::Waveform;

/// Selector that picks the host's default output device
pub const DEFAULT_DEVICE: &str = "default";

/// List available audio output devices
pub fn list_devices() -> Result<Vec<String>, AudioError> {
    let host = cpal::default_host();

    let devices: Vec<String> = host
        .output_devices()?
        .filter_map(|device| device.description().ok().map(|desc| desc.name().to_string()))
        .collect();

    if devices.is_empty() {
        return Err(AudioError::NoDevices);
    }

    Ok(devices)
}

/// Find device index by index string or case-insensitive name substring
pub fn find_device(devices: &[String], search: &str) -> Result<usize, AudioError> {
    if let Ok(index) = search.parse::<usize>() {
        if index < devices.len() {
            return Ok(index);
        }
        return Err(AudioError::DeviceIndexOutOfRange {
            index,
            max: devices.len().saturating_sub(1),
        });
    }

    let search_lower = search.to_lowercase();
    devices
        .iter()
        .position(|device| device.to_lowercase().contains(&search_lower))
        .ok_or_else(|| AudioError::DeviceNotFound(search.to_string()))
}

fn open_device(handle: &OutputHandle) -> Result<cpal::Device, AudioError> {
    let host = cpal::default_host();

    if handle.selector().eq_ignore_ascii_case(DEFAULT_DEVICE) {
        return host.default_output_device().ok_or(AudioError::NoDevices);
    }

    let devices = list_devices()?;
    let index = find_device(&devices, handle.selector())?;
    debug!(device = %devices[index], "selected output device");

    host.output_devices()?
        .nth(index)
        .ok_or_else(|| AudioError::DeviceNotFound(handle.selector().to_string()))
}

/// Plays tones through a cpal output stream
#[derive(Debug, Clone, Copy, Default)]
pub struct CpalEmitter {
    waveform: Waveform,
}

impl CpalEmitter {
    pub fn new(waveform: Waveform) -> Self {
        Self { waveform }
    }
}

impl ToneEmitter for CpalEmitter {
    fn emit(
        &self,
        frequency: f64,
        volume: f64,
        duration: f64,
        destination: &OutputHandle,
        on_ended: OnEnded,
    ) -> Result<Playback, AudioError> {
        let device = open_device(destination)?;
        let supported = device.default_output_config()?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let (event_tx, event_rx) = unbounded();
        let tone = Tone::new(
            config.sample_rate as f32,
            frequency as f32,
            volume as f32,
            duration,
            self.waveform,
            event_tx,
        );

        let stream = match sample_format {
            cpal::SampleFormat::F32 => start_stream::<f32>(&device, &config, tone)?,
            cpal::SampleFormat::I16 => start_stream::<i16>(&device, &config, tone)?,
            cpal::SampleFormat::U16 => start_stream::<u16>(&device, &config, tone)?,
            other => return Err(AudioError::UnsupportedSampleFormat(other)),
        };

        Ok(Playback::watch(event_rx, on_ended).holding(stream))
    }
}

/// Start an output stream rendering `tone` on every channel
fn start_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut tone: Tone,
) -> Result<cpal::Stream, AudioError>
where
    T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;

    // Pre-allocate so the callback stays allocation-free in the common case
    let mut temp_buffer = vec![0.0f32; 512 * channels];

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            if temp_buffer.len() < data.len() {
                temp_buffer.resize(data.len(), 0.0);
            }

            let rendered = &mut temp_buffer[..data.len()];
            tone.process(rendered, channels);

            for (out, sample) in data.iter_mut().zip(rendered.iter()) {
                *out = T::from_sample(*sample);
            }
        },
        |err| error!("audio stream error: {}", err),
        None,
    )?;

    stream.play()?;

    Ok(stream)
}
