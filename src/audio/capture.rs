//! Microphone capture into a shared sample ring.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, SizedSample};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use crate::error::AudioError;

/// Bounded buffer of the most recent mono samples
#[derive(Debug)]
pub struct SampleRing {
    samples: VecDeque<f32>,
    capacity: usize,
    received: u64,
}

/// Sample ring shared between the audio callback and the render thread
pub type SharedSamples = Arc<Mutex<SampleRing>>;

/// Create an empty shared ring holding at most `capacity` samples
pub fn shared_ring(capacity: usize) -> SharedSamples {
    Arc::new(Mutex::new(SampleRing::new(capacity)))
}

impl SampleRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            received: 0,
        }
    }

    /// Append one sample, evicting the oldest when full
    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.received += 1;
    }

    pub fn extend_from_slice(&mut self, samples: &[f32]) {
        for &sample in samples {
            self.push(sample);
        }
    }

    /// True once the input has delivered at least one sample
    pub fn has_signal(&self) -> bool {
        self.received > 0
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Copy the most recent `out.len()` samples into `out`, oldest first
    ///
    /// When fewer samples are buffered the front of `out` is zero-filled.
    pub fn copy_latest(&self, out: &mut [f32]) {
        let available = self.samples.len().min(out.len());
        let pad = out.len() - available;
        out[..pad].fill(0.0);

        let skip = self.samples.len() - available;
        for (dst, &src) in out[pad..].iter_mut().zip(self.samples.iter().skip(skip)) {
            *dst = src;
        }
    }
}

/// Open the default input device and stream its samples (mono) into `ring`
///
/// Returns the live stream (capture stops when it is dropped) and the device sample rate.
pub fn open_microphone(ring: SharedSamples) -> Result<(cpal::Stream, u32), AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(AudioError::NoDevice("input"))?;

    let config = device.default_input_config()?;
    let sample_format = config.sample_format();
    let sample_rate = config.sample_rate().0;

    info!(
        device = %device.name().unwrap_or_else(|_| "Unknown".to_string()),
        sample_rate,
        channels = config.channels(),
        "Microphone opened"
    );

    let stream_config: cpal::StreamConfig = config.into();
    let stream = match sample_format {
        SampleFormat::F32 => build_input_stream::<f32>(&device, &stream_config, ring)?,
        SampleFormat::I16 => build_input_stream::<i16>(&device, &stream_config, ring)?,
        SampleFormat::U16 => build_input_stream::<u16>(&device, &stream_config, ring)?,
        other => return Err(AudioError::UnsupportedSampleFormat(other)),
    };

    stream.play()?;

    Ok((stream, sample_rate))
}

fn build_input_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    ring: SharedSamples,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + Send + 'static,
    f32: cpal::FromSample<T>,
{
    let channels = (config.channels as usize).max(1);

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let Ok(mut ring) = ring.lock() else {
                return;
            };
            // Downmix interleaved frames to mono
            for frame in data.chunks(channels) {
                let sum: f32 = frame.iter().map(|&s| s.to_sample::<f32>()).sum();
                ring.push(sum / frame.len() as f32);
            }
        },
        |err| error!("Audio input stream error: {}", err),
        None,
    )?;

    Ok(stream)
}
