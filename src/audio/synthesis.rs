//! Procedural demo signal (Glicol) for running without a microphone.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use glicol::Engine;
use tracing::{error, info};

use super::capture::SharedSamples;
use crate::error::AudioError;

/// Audio block size (samples per Glicol buffer)
/// 128 = 2.9ms @ 44.1kHz
const BLOCK_SIZE: usize = 128;

/// Glicol composition (procedural music code): a swept lead over a sine kick
pub const DEMO_COMPOSITION: &str = r#"
~gate: speed 2.0 >> seq 60 _60 _~a 48
~a: choose 48 48 48 72 0 0 0
~amp: ~gate >> envperc 0.001 0.1
~pit: ~gate >> mul 261.63
~lead: saw ~pit >> mul ~amp >> lpf ~mod 5.0 >> mul 0.1
~mod: sin 0.2 >> mul 1300 >> add 1500
~kgate: speed 2.0 >> seq 60 _ 60 _
~kamp: ~kgate >> envperc 0.001 0.3
~kick: sin 55 >> mul ~kamp >> mul 0.4
o: mix ~lead ~kick >> plate 0.1
"#;

/// Play the demo composition on the default output device and feed what is
/// played (mono) into `ring`
///
/// Returns the live stream (playback stops when it is dropped) and the device sample rate.
pub fn open_demo(ring: SharedSamples) -> Result<(cpal::Stream, u32), AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(AudioError::NoDevice("output"))?;

    let config = device.default_output_config()?;
    if config.sample_format() != SampleFormat::F32 {
        return Err(AudioError::UnsupportedSampleFormat(config.sample_format()));
    }
    let sample_rate = config.sample_rate().0;
    let channels = (config.channels() as usize).max(1);

    let mut engine = Engine::<BLOCK_SIZE>::new();
    engine.set_sr(sample_rate as usize);
    engine.update_with_code(DEMO_COMPOSITION);
    engine
        .update()
        .map_err(|e| AudioError::Synthesis(format!("{:?}", e)))?;

    info!(
        device = %device.name().unwrap_or_else(|_| "Unknown".to_string()),
        sample_rate,
        "Demo synthesis started"
    );

    // Stereo block carried across callbacks so no generated samples are dropped
    let mut block = [[0.0f32; 2]; BLOCK_SIZE];
    let mut cursor = BLOCK_SIZE;

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            let mut ring = ring.lock().ok();

            for frame in data.chunks_mut(channels) {
                if cursor == BLOCK_SIZE {
                    let (buffers, _) = engine.next_block(vec![]);
                    for (i, slot) in block.iter_mut().enumerate() {
                        // Safety limiter: hard clip to ±0.5 to prevent ear damage
                        let left = buffers[0][i].clamp(-0.5, 0.5);
                        let right = buffers[1][i].clamp(-0.5, 0.5);
                        *slot = [left, right];
                    }
                    cursor = 0;
                }

                let [left, right] = block[cursor];
                cursor += 1;

                for (channel, out) in frame.iter_mut().enumerate() {
                    *out = if channel % 2 == 0 { left } else { right };
                }

                if let Some(ring) = ring.as_mut() {
                    ring.push(0.5 * (left + right));
                }
            }
        },
        |err| error!("Audio output stream error: {}", err),
        None,
    )?;

    stream.play()?;

    Ok((stream, sample_rate))
}
