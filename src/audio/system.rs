//! Audio session lifecycle and per-frame sampling.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::analyser::{SpectrumAnalyser, SpectrumSource};
use super::bands::{reduce, BandEnergies};
use super::capture::{open_microphone, shared_ring};
use super::synthesis::open_demo;
use crate::error::{AudioError, ConfigError};
use crate::params::AnalyserConfig;

/// Which live signal feeds the analyser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalInput {
    /// Default input device (microphone / loopback)
    Microphone,
    /// Built-in Glicol composition played on the default output device
    Demo,
}

impl fmt::Display for SignalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Microphone => write!(f, "microphone"),
            Self::Demo => write!(f, "demo"),
        }
    }
}

/// Audio input for one rendered frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameAudio {
    /// Whether a live signal was analysed for this frame
    pub listening: bool,

    /// Band energies of `spectrum`
    pub bands: BandEnergies,

    /// Byte magnitudes, owned copy of the source snapshot
    pub spectrum: Vec<u8>,
}

impl FrameAudio {
    /// Zero-energy fallback: idle animation, no spectrum
    pub fn silent() -> Self {
        Self::default()
    }

    /// Listening frame built from a magnitude snapshot
    pub fn from_snapshot(snapshot: &[u8]) -> Self {
        Self {
            listening: true,
            bands: reduce(snapshot),
            spectrum: snapshot.to_vec(),
        }
    }
}

/// Live input plus the spectrum source reading it
struct ActiveInput {
    /// Kept alive while listening; dropping it releases the device
    _stream: Option<cpal::Stream>,
    source: Box<dyn SpectrumSource>,
}

/// Audio session managing capture lifetime and spectrum sampling
pub struct AudioSession {
    input: SignalInput,
    config: AnalyserConfig,
    active: Option<ActiveInput>,
}

impl AudioSession {
    /// Create a stopped session with the given input and analyser settings
    pub fn new(input: SignalInput, config: AnalyserConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            input,
            config,
            active: None,
        })
    }

    pub fn input(&self) -> SignalInput {
        self.input
    }

    pub fn is_listening(&self) -> bool {
        self.active.is_some()
    }

    /// Acquire the input device and start analysing (no-op if already listening)
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.active.is_some() {
            return Ok(());
        }

        // Enough history for a full window even if frames are slow
        let ring = shared_ring(self.config.fft_size * 4);

        let (stream, sample_rate_hz) = match self.input {
            SignalInput::Microphone => open_microphone(Arc::clone(&ring))?,
            SignalInput::Demo => open_demo(Arc::clone(&ring))?,
        };

        let config = AnalyserConfig {
            sample_rate_hz,
            ..self.config.clone()
        };
        let analyser = SpectrumAnalyser::new(config, ring)?;

        self.active = Some(ActiveInput {
            _stream: Some(stream),
            source: Box::new(analyser),
        });

        info!(input = %self.input, "Listening started");
        Ok(())
    }

    /// Start listening on an already-running spectrum source (no device involved)
    pub fn start_with_source(&mut self, source: Box<dyn SpectrumSource>) {
        self.stop();
        self.active = Some(ActiveInput {
            _stream: None,
            source,
        });
        info!("Listening started on external spectrum source");
    }

    /// Release the input synchronously (idempotent)
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            drop(active);
            info!(input = %self.input, "Listening stopped");
        }
    }

    /// Flip between listening and stopped, returning the new state
    pub fn toggle(&mut self) -> Result<bool, AudioError> {
        if self.is_listening() {
            self.stop();
        } else {
            self.start()?;
        }
        Ok(self.is_listening())
    }

    /// Sample the current spectrum for this frame
    ///
    /// Stopped sessions and unavailable signals both yield the silent frame.
    pub fn sample_frame(&mut self) -> FrameAudio {
        let Some(active) = self.active.as_mut() else {
            return FrameAudio::silent();
        };

        match active.source.refresh() {
            Ok(snapshot) => FrameAudio::from_snapshot(snapshot),
            Err(err) => {
                debug!("Spectrum refresh failed, using silent frame: {}", err);
                FrameAudio::silent()
            }
        }
    }
}

impl Drop for AudioSession {
    fn drop(&mut self) {
        self.stop();
    }
}
