//! Windowed FFT spectrum analysis producing byte magnitudes.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;
use tracing::debug;

use super::capture::SharedSamples;
use crate::error::{AudioError, ConfigError};
use crate::params::AnalyserConfig;

/// Anything that can produce a fresh magnitude snapshot on demand
///
/// `refresh` must not block: it analyses whatever input is currently buffered.
pub trait SpectrumSource {
    /// Most recent magnitude snapshot, one byte (0..=255) per frequency bin
    fn refresh(&mut self) -> Result<&[u8], AudioError>;

    /// Number of bins every successful refresh returns
    fn bin_count(&self) -> usize;
}

/// FFT analyser over the most recent window of a shared sample ring
pub struct SpectrumAnalyser {
    fft: Arc<dyn Fft<f32>>,
    config: AnalyserConfig,
    samples: SharedSamples,

    /// Time-domain window copied out of the ring
    window_samples: Vec<f32>,

    /// Blackman window coefficients
    window: Vec<f32>,

    fft_buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,

    /// Smoothed linear magnitudes (half of FFT size)
    smoothed: Vec<f32>,

    /// Byte magnitudes handed out by `refresh`
    bytes: Vec<u8>,
}

impl SpectrumAnalyser {
    pub fn new(config: AnalyserConfig, samples: SharedSamples) -> Result<Self, ConfigError> {
        config.validate()?;

        let fft_size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        let window = (0..fft_size).map(|i| blackman_window(i, fft_size)).collect();

        debug!(
            fft_size,
            bins = config.bin_count(),
            bin_width_hz = config.bin_width_hz(),
            "Spectrum analyser created"
        );

        Ok(Self {
            fft,
            samples,
            window_samples: vec![0.0; fft_size],
            window,
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
            scratch,
            smoothed: vec![0.0; config.bin_count()],
            bytes: vec![0; config.bin_count()],
            config,
        })
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Copy the newest window out of the ring (never holds the lock during the FFT)
    fn capture_window(&mut self) -> Result<(), AudioError> {
        let ring = self
            .samples
            .lock()
            .map_err(|_| AudioError::SignalUnavailable)?;
        if !ring.has_signal() {
            return Err(AudioError::SignalUnavailable);
        }
        ring.copy_latest(&mut self.window_samples);
        Ok(())
    }

    fn analyse(&mut self) {
        let fft_size = self.config.fft_size;

        // Apply Blackman window
        for ((dst, &sample), &w) in self
            .fft_buffer
            .iter_mut()
            .zip(&self.window_samples)
            .zip(&self.window)
        {
            *dst = Complex::new(sample * w, 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.fft_buffer, &mut self.scratch);

        let tau = self.config.smoothing;
        let min_db = self.config.min_decibels;
        let byte_scale = 255.0 / (self.config.max_decibels - min_db);
        let norm = 1.0 / fft_size as f32;

        for ((smoothed, byte), bin) in self
            .smoothed
            .iter_mut()
            .zip(self.bytes.iter_mut())
            .zip(&self.fft_buffer)
        {
            let magnitude = bin.norm() * norm;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
            *byte = magnitude_to_byte(*smoothed, min_db, byte_scale);
        }
    }
}

impl SpectrumSource for SpectrumAnalyser {
    fn refresh(&mut self) -> Result<&[u8], AudioError> {
        self.capture_window()?;
        self.analyse();
        Ok(&self.bytes)
    }

    fn bin_count(&self) -> usize {
        self.config.bin_count()
    }
}

/// Blackman window function for FFT analysis
pub fn blackman_window(index: usize, size: usize) -> f32 {
    const A0: f32 = 0.42;
    const A1: f32 = 0.5;
    const A2: f32 = 0.08;
    let x = index as f32 / size as f32;
    A0 - A1 * (2.0 * PI * x).cos() + A2 * (4.0 * PI * x).cos()
}

/// Map a linear magnitude onto a byte via the decibel range
///
/// Silence (-inf dB) and anything below `min_db` map to 0.
fn magnitude_to_byte(magnitude: f32, min_db: f32, byte_scale: f32) -> u8 {
    let db = 20.0 * magnitude.log10();
    let scaled = ((db - min_db) * byte_scale).floor();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::capture::shared_ring;

    fn analyser(smoothing: f32) -> (SpectrumAnalyser, SharedSamples) {
        let config = AnalyserConfig {
            smoothing,
            ..Default::default()
        };
        let ring = shared_ring(config.fft_size * 2);
        let analyser = SpectrumAnalyser::new(config, Arc::clone(&ring)).unwrap();
        (analyser, ring)
    }

    fn push_sine(ring: &SharedSamples, bin: usize, fft_size: usize, amplitude: f32) {
        let mut ring = ring.lock().unwrap();
        for n in 0..fft_size {
            let phase = 2.0 * PI * bin as f32 * n as f32 / fft_size as f32;
            ring.push(amplitude * phase.sin());
        }
    }

    fn push_silence(ring: &SharedSamples, count: usize) {
        let mut ring = ring.lock().unwrap();
        for _ in 0..count {
            ring.push(0.0);
        }
    }

    #[test]
    fn test_blackman_window() {
        let size = 1024;

        // Blackman window should be ~0 at the start, 1 at center
        assert!(blackman_window(0, size).abs() < 1e-6);
        assert!((blackman_window(size / 2, size) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_magnitude_to_byte_range() {
        let scale = 255.0 / 70.0;
        assert_eq!(magnitude_to_byte(0.0, -100.0, scale), 0);
        assert_eq!(magnitude_to_byte(1.0, -100.0, scale), 255);
        // -65 dB sits halfway between -100 and -30
        let half = 10f32.powf(-65.0 / 20.0);
        assert!((magnitude_to_byte(half, -100.0, scale) as i32 - 127).abs() <= 1);
    }

    #[test]
    fn test_refresh_without_signal_is_unavailable() {
        let (mut analyser, _ring) = analyser(0.8);
        assert!(matches!(
            analyser.refresh(),
            Err(AudioError::SignalUnavailable)
        ));
    }

    #[test]
    fn test_refresh_returns_fixed_bin_count() {
        let (mut analyser, ring) = analyser(0.8);
        push_silence(&ring, 10); // Fewer than fft_size: zero padded

        let bins = analyser.refresh().unwrap();
        assert_eq!(bins.len(), 512);
        assert!(bins.iter().all(|&b| b == 0));
        assert_eq!(analyser.bin_count(), 512);
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let (mut analyser, ring) = analyser(0.0);
        push_sine(&ring, 20, 1024, 0.5);

        let bins = analyser.refresh().unwrap().to_vec();
        let peak = bins
            .iter()
            .enumerate()
            .max_by_key(|&(_, &b)| b)
            .map(|(i, _)| i)
            .unwrap();

        assert_eq!(bins[20], 255);
        assert!((19..=21).contains(&peak));
        assert!(bins[300] < bins[20]);
    }

    #[test]
    fn test_smoothing_decays_gradually() {
        let (mut analyser, ring) = analyser(0.8);
        push_sine(&ring, 20, 1024, 0.5);
        analyser.refresh().unwrap();

        push_silence(&ring, 1024);
        let decayed = analyser.refresh().unwrap()[20];
        assert!(decayed > 0, "smoothed bin should not drop straight to zero");

        let (mut sharp, ring) = self::analyser(0.0);
        push_sine(&ring, 20, 1024, 0.5);
        sharp.refresh().unwrap();
        push_silence(&ring, 1024);
        assert_eq!(sharp.refresh().unwrap()[20], 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalyserConfig {
            fft_size: 1000,
            ..Default::default()
        };
        assert!(SpectrumAnalyser::new(config, shared_ring(16)).is_err());
    }
}
