//! Spectrum analyser configuration.

use crate::error::ConfigError;

/// Spectrum analysis configuration (frequency resolution, smoothing, byte scaling)
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// FFT window size in samples (must be power of 2)
    /// 1024 = 512 magnitude bins
    pub fft_size: usize,

    /// Temporal smoothing time constant, 0 = none, 1 = frozen
    pub smoothing: f32,

    /// Magnitude (dB) mapped to byte 0
    pub min_decibels: f32,

    /// Magnitude (dB) mapped to byte 255
    pub max_decibels: f32,

    /// Sample rate of the analysed signal (Hz), filled in from the device
    pub sample_rate_hz: u32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            smoothing: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
            sample_rate_hz: 44100,
        }
    }
}

impl AnalyserConfig {
    /// Number of magnitude bins produced per refresh
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Width of one magnitude bin (Hz)
    pub fn bin_width_hz(&self) -> f32 {
        self.sample_rate_hz as f32 / self.fft_size as f32
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fft_size < 2 || !self.fft_size.is_power_of_two() {
            return Err(ConfigError::InvalidConfiguration(format!(
                "FFT size must be a power of 2 and at least 2, got {}",
                self.fft_size
            )));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "Smoothing must be within [0, 1], got {}",
                self.smoothing
            )));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(ConfigError::InvalidConfiguration(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }
        Ok(())
    }
}
