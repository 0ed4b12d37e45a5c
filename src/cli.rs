//! Command-line argument parsing.

use clap::Parser;

use crate::audio::SignalInput;
use crate::params::{AnalyserConfig, BloomConfig, BloomParam, SceneConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Midnight Pulse")]
#[command(about = "Audio-reactive particle cloud", long_about = None)]
pub struct Args {
    /// Analyse the built-in glicol composition instead of the microphone
    #[arg(long)]
    pub demo: bool,

    /// Start listening immediately instead of waiting for Space
    #[arg(long)]
    pub listen: bool,

    /// Seed for the particle layout (random when omitted)
    #[arg(long, value_name = "U64")]
    pub seed: Option<u64>,

    /// FFT window size (power of two; bins = half of it)
    #[arg(long, value_name = "N", default_value_t = 1024)]
    pub fft_size: usize,

    /// Spectrum smoothing time constant in [0, 1]
    #[arg(long, value_name = "TAU", default_value_t = 0.8)]
    pub smoothing: f32,

    /// Bloom strength [0, 5]
    #[arg(long, value_name = "F32", default_value_t = 1.5)]
    pub bloom_intensity: f32,

    /// Bloom luminance threshold [0, 1]
    #[arg(long, value_name = "F32", default_value_t = 0.6)]
    pub bloom_threshold: f32,

    /// Bloom spread [0, 1.5]
    #[arg(long, value_name = "F32", default_value_t = 0.6)]
    pub bloom_radius: f32,
}

impl Args {
    pub fn signal_input(&self) -> SignalInput {
        if self.demo {
            SignalInput::Demo
        } else {
            SignalInput::Microphone
        }
    }

    /// Analyser settings; validated later by the audio session
    pub fn analyser_config(&self) -> AnalyserConfig {
        AnalyserConfig {
            fft_size: self.fft_size,
            smoothing: self.smoothing,
            ..AnalyserConfig::default()
        }
    }

    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            seed: self.seed,
            ..SceneConfig::default()
        }
    }

    /// Bloom settings, clamped to each parameter's range
    pub fn bloom_config(&self) -> BloomConfig {
        let mut bloom = BloomConfig::default();
        bloom.set(BloomParam::Intensity, self.bloom_intensity);
        bloom.set(BloomParam::Threshold, self.bloom_threshold);
        bloom.set(BloomParam::Radius, self.bloom_radius);
        bloom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("midnight-pulse").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.signal_input(), SignalInput::Microphone);
        assert!(!args.listen);

        let analyser = args.analyser_config();
        assert_eq!(analyser.fft_size, 1024);
        assert_eq!(analyser.smoothing, 0.8);

        assert_eq!(args.scene_config().seed, None);
        assert_eq!(args.bloom_config(), BloomConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = parse(&[
            "--demo",
            "--listen",
            "--seed",
            "42",
            "--fft-size",
            "2048",
            "--smoothing",
            "0.5",
            "--bloom-radius",
            "1.0",
        ]);

        assert_eq!(args.signal_input(), SignalInput::Demo);
        assert!(args.listen);
        assert_eq!(args.scene_config().seed, Some(42));
        assert_eq!(args.analyser_config().fft_size, 2048);
        assert_eq!(args.analyser_config().smoothing, 0.5);
        assert_eq!(args.bloom_config().radius, 1.0);
    }

    #[test]
    fn test_bloom_flags_are_clamped() {
        let bloom = parse(&["--bloom-intensity", "9", "--bloom-threshold", "-1"]).bloom_config();
        assert_eq!(bloom.intensity, 5.0);
        assert_eq!(bloom.threshold, 0.0);
    }

    #[test]
    fn test_invalid_fft_size_reaches_validation() {
        let args = parse(&["--fft-size", "1000"]);
        assert!(args.analyser_config().validate().is_err());
    }

    #[test]
    fn test_rejects_non_numeric_seed() {
        let result = Args::try_parse_from(["midnight-pulse", "--seed", "abc"]);
        assert!(result.is_err());
    }
}
