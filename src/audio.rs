//! Live audio input and spectrum analysis.
//!
//! Captures microphone input (or a Glicol demo composition) into a shared
//! sample ring, converts the most recent window into byte magnitudes, and
//! reduces those to band energies for the particle engine.

mod analyser;
mod bands;
mod capture;
mod synthesis;
mod system;

// Re-export public types
pub use analyser::{SpectrumAnalyser, SpectrumSource};
pub use bands::{band_ranges, reduce, BandEnergies};
pub use capture::{shared_ring, SampleRing, SharedSamples};
pub use system::{AudioSession, FrameAudio, SignalInput};
