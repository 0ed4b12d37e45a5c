//! Error types for audio, configuration and rendering.

use thiserror::Error;

/// Errors from the audio input and spectrum source
#[derive(Debug, Error)]
pub enum AudioError {
    /// The spectrum source has nothing to analyse yet (capture not delivering)
    #[error("Audio signal unavailable")]
    SignalUnavailable,

    #[error("No audio {0} device found")]
    NoDevice(&'static str),

    #[error("Failed to get audio config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Unsupported sample format: {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("Glicol engine init failed: {0}")]
    Synthesis(String),

    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigError),
}

/// Fatal configuration errors, raised at construction time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors creating the GPU rendering system
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
