//! Midnight Pulse library - Audio-reactive particle cloud

pub mod audio;
pub mod camera;
pub mod cli;
pub mod error;
pub mod params;
pub mod particles;
pub mod rendering;
