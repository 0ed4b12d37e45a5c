//! Parameter definitions with units and documented semantics.
//!
//! All tuned visual constants are extracted here with:
//! - Units (world units, seconds, radians, decibels)
//! - Documented ranges and meanings
//! - Validation where a bad value would be fatal later

mod analyser;
mod camera;
mod particles;
mod render;

// Re-export all types
pub use analyser::AnalyserConfig;
pub use camera::OrbitCameraParams;
pub use particles::{GroupSpec, MotionParams, PaletteParams, SceneConfig, ShellParams};
pub use render::{BloomConfig, BloomParam, RenderConfig};
