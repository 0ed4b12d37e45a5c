//! Particle cloud layout, palette and motion parameters.

use crate::error::ConfigError;
use crate::particles::ShapeTag;

/// One shape group in the scene table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpec {
    pub shape: ShapeTag,
    pub count: usize,
}

/// Spherical shell the particle origins are sampled on
#[derive(Debug, Clone)]
pub struct ShellParams {
    /// Inner shell radius (world units)
    pub min_radius: f32,

    /// Outer shell radius (world units)
    pub max_radius: f32,
}

impl Default for ShellParams {
    fn default() -> Self {
        Self {
            min_radius: 15.0,
            max_radius: 35.0,
        }
    }
}

/// HSL palette for particle colors (hue is sampled, the rest is fixed)
#[derive(Debug, Clone)]
pub struct PaletteParams {
    /// HSL saturation, 1.0 = fully vivid
    pub saturation: f32,

    /// HSL lightness, 0.6 = bright but not washed out
    pub lightness: f32,
}

impl Default for PaletteParams {
    fn default() -> Self {
        Self {
            saturation: 1.0,
            lightness: 0.6,
        }
    }
}

/// Mapping from time and audio to per-particle motion
#[derive(Debug, Clone)]
pub struct MotionParams {
    /// Radial breathing amplitude (world units)
    /// Formula: breathing = sin(t + phase) * this
    pub breathing_amplitude: f32,

    /// Radial push at full bass (world units)
    /// Formula: bass_push = (low / 255) * this
    pub bass_push: f32,

    /// Extra X rotation at full per-particle audio value (radians)
    pub audio_spin: f32,

    /// Y rotation rate relative to elapsed time
    pub spin_y_rate: f32,

    /// Base scale while listening
    pub listening_base_scale: f32,

    /// Scale added at full per-particle audio value while listening
    pub listening_audio_scale: f32,

    /// Base scale while idle
    pub idle_base_scale: f32,

    /// Idle pulse amplitude
    /// Formula: scale = idle_base + sin(t * idle_pulse_rate + phase) * this
    pub idle_pulse_amplitude: f32,

    /// Idle pulse angular rate (radians per second)
    pub idle_pulse_rate: f32,

    /// Whole-cloud Y rotation rate (radians per second)
    pub group_spin_y: f32,

    /// Whole-cloud Z rotation rate (radians per second)
    pub group_spin_z: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            breathing_amplitude: 2.0,
            bass_push: 8.0,
            audio_spin: 5.0,
            spin_y_rate: 0.5,
            listening_base_scale: 0.3,
            listening_audio_scale: 4.0,
            idle_base_scale: 1.0,
            idle_pulse_amplitude: 0.5,
            idle_pulse_rate: 2.0,
            group_spin_y: 0.05,
            group_spin_z: 0.02,
        }
    }
}

/// Full particle scene configuration
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Shape groups, drawn in order (one draw call each)
    pub groups: Vec<GroupSpec>,

    pub shell: ShellParams,

    pub palette: PaletteParams,

    pub motion: MotionParams,

    /// RNG seed for the seed tables (None = OS entropy)
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        // 2000 particles across the three shapes
        Self {
            groups: vec![
                GroupSpec {
                    shape: ShapeTag::Cube,
                    count: 800,
                },
                GroupSpec {
                    shape: ShapeTag::Sphere,
                    count: 600,
                },
                GroupSpec {
                    shape: ShapeTag::Tetrahedron,
                    count: 600,
                },
            ],
            shell: ShellParams::default(),
            palette: PaletteParams::default(),
            motion: MotionParams::default(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Total number of particles across all groups
    pub fn total_particles(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Validate configuration (non-empty scene, sane shell, etc.)
    ///
    /// Individual groups may be empty; a scene with nothing to draw may not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_particles() == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "Scene has no particles".to_string(),
            ));
        }
        let shell = &self.shell;
        if !(shell.min_radius > 0.0)
            || !(shell.max_radius >= shell.min_radius)
            || !shell.max_radius.is_finite()
        {
            return Err(ConfigError::InvalidConfiguration(format!(
                "Shell radii must satisfy 0 < min <= max, got [{}, {}]",
                shell.min_radius, shell.max_radius
            )));
        }
        let palette = &self.palette;
        if !(0.0..=1.0).contains(&palette.saturation) || !(0.0..=1.0).contains(&palette.lightness) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "Palette saturation/lightness must be within [0, 1], got {}/{}",
                palette.saturation, palette.lightness
            )));
        }
        Ok(())
    }
}
