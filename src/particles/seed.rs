//! Per-particle static data, generated once per group.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use crate::params::{PaletteParams, ShellParams};

/// Immutable per-particle data used to compute its transform every frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSeed {
    /// Rest position on the spherical shell (never the zero vector)
    pub origin: Vec3,

    /// Animation phase offset, radians in [0, 2π)
    pub phase: f32,

    /// Linear RGB display color
    pub color: [f32; 3],
}

/// Generate `count` seeds on the configured shell
///
/// Directions use inverse-cosine polar sampling so the shell is uniformly
/// covered instead of clustering at the poles.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    shell: &ShellParams,
    palette: &PaletteParams,
) -> Vec<ParticleSeed> {
    let radius_span = shell.max_radius - shell.min_radius;

    (0..count)
        .map(|_| {
            let r = shell.min_radius + rng.random::<f32>() * radius_span;
            let theta = rng.random::<f32>() * TAU;
            let phi = (2.0 * rng.random::<f32>() - 1.0).acos();

            let origin = Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            );

            let hue = rng.random::<f32>();
            let color = hsl_to_rgb(hue, palette.saturation, palette.lightness);

            let phase = rng.random::<f32>() * TAU;

            ParticleSeed {
                origin,
                phase,
                color,
            }
        })
        .collect()
}

/// Convert HSL (all components in [0, 1]) to RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
