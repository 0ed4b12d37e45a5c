//! Per-frame transform computation.
//!
//! Every transform is a pure function of the particle's seed, its index, the
//! elapsed time and the frame's audio. Nothing is carried between frames, so
//! re-evaluating a frame always reproduces the same buffer.

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::group::{InstanceRaw, ParticleGroup};
use super::seed::ParticleSeed;
use crate::audio::FrameAudio;
use crate::params::MotionParams;

/// Local transform of one particle for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,

    /// Euler angles (radians), applied in XYZ order; grows without bound over time
    pub rotation: Vec3,

    /// Uniform scale on all three axes
    pub scale: f32,
}

impl Transform {
    /// Compose translation · rotation · scale
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

/// Compute the transform of particle `index` at `elapsed_s`
///
/// Band energies and the spectrum are only consulted while listening.
pub fn particle_transform(
    seed: &ParticleSeed,
    index: usize,
    elapsed_s: f32,
    audio: &FrameAudio,
    motion: &MotionParams,
) -> Transform {
    let t = elapsed_s;
    let phase = seed.phase;

    let (bass_intensity, spectrum) = if audio.listening {
        (audio.bands.bass_intensity(), audio.spectrum.as_slice())
    } else {
        (0.0, &[][..])
    };

    // Particles share bins round-robin when there are more particles than bins
    let audio_value = if spectrum.is_empty() {
        0.0
    } else {
        spectrum[index % spectrum.len()] as f32 / 255.0
    };

    // Breathing plus bass pulse, pushed along the radial direction
    let direction = seed.origin / seed.origin.length();
    let breathing = (t + phase).sin() * motion.breathing_amplitude;
    let bass_push = bass_intensity * motion.bass_push;
    let position = seed.origin + direction * (breathing + bass_push);

    let rotation = Vec3::new(
        t + phase + audio_value * motion.audio_spin,
        t * motion.spin_y_rate + phase,
        0.0,
    );

    let scale = if audio.listening {
        motion.listening_base_scale + audio_value * motion.listening_audio_scale
    } else {
        motion.idle_base_scale
            + (t * motion.idle_pulse_rate + phase).sin() * motion.idle_pulse_amplitude
    };

    Transform {
        position,
        rotation,
        scale,
    }
}

/// Recompute every instance matrix of `group` for this frame, in place
pub fn step(group: &mut ParticleGroup, elapsed_s: f32, audio: &FrameAudio, motion: &MotionParams) {
    debug_assert!(elapsed_s.is_finite(), "elapsed time must be finite");

    let (seeds, instances) = group.split_mut();
    for (index, (seed, slot)) in seeds.iter().zip(instances.iter_mut()).enumerate() {
        let transform = particle_transform(seed, index, elapsed_s, audio, motion);
        *slot = InstanceRaw::from_matrix(&transform.to_matrix());
    }
}

/// Slow rigid rotation of the whole cloud, applied as the parent transform
pub fn group_frame(elapsed_s: f32, motion: &MotionParams) -> Mat4 {
    Mat4::from_euler(
        EulerRot::XYZ,
        0.0,
        elapsed_s * motion.group_spin_y,
        elapsed_s * motion.group_spin_z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::BandEnergies;
    use crate::particles::ShapeTag;

    fn seed(origin: Vec3, phase: f32) -> ParticleSeed {
        ParticleSeed {
            origin,
            phase,
            color: [1.0, 1.0, 1.0],
        }
    }

    fn listening(low: f32, spectrum: Vec<u8>) -> FrameAudio {
        FrameAudio {
            listening: true,
            bands: BandEnergies {
                average: low,
                low,
                mid: low,
                high: low,
            },
            spectrum,
        }
    }

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_max_bass_pushes_eight_units_at_time_zero() {
        let origin = Vec3::new(0.0, 20.0, 0.0);
        let audio = listening(255.0, vec![0; 512]);

        let transform =
            particle_transform(&seed(origin, 0.0), 0, 0.0, &audio, &MotionParams::default());

        // offset = sin(0) * 2 + (255 / 255) * 8 = 8
        assert_vec_close(transform.position, Vec3::new(0.0, 28.0, 0.0));
    }

    #[test]
    fn test_breathing_follows_phase() {
        let origin = Vec3::new(30.0, 0.0, 0.0);
        let phase = std::f32::consts::FRAC_PI_2;

        let transform = particle_transform(
            &seed(origin, phase),
            0,
            0.0,
            &FrameAudio::silent(),
            &MotionParams::default(),
        );

        // sin(pi/2) * 2 = 2 units outward, no bass while idle
        assert_vec_close(transform.position, Vec3::new(32.0, 0.0, 0.0));
    }

    #[test]
    fn test_listening_scale_and_rotation_use_own_bin() {
        let mut spectrum = vec![0u8; 4];
        spectrum[1] = 255;
        let audio = listening(0.0, spectrum);
        let motion = MotionParams::default();
        let s = seed(Vec3::new(20.0, 0.0, 0.0), 0.0);

        let quiet = particle_transform(&s, 0, 1.0, &audio, &motion);
        let loud = particle_transform(&s, 1, 1.0, &audio, &motion);
        let wrapped = particle_transform(&s, 5, 1.0, &audio, &motion);

        assert!((quiet.scale - 0.3).abs() < 1e-6);
        assert!((loud.scale - 4.3).abs() < 1e-5);
        assert!((loud.rotation.x - (1.0 + 5.0)).abs() < 1e-6);
        assert!((quiet.rotation.y - 0.5).abs() < 1e-6);

        // 5 mod 4 = 1: bins are reused round-robin
        assert_eq!(wrapped, loud);
    }

    #[test]
    fn test_listening_with_empty_spectrum() {
        let audio = listening(0.0, Vec::new());
        let transform = particle_transform(
            &seed(Vec3::new(0.0, 0.0, 15.0), 0.0),
            7,
            2.0,
            &audio,
            &MotionParams::default(),
        );
        assert!((transform.scale - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_idle_ignores_band_energies() {
        let motion = MotionParams::default();
        let s = seed(Vec3::new(10.0, 12.0, -20.0), 1.3);

        let mut loud = listening(255.0, vec![255; 512]);
        loud.listening = false;

        for t in [0.0, 0.7, 12.5] {
            let a = particle_transform(&s, 3, t, &FrameAudio::silent(), &motion);
            let b = particle_transform(&s, 3, t, &loud, &motion);
            assert_eq!(a, b);
            let expected_scale = 1.0 + (t * 2.0 + 1.3).sin() * 0.5;
            assert!((a.scale - expected_scale).abs() < 1e-6);
        }
    }

    #[test]
    fn test_step_is_deterministic() {
        let seeds = vec![
            seed(Vec3::new(15.0, 0.0, 0.0), 0.1),
            seed(Vec3::new(0.0, -22.0, 3.0), 2.0),
            seed(Vec3::new(5.0, 5.0, 30.0), 4.0),
        ];
        let motion = MotionParams::default();
        let audio = listening(128.0, vec![10, 200, 90]);

        let mut group = ParticleGroup::new(ShapeTag::Cube, seeds);
        step(&mut group, 3.25, &audio, &motion);
        let first = group.instances().to_vec();

        // A different frame in between must not leak into the next evaluation
        step(&mut group, 9.0, &FrameAudio::silent(), &motion);
        step(&mut group, 3.25, &audio, &motion);

        let a: &[u8] = bytemuck::cast_slice(&first);
        let b: &[u8] = bytemuck::cast_slice(group.instances());
        assert_eq!(a, b);
    }

    #[test]
    fn test_step_writes_composed_matrix() {
        let s = seed(Vec3::new(0.0, 0.0, 25.0), 0.5);
        let motion = MotionParams::default();
        let mut group = ParticleGroup::new(ShapeTag::Tetrahedron, vec![s]);

        step(&mut group, 1.5, &FrameAudio::silent(), &motion);

        let expected = particle_transform(&s, 0, 1.5, &FrameAudio::silent(), &motion);
        let matrix = Mat4::from_cols_array_2d(&group.instances()[0].model);
        let (scale, _, translation) = matrix.to_scale_rotation_translation();

        assert_vec_close(translation, expected.position);
        assert_vec_close(scale, Vec3::splat(expected.scale));
    }

    #[test]
    fn test_step_on_empty_group() {
        let mut group = ParticleGroup::new(ShapeTag::Sphere, Vec::new());
        step(&mut group, 1.0, &FrameAudio::silent(), &MotionParams::default());
        assert!(group.instances().is_empty());
    }

    #[test]
    fn test_transform_matrix_rotation_order() {
        let transform = Transform {
            position: Vec3::ZERO,
            rotation: Vec3::new(std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2, 0.0),
            scale: 1.0,
        };
        let rotated = transform.to_matrix().transform_vector3(Vec3::Z);

        // Rx(90)·Ry(90)·Z = Rx(90)·X = X (the reverse order would give -Y)
        assert_vec_close(rotated, Vec3::X);
    }

    #[test]
    fn test_group_frame() {
        let motion = MotionParams::default();
        assert_eq!(group_frame(0.0, &motion), Mat4::IDENTITY);

        // After 10 s: 0.5 rad about Y, 0.2 rad about Z
        let expected = Mat4::from_rotation_y(0.5) * Mat4::from_rotation_z(0.2);
        assert!(group_frame(10.0, &motion).abs_diff_eq(expected, 1e-5));
    }
}
