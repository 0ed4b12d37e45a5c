//! High-level particle scene: the shape table turned into live groups.

use glam::Mat4;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::engine::{group_frame, step};
use super::group::ParticleGroup;
use super::seed::generate;
use crate::audio::FrameAudio;
use crate::error::ConfigError;
use crate::params::{MotionParams, SceneConfig};

/// All particle groups plus the motion mapping driving them
pub struct ParticleScene {
    groups: Vec<ParticleGroup>,
    motion: MotionParams,
}

impl ParticleScene {
    /// Validate the configuration and generate every group's seed table
    pub fn new(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let groups = config
            .groups
            .iter()
            .map(|spec| {
                let seeds = generate(spec.count, &mut rng, &config.shell, &config.palette);
                ParticleGroup::new(spec.shape, seeds)
            })
            .collect();

        info!(
            groups = config.groups.len(),
            particles = config.total_particles(),
            seed = ?config.seed,
            "Particle scene created"
        );

        Ok(Self {
            groups,
            motion: config.motion.clone(),
        })
    }

    /// Recompute every group's instance buffer for this frame
    pub fn update(&mut self, elapsed_s: f32, audio: &FrameAudio) {
        for group in &mut self.groups {
            step(group, elapsed_s, audio, &self.motion);
        }
    }

    /// Parent transform shared by all groups at `elapsed_s`
    pub fn group_frame(&self, elapsed_s: f32) -> Mat4 {
        group_frame(elapsed_s, &self.motion)
    }

    pub fn groups(&self) -> &[ParticleGroup] {
        &self.groups
    }

    pub fn particle_count(&self) -> usize {
        self.groups.iter().map(ParticleGroup::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::BandEnergies;
    use crate::params::GroupSpec;
    use crate::particles::{InstanceRaw, ShapeTag};

    fn seeded_config() -> SceneConfig {
        SceneConfig {
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_scene_groups() {
        let scene = ParticleScene::new(&seeded_config()).unwrap();

        let shapes: Vec<_> = scene.groups().iter().map(|g| (g.shape(), g.len())).collect();
        assert_eq!(
            shapes,
            vec![
                (ShapeTag::Cube, 800),
                (ShapeTag::Sphere, 600),
                (ShapeTag::Tetrahedron, 600),
            ]
        );
        assert_eq!(scene.particle_count(), 2000);
    }

    #[test]
    fn test_seeded_scene_is_reproducible() {
        let a = ParticleScene::new(&seeded_config()).unwrap();
        let b = ParticleScene::new(&seeded_config()).unwrap();
        for (ga, gb) in a.groups().iter().zip(b.groups()) {
            assert_eq!(ga.seeds(), gb.seeds());
        }
    }

    #[test]
    fn test_groups_get_distinct_seeds() {
        let scene = ParticleScene::new(&seeded_config()).unwrap();
        let groups = scene.groups();
        assert_ne!(groups[0].seeds()[0], groups[1].seeds()[0]);
    }

    #[test]
    fn test_update_fills_every_group() {
        let mut scene = ParticleScene::new(&seeded_config()).unwrap();
        scene.update(1.0, &FrameAudio::silent());

        for group in scene.groups() {
            assert!(group
                .instances()
                .iter()
                .all(|instance| *instance != InstanceRaw::default()));
        }
    }

    #[test]
    fn test_stop_mid_session_uses_idle_formulas() {
        let mut scene = ParticleScene::new(&seeded_config()).unwrap();
        let loud = FrameAudio {
            listening: true,
            bands: BandEnergies {
                average: 200.0,
                low: 255.0,
                mid: 200.0,
                high: 150.0,
            },
            spectrum: vec![255; 512],
        };

        scene.update(2.0, &loud);
        let during = scene.groups()[0].instances().to_vec();

        scene.update(2.0, &FrameAudio::silent());
        let after = scene.groups()[0].instances().to_vec();

        let mut idle = ParticleScene::new(&seeded_config()).unwrap();
        idle.update(2.0, &FrameAudio::silent());

        assert_ne!(during, after);
        assert_eq!(after, idle.groups()[0].instances());
    }

    #[test]
    fn test_empty_group_in_scene() {
        let config = SceneConfig {
            groups: vec![
                GroupSpec {
                    shape: ShapeTag::Cube,
                    count: 0,
                },
                GroupSpec {
                    shape: ShapeTag::Sphere,
                    count: 10,
                },
            ],
            seed: Some(1),
            ..Default::default()
        };
        let mut scene = ParticleScene::new(&config).unwrap();
        scene.update(0.5, &FrameAudio::silent());

        assert!(scene.groups()[0].instances().is_empty());
        assert_eq!(scene.groups()[1].instances().len(), 10);
    }

    #[test]
    fn test_invalid_scene_rejected() {
        let config = SceneConfig {
            groups: Vec::new(),
            ..Default::default()
        };
        assert!(ParticleScene::new(&config).is_err());
    }
}
