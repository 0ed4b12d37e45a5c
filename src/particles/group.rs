//! Particle groups: a seed table plus its flat instance buffer.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::seed::ParticleSeed;
use super::ShapeTag;

/// Per-instance model matrix (column-major), uploaded to the GPU as-is
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl InstanceRaw {
    pub fn from_matrix(matrix: &Mat4) -> Self {
        Self {
            model: matrix.to_cols_array_2d(),
        }
    }
}

impl Default for InstanceRaw {
    fn default() -> Self {
        Self::from_matrix(&Mat4::IDENTITY)
    }
}

/// Fixed-size group of particles sharing one shape (one draw call)
#[derive(Debug, Clone)]
pub struct ParticleGroup {
    shape: ShapeTag,
    seeds: Vec<ParticleSeed>,
    /// Overwritten in place every frame, never resized
    instances: Vec<InstanceRaw>,
}

impl ParticleGroup {
    pub fn new(shape: ShapeTag, seeds: Vec<ParticleSeed>) -> Self {
        let instances = vec![InstanceRaw::default(); seeds.len()];
        Self {
            shape,
            seeds,
            instances,
        }
    }

    pub fn shape(&self) -> ShapeTag {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn seeds(&self) -> &[ParticleSeed] {
        &self.seeds
    }

    /// Current instance buffer (valid after the first step)
    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    /// Static per-instance colors, uploaded once
    pub fn colors(&self) -> Vec<[f32; 3]> {
        self.seeds.iter().map(|seed| seed.color).collect()
    }

    /// Seeds and instance slots together, for the transform engine
    pub(super) fn split_mut(&mut self) -> (&[ParticleSeed], &mut [InstanceRaw]) {
        (&self.seeds, &mut self.instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn seed(x: f32) -> ParticleSeed {
        ParticleSeed {
            origin: Vec3::new(x, 0.0, 0.0),
            phase: 0.0,
            color: [1.0, 0.2, 0.2],
        }
    }

    #[test]
    fn test_group_sizes_match_seeds() {
        let group = ParticleGroup::new(ShapeTag::Sphere, vec![seed(20.0), seed(30.0)]);
        assert_eq!(group.len(), 2);
        assert_eq!(group.instances().len(), 2);
        assert_eq!(group.colors(), vec![[1.0, 0.2, 0.2]; 2]);
        assert_eq!(group.shape(), ShapeTag::Sphere);
    }

    #[test]
    fn test_empty_group() {
        let group = ParticleGroup::new(ShapeTag::Cube, Vec::new());
        assert!(group.is_empty());
        assert!(group.instances().is_empty());
        assert!(group.colors().is_empty());
    }

    #[test]
    fn test_instance_layout() {
        // 16 floats, tightly packed for the vertex buffer
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 64);
        assert_eq!(InstanceRaw::default().model[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
