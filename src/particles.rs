//! Audio-reactive particle cloud: seed tables, per-frame transforms and
//! the flat instance buffers handed to the renderer.

mod engine;
mod group;
mod scene;
mod seed;

pub use engine::{group_frame, particle_transform, step, Transform};
pub use group::{InstanceRaw, ParticleGroup};
pub use scene::ParticleScene;
pub use seed::{generate, hsl_to_rgb, ParticleSeed};

/// Shape drawn for every particle of a group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    Cube,
    Sphere,
    Tetrahedron,
}

/// Mesh parameters the renderer builds a shape from (world units)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryDescriptor {
    Box { size: f32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
    Tetrahedron { radius: f32 },
}

/// Edge length of the base cube; the other shapes are sized relative to it
const BASE_SIZE: f32 = 0.5;

impl ShapeTag {
    pub const ALL: [ShapeTag; 3] = [Self::Cube, Self::Sphere, Self::Tetrahedron];

    /// Geometry the renderer binds for this shape
    pub fn geometry(self) -> GeometryDescriptor {
        match self {
            Self::Cube => GeometryDescriptor::Box { size: BASE_SIZE },
            Self::Sphere => GeometryDescriptor::Sphere {
                radius: BASE_SIZE * 0.7,
                width_segments: 16,
                height_segments: 16,
            },
            Self::Tetrahedron => GeometryDescriptor::Tetrahedron { radius: BASE_SIZE },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::Tetrahedron => "tetrahedron",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_geometry_table() {
        assert_eq!(
            ShapeTag::Cube.geometry(),
            GeometryDescriptor::Box { size: 0.5 }
        );
        match ShapeTag::Sphere.geometry() {
            GeometryDescriptor::Sphere {
                radius,
                width_segments,
                height_segments,
            } => {
                assert!((radius - 0.35).abs() < 1e-6);
                assert_eq!((width_segments, height_segments), (16, 16));
            }
            other => panic!("unexpected sphere geometry {:?}", other),
        }
        assert_eq!(
            ShapeTag::Tetrahedron.geometry(),
            GeometryDescriptor::Tetrahedron { radius: 0.5 }
        );
    }
}
