//! Shape meshes built from geometry descriptors.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::particles::GeometryDescriptor;

/// Vertex data for shape meshes (position + normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle mesh, counter-clockwise winding seen from outside
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn from_descriptor(descriptor: GeometryDescriptor) -> Self {
        match descriptor {
            GeometryDescriptor::Box { size } => box_mesh(size),
            GeometryDescriptor::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere_mesh(radius, width_segments.max(3), height_segments.max(2)),
            GeometryDescriptor::Tetrahedron { radius } => tetrahedron_mesh(radius),
        }
    }
}

fn vertex(position: Vec3, normal: Vec3) -> Vertex {
    Vertex {
        position: position.to_array(),
        normal: normal.to_array(),
    }
}

/// Axis-aligned cube, 4 vertices per face so every face has a flat normal
fn box_mesh(size: f32) -> Mesh {
    let h = size / 2.0;

    // (normal, u, v) with u × v = normal
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = (normal + u * su + v * sv) * h;
            vertices.push(vertex(position, normal));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh { vertices, indices }
}

/// UV sphere; pole rows skip their degenerate triangles
fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..=height_segments {
        let polar = iy as f32 / height_segments as f32 * PI;
        for ix in 0..=width_segments {
            let azimuth = ix as f32 / width_segments as f32 * TAU;
            let normal = Vec3::new(
                -azimuth.cos() * polar.sin(),
                polar.cos(),
                azimuth.sin() * polar.sin(),
            );
            vertices.push(vertex(normal * radius, normal));
        }
    }

    let row = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Mesh { vertices, indices }
}

/// Regular tetrahedron inscribed in a sphere of `radius`, flat shaded
fn tetrahedron_mesh(radius: f32) -> Mesh {
    let corners = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ]
    .map(|c| c.normalize() * radius);

    let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

    let mut vertices = Vec::with_capacity(12);
    for [a, b, c] in faces {
        let (pa, pb, pc) = (corners[a], corners[b], corners[c]);
        let normal = (pb - pa).cross(pc - pa).normalize();
        for p in [pa, pb, pc] {
            vertices.push(vertex(p, normal));
        }
    }
    let indices = (0..vertices.len() as u32).collect();

    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::ShapeTag;

    fn mesh(shape: ShapeTag) -> Mesh {
        Mesh::from_descriptor(shape.geometry())
    }

    /// Every triangle must face away from the (convex, centred) shape's middle
    fn assert_outward_winding(mesh: &Mesh) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a);
            assert!(face_normal.length() > 1e-9, "degenerate triangle {:?}", tri);
            assert!(face_normal.dot(a + b + c) > 0.0, "inward triangle {:?}", tri);
        }
    }

    #[test]
    fn test_box_mesh() {
        let mesh = mesh(ShapeTag::Cube);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for v in &mesh.vertices {
            assert!(v.position.iter().all(|c| (c.abs() - 0.25).abs() < 1e-6));
        }
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_sphere_mesh() {
        let mesh = mesh(ShapeTag::Sphere);
        assert_eq!(mesh.vertices.len(), 17 * 17);
        // 16 columns × (16 rows × 2 - 2 pole rows) triangles
        assert_eq!(mesh.indices.len(), 16 * 30 * 3);
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.position).length() - 0.35).abs() < 1e-5);
        }
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_tetrahedron_mesh() {
        let mesh = mesh(ShapeTag::Tetrahedron);
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.indices.len(), 12);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_normals_are_unit() {
        for shape in ShapeTag::ALL {
            for v in mesh(shape).vertices {
                assert!((Vec3::from_array(v.normal).length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
