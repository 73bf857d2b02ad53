//! CPU-side geometry for the panorama sphere, hotspot fills and indicator parts.
//!
//! Meshes are plain indexed triangle lists in their owner's local space. The
//! renderer uploads them once; picking walks the same triangles.

use earcutr::earcut;
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

use crate::sphere::uv_to_direction;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|t| {
            Some([
                *self.positions.get(t[0] as usize)?,
                *self.positions.get(t[1] as usize)?,
                *self.positions.get(t[2] as usize)?,
            ])
        })
    }
}

/// Sphere whose vertices come from [`uv_to_direction`], so the equirectangular
/// texture lines up exactly with hotspots built from the same mapping.
///
/// Triangles are wound to face the center: the panorama is seen from inside.
pub fn inward_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            mesh.positions.push(uv_to_direction(u, v) * radius);
            // Texture rows run top-down while `v` runs bottom-up.
            mesh.uvs.push(Vec2::new(u, 1.0 - v));
        }
    }
    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            // The pole rows collapse to a point, so skip their zero-area halves.
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, c]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, d, c]);
            }
        }
    }
    mesh
}

/// Flat disc in the local XY plane facing `+Z`.
pub fn disc(radius: f32, segments: u32) -> MeshData {
    let segs = segments.max(3);
    let mut mesh = MeshData::default();
    mesh.positions.push(Vec3::ZERO);
    mesh.uvs.push(Vec2::splat(0.5));
    for i in 0..segs {
        let a = i as f32 / segs as f32 * TAU;
        let (s, c) = a.sin_cos();
        mesh.positions.push(Vec3::new(c * radius, s * radius, 0.0));
        mesh.uvs.push(Vec2::new(0.5 + 0.5 * c, 0.5 - 0.5 * s));
    }
    for i in 0..segs {
        let next = (i + 1) % segs;
        mesh.indices.extend_from_slice(&[0, i + 1, next + 1]);
    }
    mesh
}

/// Flat annulus in the local XY plane facing `+Z`.
pub fn ring(inner: f32, outer: f32, segments: u32) -> MeshData {
    let segs = segments.max(3);
    let mut mesh = MeshData::default();
    for i in 0..segs {
        let a = i as f32 / segs as f32 * TAU;
        let (s, c) = a.sin_cos();
        mesh.positions.push(Vec3::new(c * inner, s * inner, 0.0));
        mesh.positions.push(Vec3::new(c * outer, s * outer, 0.0));
        let ru = inner / outer * 0.5;
        mesh.uvs.push(Vec2::new(0.5 + ru * c, 0.5 - ru * s));
        mesh.uvs.push(Vec2::new(0.5 + 0.5 * c, 0.5 - 0.5 * s));
    }
    for i in 0..segs {
        let i0 = i * 2;
        let o0 = i0 + 1;
        let i1 = ((i + 1) % segs) * 2;
        let o1 = i1 + 1;
        mesh.indices.extend_from_slice(&[i0, o0, o1, i0, o1, i1]);
    }
    mesh
}

/// Square facing `+Z`, centered on the origin, with full `[0, 1]` UVs.
pub fn quad(size: f32) -> MeshData {
    let h = size * 0.5;
    MeshData {
        positions: vec![
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, h, 0.0),
        ],
        uvs: vec![
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Triangulate a simple polygon given as a closed 2D ring (the first point
/// repeated at the end) and lift it into 3D with `lift`.
///
/// Returns `None` when the ring has fewer than three distinct points or the
/// triangulation covers no area.
pub fn triangulate_ring(ring: &[Vec2], lift: impl Fn(Vec2) -> Vec3) -> Option<MeshData> {
    let mut open = ring;
    if open.len() > 1 && open.first() == open.last() {
        open = &open[..open.len() - 1];
    }
    if open.len() < 3 {
        return None;
    }
    let coords: Vec<f64> = open
        .iter()
        .flat_map(|p| [p.x as f64, p.y as f64])
        .collect();
    let indices = earcut(&coords, &[], 2).ok()?;
    if indices.len() < 3 {
        return None;
    }
    Some(MeshData {
        positions: open.iter().map(|p| lift(*p)).collect(),
        uvs: open.to_vec(),
        indices: indices.into_iter().map(|i| i as u32).collect(),
    })
}

/// Twice the signed area of a 2D ring (open or closed).
pub fn signed_area2(ring: &[Vec2]) -> f32 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}
