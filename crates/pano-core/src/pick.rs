//! Ray casting against the active hotspot and indicator set.

use glam::{Quat, Vec2, Vec3};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    /// Express the ray in a frame rotated by `rotation` relative to this one.
    pub fn into_frame(self, rotation: Quat) -> Self {
        let inv = rotation.inverse();
        Self {
            origin: inv * self.origin,
            dir: inv * self.dir,
        }
    }
}

/// Addressable unit of interaction. Sub-meshes (an indicator's ring, a
/// hotspot's triangles) always resolve to their owning entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Interactable {
    Hotspot(usize),
    Indicator(usize),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub target: Interactable,
    pub distance: f32,
}

/// Resolves a point on the render surface, in normalized device coordinates,
/// to the nearest addressable object among `candidates`.
pub trait HitTest {
    fn hit_test(&self, ndc: Vec2, candidates: &[Interactable]) -> Option<PickHit>;
}

/// Nearest non-negative hit of a ray against a sphere, `None` when the origin
/// lies inside the sphere or the ray misses.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Two-sided Möller–Trumbore ray/triangle test returning the hit distance.
pub fn ray_triangle(ray: &Ray, tri: &[Vec3; 3]) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Keep the closer of two optional hits. Ties keep `current`.
#[inline]
pub fn nearer(current: Option<PickHit>, candidate: Option<PickHit>) -> Option<PickHit> {
    match (current, candidate) {
        (Some(c), Some(n)) if n.distance < c.distance => Some(n),
        (None, n) => n,
        (c, _) => c,
    }
}
