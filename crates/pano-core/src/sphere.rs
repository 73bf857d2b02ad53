//! Mapping between equirectangular image space and directions on the sphere.
//!
//! Image space is normalized: `u` runs left to right across the panorama and
//! `v` runs from the nadir (`v = 0`) up to the zenith (`v = 1`). The sphere is
//! centered on the camera with `+Y` up. `u = 0.5` maps to `+X`, and increasing
//! `u` sweeps towards `+Z`, which a viewer standing inside the sphere sees as
//! turning right.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

pub use crate::constants::{HOTSPOT_RADIUS, INDICATOR_RADIUS, SPHERE_RADIUS};

const WORLD_UP: Vec3 = Vec3::Y;

/// Map normalized image coordinates to a unit direction.
///
/// Inputs outside `[0, 1]` still produce a unit vector; they simply wrap
/// around the sphere.
#[inline]
pub fn uv_to_direction(u: f32, v: f32) -> Vec3 {
    let phi = (1.0 - v) * PI;
    let theta = (u - 0.5) * TAU;
    Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
}

/// Inverse of [`uv_to_direction`].
///
/// The input does not need to be normalized. A zero (or non-finite) vector maps
/// to the image center. At the poles `u` is meaningless and comes back as 0.5.
pub fn direction_to_uv(dir: Vec3) -> Vec2 {
    let Some(d) = dir.try_normalize() else {
        return Vec2::splat(0.5);
    };
    let phi = d.y.clamp(-1.0, 1.0).acos();
    let v = 1.0 - phi / PI;
    let horizontal = d.x * d.x + d.z * d.z;
    let u = if horizontal <= f32::EPSILON * f32::EPSILON {
        0.5
    } else {
        let theta = d.z.atan2(d.x);
        (theta / TAU + 0.5).rem_euclid(1.0)
    };
    Vec2::new(u, v)
}

/// Scale a direction of any length onto the sphere of `radius`.
///
/// Returns `None` for zero or non-finite input.
#[inline]
pub fn project_to_sphere(dir: Vec3, radius: f32) -> Option<Vec3> {
    dir.try_normalize().map(|d| d * radius)
}

/// Orthonormal `(right, up)` basis on the tangent plane at `direction`.
///
/// `right = normalize(direction × worldUp)` and `up = normalize(right × direction)`.
/// At the zenith or nadir the cross product vanishes, so an arbitrary
/// perpendicular is used for `right` instead.
pub fn tangent_basis(direction: Vec3) -> (Vec3, Vec3) {
    let dir = direction.try_normalize().unwrap_or(Vec3::X);
    let right = match dir.cross(WORLD_UP).try_normalize() {
        Some(r) => r,
        None => dir.any_orthonormal_vector(),
    };
    let up = right.cross(dir).normalize();
    (right, up)
}
