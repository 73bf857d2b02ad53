// Host-side tests for the equirectangular <-> sphere mapping and the meshes
// built on it.

use glam::{Vec2, Vec3};
use pano_core::mesh::{inward_sphere, triangulate_ring};
use pano_core::sphere::{
    direction_to_uv, project_to_sphere, tangent_basis, uv_to_direction, SPHERE_RADIUS,
};

#[test]
fn uv_direction_round_trip_away_from_poles() {
    for iu in 0..20 {
        for iv in 1..20 {
            let uv = Vec2::new(iu as f32 / 20.0, iv as f32 / 20.0);
            let back = direction_to_uv(uv_to_direction(uv.x, uv.y));
            let du = (back.x - uv.x).abs();
            let du = du.min(1.0 - du); // u wraps
            assert!(du < 1e-4, "u mismatch at {uv:?}: {back:?}");
            assert!((back.y - uv.y).abs() < 1e-4, "v mismatch at {uv:?}: {back:?}");
        }
    }
}

#[test]
fn directions_are_unit_length() {
    for (u, v) in [(0.0, 0.0), (0.25, 0.3), (0.9, 1.0), (1.7, -0.2)] {
        let d = uv_to_direction(u, v);
        assert!((d.length() - 1.0).abs() < 1e-5, "{u},{v} -> {d:?}");
    }
}

#[test]
fn v_runs_from_nadir_to_zenith() {
    assert!((uv_to_direction(0.3, 1.0) - Vec3::Y).length() < 1e-5);
    assert!((uv_to_direction(0.3, 0.0) + Vec3::Y).length() < 1e-5);
    // Quarter turn right of the center is +Z.
    assert!((uv_to_direction(0.75, 0.5) - Vec3::Z).length() < 1e-5);
}

#[test]
fn poles_map_to_center_column() {
    let top = direction_to_uv(Vec3::Y * 3.0);
    assert_eq!(top.x, 0.5);
    assert!((top.y - 1.0).abs() < 1e-6);
    let bottom = direction_to_uv(-Vec3::Y);
    assert_eq!(bottom.x, 0.5);
    assert!(bottom.y.abs() < 1e-6);
}

#[test]
fn zero_direction_is_rejected_or_centered() {
    assert_eq!(project_to_sphere(Vec3::ZERO, 10.0), None);
    assert_eq!(project_to_sphere(Vec3::splat(f32::NAN), 10.0), None);
    assert_eq!(direction_to_uv(Vec3::ZERO), Vec2::splat(0.5));
    let p = project_to_sphere(Vec3::new(0.0, 3.0, 4.0), 10.0).unwrap();
    assert!((p - Vec3::new(0.0, 6.0, 8.0)).length() < 1e-4);
}

#[test]
fn tangent_basis_is_orthonormal_on_the_equator() {
    let dir = uv_to_direction(0.6, 0.5);
    let (right, up) = tangent_basis(dir);
    assert!(right.dot(dir).abs() < 1e-5);
    assert!(up.dot(dir).abs() < 1e-5);
    assert!(right.dot(up).abs() < 1e-5);
    assert!(up.y > 0.99, "up should follow world up on the equator");
}

#[test]
fn sphere_triangles_face_the_center() {
    let mesh = inward_sphere(SPHERE_RADIUS, 24, 12);
    assert!(mesh.triangle_count() > 0);
    for [a, b, c] in mesh.triangles() {
        let normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(normal.dot(centroid) < 0.0, "outward triangle at {centroid:?}");
    }
}

#[test]
fn sphere_vertices_follow_the_uv_mapping() {
    let mesh = inward_sphere(2.0, 8, 4);
    for (p, uv) in mesh.positions.iter().zip(&mesh.uvs) {
        // Texture v is flipped relative to sphere v.
        let expected = uv_to_direction(uv.x, 1.0 - uv.y) * 2.0;
        assert!((*p - expected).length() < 1e-4);
    }
}

#[test]
fn ring_triangulation_rejects_too_few_points() {
    let line = [Vec2::ZERO, Vec2::X, Vec2::ZERO];
    assert!(triangulate_ring(&line, |p| p.extend(0.0)).is_none());
    let square = [
        Vec2::ZERO,
        Vec2::X,
        Vec2::ONE,
        Vec2::Y,
        Vec2::ZERO,
    ];
    let mesh = triangulate_ring(&square, |p| p.extend(0.0)).unwrap();
    assert_eq!(mesh.positions.len(), 4);
    assert_eq!(mesh.triangle_count(), 2);
}
