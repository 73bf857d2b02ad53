//! Polygonal hotspots: an image-space outline lifted onto the sphere as a flat,
//! pulsing, clickable fill.

use glam::{Mat4, Vec2, Vec3};

use crate::animation::{hotspot_appearance, FillAppearance, OpacityPulse};
use crate::backend::MeshHandle;
use crate::config::HotspotStyle;
use crate::descriptor::HotspotDescriptor;
use crate::error::HotspotError;
use crate::mesh::{signed_area2, triangulate_ring, MeshData};
use crate::pick::{ray_triangle, Ray};
use crate::sphere::{tangent_basis, uv_to_direction};

// Polygons whose projected area (world units squared) falls below this are
// treated as collinear.
const DEGENERATE_AREA: f32 = 1e-2;

#[derive(Clone, Debug)]
pub struct Hotspot {
    pub descriptor: HotspotDescriptor,
    /// Center of the local group, on the sphere of the build radius.
    pub anchor: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// Closed outline in tangent-plane coordinates (first point repeated).
    pub outline: Vec<Vec2>,
    /// Triangulated fill in local space (tangent plane at `z = 0`).
    pub mesh: MeshData,
    pub pulse: OpacityPulse,
    pub hovered: bool,
    pub(crate) gpu: Option<MeshHandle>,
}

impl Hotspot {
    /// Local tangent-plane space to panorama space.
    pub fn transform(&self) -> Mat4 {
        let normal = self.right.cross(self.up);
        Mat4::from_cols(
            self.right.extend(0.0),
            self.up.extend(0.0),
            normal.extend(0.0),
            self.anchor.extend(1.0),
        )
    }

    pub fn step(&mut self, dt_sec: f32, style: &HotspotStyle) {
        self.pulse = self.pulse.step(dt_sec, style.pulse_speed, self.hovered);
    }

    pub fn appearance(&self, style: &HotspotStyle) -> FillAppearance {
        hotspot_appearance(&self.pulse, self.hovered, style)
    }

    /// Hit distance of a panorama-space ray against the fill.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let m = self.transform();
        self.mesh
            .triangles()
            .filter_map(|t| {
                let world = [
                    m.transform_point3(t[0]),
                    m.transform_point3(t[1]),
                    m.transform_point3(t[2]),
                ];
                ray_triangle(ray, &world)
            })
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Build the runtime hotspot for `descriptor` on the sphere of `radius`.
pub fn build_hotspot(
    descriptor: &HotspotDescriptor,
    radius: f32,
    style: &HotspotStyle,
) -> Result<Hotspot, HotspotError> {
    let id = || descriptor.id.clone();
    if descriptor.points.len() < 3 {
        return Err(HotspotError::TooFewPoints {
            id: id(),
            count: descriptor.points.len(),
        });
    }
    if let Some(index) = descriptor
        .points
        .iter()
        .position(|p| !p.u.is_finite() || !p.v.is_finite())
    {
        return Err(HotspotError::NonFinite { id: id(), index });
    }

    let cloud: Vec<Vec3> = descriptor
        .points
        .iter()
        .map(|p| uv_to_direction(p.u, p.v) * radius)
        .collect();
    let centroid = cloud.iter().copied().sum::<Vec3>() / cloud.len() as f32;
    let Some(dir) = centroid.try_normalize() else {
        return Err(HotspotError::Degenerate { id: id() });
    };
    let anchor = dir * radius;
    let (right, up) = tangent_basis(dir);

    let mut outline: Vec<Vec2> = cloud
        .iter()
        .map(|p| {
            let d = *p - centroid;
            Vec2::new(d.dot(right), d.dot(up))
        })
        .collect();
    if signed_area2(&outline).abs() * 0.5 < DEGENERATE_AREA {
        return Err(HotspotError::Degenerate { id: id() });
    }
    outline.push(outline[0]);

    let mesh = triangulate_ring(&outline, |p| Vec3::new(p.x, p.y, 0.0))
        .ok_or_else(|| HotspotError::Degenerate { id: id() })?;

    Ok(Hotspot {
        descriptor: descriptor.clone(),
        anchor,
        right,
        up,
        outline,
        mesh,
        pulse: OpacityPulse::new(style.opacity_min, style.opacity_max),
        hovered: false,
        gpu: None,
    })
}
