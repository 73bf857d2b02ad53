//! Point indicators: a camera-facing marker made of a glow disc, a spinning
//! ring, an icon and a center dot, colored by the action it triggers.

use glam::{Mat4, Quat, Vec3};

use crate::animation::IndicatorPulse;
use crate::backend::{MeshHandle, TextureHandle};
use crate::config::IndicatorStyle;
use crate::constants::*;
use crate::descriptor::{ActionType, IndicatorDescriptor};
use crate::error::IndicatorError;
use crate::pick::{ray_sphere, Ray};
use crate::sphere::project_to_sphere;

/// Axis the flat part meshes face before billboarding.
const REFERENCE_AXIS: Vec3 = Vec3::Z;

/// Fixed palette keyed by action type; `None` is the default green.
pub fn action_color(action: Option<ActionType>) -> [f32; 3] {
    match action {
        Some(ActionType::Panorama) => COLOR_PANORAMA,
        Some(ActionType::Video) => COLOR_VIDEO,
        Some(ActionType::Audio) => COLOR_AUDIO,
        Some(ActionType::Pdf) => COLOR_PDF,
        Some(ActionType::Image) => COLOR_IMAGE,
        None => COLOR_DEFAULT,
    }
}

/// Glyph drawn when no icon asset is available.
pub fn fallback_glyph(action: Option<ActionType>) -> char {
    match action {
        Some(ActionType::Panorama) => '➤',
        Some(ActionType::Video) => '▶',
        Some(ActionType::Audio) => '♪',
        Some(ActionType::Pdf) => '≡',
        Some(ActionType::Image) => '▣',
        None => '•',
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IconSpec {
    pub asset: Option<String>,
    pub glyph: char,
    pub color: [f32; 3],
}

impl IconSpec {
    pub fn for_indicator(
        descriptor: &IndicatorDescriptor,
        action: Option<ActionType>,
        style: &IndicatorStyle,
    ) -> Self {
        let icon = descriptor.icon_type.trim();
        let asset = match (&style.icon_base, icon.is_empty()) {
            (Some(base), false) => Some(format!("{}/{}.png", base.trim_end_matches('/'), icon)),
            _ => None,
        };
        Self {
            asset,
            glyph: fallback_glyph(action),
            color: action_color(action),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorPart {
    Glow,
    Ring,
    Icon,
    Dot,
}

impl IndicatorPart {
    /// Back-to-front draw order.
    pub const ALL: [IndicatorPart; 4] = [
        IndicatorPart::Glow,
        IndicatorPart::Ring,
        IndicatorPart::Icon,
        IndicatorPart::Dot,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct IndicatorGpu {
    pub(crate) glow: Option<MeshHandle>,
    pub(crate) ring: Option<MeshHandle>,
    pub(crate) icon: Option<MeshHandle>,
    pub(crate) dot: Option<MeshHandle>,
    pub(crate) icon_texture: Option<TextureHandle>,
}

impl IndicatorGpu {
    pub(crate) fn mesh(&self, part: IndicatorPart) -> Option<MeshHandle> {
        match part {
            IndicatorPart::Glow => self.glow,
            IndicatorPart::Ring => self.ring,
            IndicatorPart::Icon => self.icon,
            IndicatorPart::Dot => self.dot,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Indicator {
    pub descriptor: IndicatorDescriptor,
    /// `None` when the descriptor names an unknown action; such indicators
    /// render and hover but ignore clicks.
    pub action: Option<ActionType>,
    pub anchor: Vec3,
    pub color: [f32; 3],
    pub icon: IconSpec,
    pub orientation: Quat,
    pub pulse: IndicatorPulse,
    pub hovered: bool,
    pub(crate) gpu: IndicatorGpu,
}

impl Indicator {
    /// Billboard towards `camera_pos` using the shortest rotation from the
    /// reference axis.
    pub fn update_orientation(&mut self, camera_pos: Vec3) {
        if let Some(to_camera) = (camera_pos - self.anchor).try_normalize() {
            self.orientation = Quat::from_rotation_arc(REFERENCE_AXIS, to_camera);
        }
    }

    pub fn update(&mut self, dt_sec: f32, style: &IndicatorStyle) {
        self.pulse = self.pulse.step(dt_sec, self.hovered, style);
    }

    pub fn scale(&self, style: &IndicatorStyle) -> f32 {
        self.pulse.scale(self.hovered, style)
    }

    /// Local part space to panorama space.
    pub fn part_transform(&self, part: IndicatorPart, style: &IndicatorStyle) -> Mat4 {
        let scale = match part {
            IndicatorPart::Dot => 1.0,
            _ => self.scale(style),
        };
        let spin = match part {
            IndicatorPart::Ring => Quat::from_rotation_z(self.pulse.ring_angle),
            _ => Quat::IDENTITY,
        };
        Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            self.orientation * spin,
            self.anchor,
        )
    }

    pub fn part_color(&self, part: IndicatorPart) -> [f32; 4] {
        let [r, g, b] = self.color;
        match part {
            IndicatorPart::Glow => [r, g, b, self.pulse.glow_opacity(self.hovered)],
            IndicatorPart::Ring => [r, g, b, self.pulse.ring_opacity(self.hovered)],
            IndicatorPart::Icon => [1.0, 1.0, 1.0, 1.0],
            IndicatorPart::Dot => [1.0, 1.0, 1.0, 0.9],
        }
    }

    /// Hit distance of a panorama-space ray against the glow disc, the largest
    /// part; every part resolves to this indicator.
    pub fn intersect(&self, ray: &Ray, style: &IndicatorStyle) -> Option<f32> {
        ray_sphere(
            ray.origin,
            ray.dir,
            self.anchor,
            INDICATOR_GLOW_RADIUS * self.scale(style),
        )
    }

    pub fn tooltip(&self) -> &str {
        if self.descriptor.title.is_empty() {
            self.action.map(ActionType::as_str).unwrap_or_default()
        } else {
            &self.descriptor.title
        }
    }
}

/// Build the runtime indicator on the sphere of `radius`.
pub fn build_indicator(
    descriptor: &IndicatorDescriptor,
    radius: f32,
    style: &IndicatorStyle,
) -> Result<Indicator, IndicatorError> {
    let anchor = project_to_sphere(descriptor.position, radius).ok_or_else(|| {
        IndicatorError::NoDirection {
            id: descriptor.id.clone(),
        }
    })?;
    let action = match descriptor.action() {
        Ok(a) => Some(a),
        Err(e) => {
            log::warn!("[indicator] {}: {}; clicks are ignored", descriptor.id, e);
            None
        }
    };
    let mut indicator = Indicator {
        descriptor: descriptor.clone(),
        action,
        anchor,
        color: action_color(action),
        icon: IconSpec::for_indicator(descriptor, action, style),
        orientation: Quat::IDENTITY,
        pulse: IndicatorPulse::default(),
        hovered: false,
        gpu: IndicatorGpu::default(),
    };
    indicator.update_orientation(Vec3::ZERO);
    Ok(indicator)
}
