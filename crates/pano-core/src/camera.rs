//! Look-around camera at the center of the panorama sphere.
//!
//! `yaw` is a heading in radians that grows when turning right (0 looks down
//! `-Z`, `+π/2` looks down `+X`). `pitch` grows when looking up.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::config::CameraConfig;
use crate::constants::{Z_FAR, Z_NEAR};
use crate::pick::Ray;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// World-space ray through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, p1 - self.eye)
    }
}

#[derive(Clone, Debug)]
pub struct LookCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub fov_deg: f32,
    pub aspect: f32,
    /// Residual `(yaw, pitch)` rotation per frame after a drag is released.
    pub velocity: Vec2,
    config: CameraConfig,
}

impl LookCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            yaw: config.initial_yaw_deg.to_radians(),
            pitch: 0.0,
            fov_deg: config.fov_deg.clamp(config.fov_min_deg, config.fov_max_deg),
            aspect: 1.0,
            velocity: Vec2::ZERO,
            config,
        }
    }

    pub fn reset(&mut self) {
        *self = Self {
            aspect: self.aspect,
            ..Self::new(self.config.clone())
        };
    }

    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * sy, sp, -cp * cy)
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: Vec3::ZERO,
            target: self.forward(),
            up: Vec3::Y,
            aspect: self.aspect.max(1e-3),
            fovy_radians: self.fov_deg.to_radians(),
            znear: Z_NEAR,
            zfar: Z_FAR,
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let cam = self.camera();
        cam.projection_matrix() * cam.view_matrix()
    }

    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        self.camera().ray_from_ndc(ndc)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Rotate by `(dyaw, dpitch)` radians, keeping pitch inside the limit.
    pub fn rotate(&mut self, delta: Vec2) {
        let limit = self.config.pitch_limit_deg.to_radians();
        self.yaw = (self.yaw + delta.x).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta.y).clamp(-limit, limit);
    }

    /// Drag-to-rotate: the panorama follows the pointer, and the angular rate
    /// narrows with the field of view so zoomed-in drags stay precise.
    pub fn drag_delta(&self, pixels: Vec2, degrees_per_px: f32) -> Vec2 {
        let zoom = self.fov_deg / self.config.fov_deg.max(1.0);
        Vec2::new(-pixels.x, pixels.y) * (degrees_per_px * zoom).to_radians()
    }

    pub fn key_step(&self) -> f32 {
        self.config.key_step_deg.to_radians()
    }

    pub fn zoom(&mut self, delta_deg: f32) {
        self.fov_deg =
            (self.fov_deg + delta_deg).clamp(self.config.fov_min_deg, self.config.fov_max_deg);
    }

    /// Apply one frame of inertia. Returns whether the camera is still coasting.
    pub fn step_inertia(&mut self, decay: f32, min_velocity: f32) -> bool {
        if self.velocity == Vec2::ZERO {
            return false;
        }
        self.rotate(self.velocity);
        self.velocity *= decay;
        if self.velocity.length() < min_velocity {
            self.velocity = Vec2::ZERO;
            return false;
        }
        true
    }
}
