//! Compass heading stabilizer.
//!
//! The raw camera yaw jitters from frame to frame even when the user is not
//! moving, so the displayed heading is filtered:
//!
//! 1. raw yaw + north offset becomes a unit vector pushed into a short FIFO;
//! 2. the FIFO mean (re-normalized) is the target heading;
//! 3. if the displayed heading is further than the stillness threshold from the
//!    target it is blended towards it and the stability counter resets;
//! 4. otherwise the counter grows, small blends continue, and once the counter
//!    reaches the hold length the displayed heading freezes.
//!
//! Working on vectors instead of angles keeps the 359° → 0° wrap free of
//! special cases.

use glam::Vec2;
use std::collections::VecDeque;

use crate::config::CompassConfig;

/// Wrap any angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

#[inline]
pub fn angle_to_vector(deg: f32) -> Vec2 {
    let (s, c) = deg.to_radians().sin_cos();
    Vec2::new(c, s)
}

#[inline]
pub fn vector_to_angle(v: Vec2) -> f32 {
    normalize_degrees(v.y.atan2(v.x).to_degrees())
}

/// Unsigned angle between two unit vectors, in degrees.
#[inline]
pub fn angular_distance(a: Vec2, b: Vec2) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}

#[derive(Clone, Debug)]
pub struct CompassStabilizer {
    config: CompassConfig,
    displayed: Option<Vec2>,
    target: Vec2,
    history: VecDeque<Vec2>,
    stable_frames: u32,
    north_offset_deg: f32,
}

impl CompassStabilizer {
    pub fn new(config: CompassConfig) -> Self {
        let cap = config.history_len.max(1);
        Self {
            config,
            displayed: None,
            target: Vec2::X,
            history: VecDeque::with_capacity(cap),
            stable_frames: 0,
            north_offset_deg: 0.0,
        }
    }

    /// Forget all filter state and the north offset.
    pub fn reset(&mut self) {
        self.displayed = None;
        self.target = Vec2::X;
        self.history.clear();
        self.stable_frames = 0;
        self.north_offset_deg = 0.0;
    }

    pub fn north_offset(&self) -> f32 {
        self.north_offset_deg
    }

    pub fn set_north_offset(&mut self, deg: f32) {
        let deg = if deg.is_finite() { deg } else { 0.0 };
        self.north_offset_deg = normalize_degrees(deg);
        // Old samples were taken against the previous offset.
        self.history.clear();
        self.displayed = None;
        self.stable_frames = 0;
    }

    /// Make the direction the camera currently faces read as north. Returns
    /// the new offset so the caller can persist it.
    pub fn capture_north(&mut self, raw_yaw_rad: f32) -> f32 {
        self.set_north_offset(-raw_yaw_rad.to_degrees());
        self.north_offset_deg
    }

    /// Heading that the current raw yaw maps to before any filtering.
    pub fn raw_heading(&self, raw_yaw_rad: f32) -> f32 {
        normalize_degrees(raw_yaw_rad.to_degrees() + self.north_offset_deg)
    }

    /// Feed one frame of raw yaw and return the displayed heading in degrees.
    pub fn sample(&mut self, raw_yaw_rad: f32) -> f32 {
        if !raw_yaw_rad.is_finite() {
            return self.heading();
        }
        let raw = angle_to_vector(self.raw_heading(raw_yaw_rad));
        if self.history.len() >= self.config.history_len.max(1) {
            self.history.pop_front();
        }
        self.history.push_back(raw);
        let mean = self.history.iter().copied().sum::<Vec2>() / self.history.len() as f32;
        // Opposing samples can cancel out; fall back to the newest one.
        self.target = mean.try_normalize().unwrap_or(raw);

        let Some(displayed) = self.displayed else {
            self.displayed = Some(self.target);
            self.stable_frames = 0;
            return self.heading();
        };

        let distance = angular_distance(displayed, self.target);
        let next = if distance > self.config.still_threshold_deg {
            self.stable_frames = 0;
            if self.config.smoothing {
                blend(displayed, self.target, self.config.blend)
            } else {
                self.target
            }
        } else {
            self.stable_frames = self.stable_frames.saturating_add(1);
            if self.stable_frames >= self.config.hold_frames {
                displayed
            } else if self.config.smoothing {
                blend(displayed, self.target, self.config.still_blend)
            } else {
                self.target
            }
        };
        self.displayed = Some(next);
        self.heading()
    }

    /// Displayed heading in degrees, `[0, 360)`.
    pub fn heading(&self) -> f32 {
        self.displayed.map(vector_to_angle).unwrap_or(0.0)
    }

    pub fn stable_frames(&self) -> u32 {
        self.stable_frames
    }

    pub fn is_frozen(&self) -> bool {
        self.displayed.is_some() && self.stable_frames >= self.config.hold_frames
    }
}

fn blend(from: Vec2, to: Vec2, factor: f32) -> Vec2 {
    from.lerp(to, factor.clamp(0.0, 1.0))
        .try_normalize()
        .unwrap_or(to)
}
