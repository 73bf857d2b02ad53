//! Per-viewer tuning. Every field has a default from `constants.rs`, and the
//! embedding page may override any subset by passing a partial JSON object.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub gesture: GestureConfig,
    pub compass: CompassConfig,
    pub hotspot: HotspotStyle,
    pub indicator: IndicatorStyle,
    pub camera: CameraConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub tap_slop_px: f32,
    pub tap_max_ms: f64,
    pub drag_degrees_per_px: f32,
    pub inertia: bool,
    pub inertia_decay: f32,
    pub inertia_min_velocity: f32,
    pub tooltip_hide_delay_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop_px: TAP_SLOP_PX,
            tap_max_ms: TAP_MAX_MS,
            drag_degrees_per_px: DRAG_DEGREES_PER_PX,
            inertia: true,
            inertia_decay: INERTIA_DECAY,
            inertia_min_velocity: INERTIA_MIN_VELOCITY,
            tooltip_hide_delay_ms: TOOLTIP_HIDE_DELAY_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    pub history_len: usize,
    pub still_threshold_deg: f32,
    pub blend: f32,
    pub still_blend: f32,
    pub hold_frames: u32,
    pub smoothing: bool,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            history_len: COMPASS_HISTORY_LEN,
            still_threshold_deg: COMPASS_STILL_THRESHOLD_DEG,
            blend: COMPASS_BLEND,
            still_blend: COMPASS_STILL_BLEND,
            hold_frames: COMPASS_HOLD_FRAMES,
            smoothing: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotspotStyle {
    pub idle_color: [f32; 3],
    pub hover_color: [f32; 3],
    pub opacity_min: f32,
    pub opacity_max: f32,
    pub opacity_hover: f32,
    /// Opacity units per second.
    pub pulse_speed: f32,
}

impl Default for HotspotStyle {
    fn default() -> Self {
        Self {
            idle_color: HOTSPOT_IDLE_COLOR,
            hover_color: HOTSPOT_HOVER_COLOR,
            opacity_min: HOTSPOT_OPACITY_MIN,
            opacity_max: HOTSPOT_OPACITY_MAX,
            opacity_hover: HOTSPOT_OPACITY_HOVER,
            pulse_speed: HOTSPOT_PULSE_SPEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorStyle {
    pub pulse_rate: f32,
    pub hover_pulse_rate: f32,
    pub pulse_amplitude: f32,
    pub hover_scale: f32,
    pub ring_spin: f32,
    /// Base URI for icon assets; `None` always uses the generated glyph.
    pub icon_base: Option<String>,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            pulse_rate: INDICATOR_PULSE_RATE,
            hover_pulse_rate: INDICATOR_HOVER_PULSE_RATE,
            pulse_amplitude: INDICATOR_PULSE_AMPLITUDE,
            hover_scale: INDICATOR_HOVER_SCALE,
            ring_spin: INDICATOR_RING_SPIN,
            icon_base: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub fov_min_deg: f32,
    pub fov_max_deg: f32,
    pub pitch_limit_deg: f32,
    /// Heading the camera faces after every load, in degrees.
    pub initial_yaw_deg: f32,
    pub key_step_deg: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: FOV_DEFAULT_DEG,
            fov_min_deg: FOV_MIN_DEG,
            fov_max_deg: FOV_MAX_DEG,
            pitch_limit_deg: PITCH_LIMIT_DEG,
            initial_yaw_deg: INITIAL_YAW_DEG,
            key_step_deg: KEY_ROTATE_STEP_DEG,
        }
    }
}
