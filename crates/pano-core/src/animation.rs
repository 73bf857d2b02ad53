//! Per-object animation state, advanced by pure step functions each tick.
//!
//! Render objects only read these values; nothing here touches the renderer.

use std::f32::consts::TAU;

use crate::config::{HotspotStyle, IndicatorStyle};
use crate::constants::{INDICATOR_GLOW_OPACITY, INDICATOR_GLOW_OPACITY_SWING};

/// Opacity bouncing between `min` and `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityPulse {
    pub opacity: f32,
    /// `+1.0` while brightening, `-1.0` while fading.
    pub direction: f32,
    pub min: f32,
    pub max: f32,
}

impl OpacityPulse {
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            opacity: min,
            direction: 1.0,
            min,
            max,
        }
    }

    /// Advance by `dt_sec` at `speed` opacity units per second. Frozen while
    /// hovered so the pulse resumes where it left off.
    pub fn step(self, dt_sec: f32, speed: f32, hovered: bool) -> Self {
        if hovered || self.max <= self.min {
            return self;
        }
        let mut opacity = self.opacity + self.direction * speed * dt_sec.max(0.0);
        let mut direction = self.direction;
        // A long frame can overshoot more than a full span; fold until inside.
        for _ in 0..4 {
            if opacity > self.max {
                opacity = self.max - (opacity - self.max);
                direction = -1.0;
            } else if opacity < self.min {
                opacity = self.min + (self.min - opacity);
                direction = 1.0;
            } else {
                break;
            }
        }
        Self {
            opacity: opacity.clamp(self.min, self.max),
            direction,
            ..self
        }
    }
}

/// Color and opacity a hotspot fill should be drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillAppearance {
    pub color: [f32; 3],
    pub opacity: f32,
}

pub fn hotspot_appearance(
    pulse: &OpacityPulse,
    hovered: bool,
    style: &HotspotStyle,
) -> FillAppearance {
    if hovered {
        FillAppearance {
            color: style.hover_color,
            opacity: style.opacity_hover,
        }
    } else {
        FillAppearance {
            color: style.idle_color,
            opacity: pulse.opacity,
        }
    }
}

/// Phase-driven indicator pulse plus the ring's continuous spin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IndicatorPulse {
    pub phase: f32,
    pub ring_angle: f32,
}

impl IndicatorPulse {
    pub fn step(self, dt_sec: f32, hovered: bool, style: &IndicatorStyle) -> Self {
        let dt = dt_sec.max(0.0);
        let rate = if hovered {
            style.hover_pulse_rate
        } else {
            style.pulse_rate
        };
        Self {
            phase: (self.phase + rate * dt).rem_euclid(TAU),
            ring_angle: (self.ring_angle + style.ring_spin * dt).rem_euclid(TAU),
        }
    }

    pub fn scale(&self, hovered: bool, style: &IndicatorStyle) -> f32 {
        let base = if hovered { style.hover_scale } else { 1.0 };
        base * (1.0 + style.pulse_amplitude * self.phase.sin())
    }

    pub fn glow_opacity(&self, hovered: bool) -> f32 {
        let swing = INDICATOR_GLOW_OPACITY_SWING * self.phase.sin();
        let base = if hovered {
            INDICATOR_GLOW_OPACITY * 1.5
        } else {
            INDICATOR_GLOW_OPACITY
        };
        (base + swing).clamp(0.0, 1.0)
    }

    pub fn ring_opacity(&self, hovered: bool) -> f32 {
        if hovered {
            1.0
        } else {
            0.75 + 0.2 * self.phase.cos()
        }
    }
}
