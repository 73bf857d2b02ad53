//! Panorama records handed to the viewer by the content backend.
//!
//! These arrive already deserialized (the web frontend parses JSON) and are
//! immutable once loaded; navigation replaces the whole descriptor.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ActionTypeError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanoramaDescriptor {
    pub id: String,
    pub image: String,
    /// Degrees, applied both to the compass and as a rotation of the panorama.
    pub north_offset: f32,
    pub hotspots: Vec<HotspotDescriptor>,
    pub indicators: Vec<IndicatorDescriptor>,
}

/// Point in normalized equirectangular image space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UvPoint {
    pub u: f32,
    pub v: f32,
}

impl UvPoint {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotspotDescriptor {
    pub id: String,
    pub points: Vec<UvPoint>,
    pub title: String,
    /// Rich text shown in the info panel; passed through untouched.
    pub body: String,
    pub action: Option<ActionRef>,
}

/// Optional navigation or media reference attached to a hotspot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRef {
    pub action_type: String,
    pub target: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDescriptor {
    pub id: String,
    /// Only the direction matters; the magnitude is normalized away.
    pub position: Vec3,
    #[serde(default)]
    pub title: String,
    /// Kept as the raw string so unknown types still render.
    pub action_type: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub icon_type: String,
}

impl IndicatorDescriptor {
    pub fn action(&self) -> Result<ActionType, ActionTypeError> {
        self.action_type.parse()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Panorama,
    Video,
    Audio,
    Pdf,
    Image,
}

impl ActionType {
    pub const ALL: [ActionType; 5] = [
        ActionType::Panorama,
        ActionType::Video,
        ActionType::Audio,
        ActionType::Pdf,
        ActionType::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Panorama => "panorama",
            ActionType::Video => "video",
            ActionType::Audio => "audio",
            ActionType::Pdf => "pdf",
            ActionType::Image => "image",
        }
    }

    pub fn is_media(self) -> bool {
        !matches!(self, ActionType::Panorama)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ActionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ActionType::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ActionTypeError(trimmed.to_string()))
    }
}
