//! Outbound notifications. The viewer queues these; the host drains them after
//! each input or frame call and applies them to the page.

use serde::Serialize;

use crate::descriptor::{ActionType, HotspotDescriptor, IndicatorDescriptor};
use crate::viewer::LoadRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    Grab,
    Grabbing,
    Pointer,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
            Cursor::Pointer => "pointer",
        }
    }
}

/// How a media surface should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaLayout {
    /// Large modal centered over the viewer (video, pdf, image).
    Centered,
    /// Compact modal pinned to a corner (audio).
    Corner,
}

impl MediaLayout {
    pub fn for_action(action: ActionType) -> Self {
        match action {
            ActionType::Audio => MediaLayout::Corner,
            _ => MediaLayout::Centered,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorAction {
    Navigate {
        panorama_id: String,
    },
    OpenMedia {
        action: ActionType,
        uri: String,
        layout: MediaLayout,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerEvent {
    ShowLoading,
    HideLoading,
    ShowError {
        message: String,
    },
    ClearError,
    Cursor {
        cursor: Cursor,
    },
    ShowTooltip {
        text: String,
        x: f32,
        y: f32,
    },
    HideTooltip,
    /// Ask the info panel to show a hotspot's title and body.
    HotspotActivated {
        hotspot: HotspotDescriptor,
    },
    IndicatorActivated {
        indicator: IndicatorDescriptor,
        action: IndicatorAction,
    },
    /// The viewer started an in-place navigation; the host should fetch it.
    LoadRequested {
        request: LoadRequest,
    },
    /// Shareable location should now point at this panorama.
    LocationChanged {
        panorama_id: String,
    },
    NorthOffsetCaptured {
        panorama_id: String,
        degrees: f32,
    },
}
