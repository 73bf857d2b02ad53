//! Panorama interaction engine.
//!
//! Platform-free: spherical mapping, hotspot and indicator construction,
//! picking, pointer disambiguation, the compass filter and the viewer
//! lifecycle. Rendering goes through [`backend::SceneBackend`].

pub mod animation;
pub mod backend;
pub mod camera;
pub mod compass;
pub mod config;
pub mod constants;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod hotspot;
pub mod indicator;
pub mod interaction;
pub mod manager;
pub mod mesh;
pub mod pick;
pub mod sphere;
pub mod viewer;

pub use backend::{
    DrawItem, FrameDraw, MeshHandle, SceneBackend, Shading, TextureHandle, TextureSource,
};
pub use config::ViewerConfig;
pub use descriptor::{
    ActionType, HotspotDescriptor, IndicatorDescriptor, PanoramaDescriptor, UvPoint,
};
pub use error::{HotspotError, IndicatorError, LoadError, ViewerError};
pub use events::{Cursor, IndicatorAction, MediaLayout, ViewerEvent};
pub use interaction::{GestureEnd, PointerInput, PointerKind};
pub use manager::ViewerManager;
pub use pick::Interactable;
pub use viewer::{LoadOutcome, LoadRequest, LoadToken, Viewer, ViewerStatus};
