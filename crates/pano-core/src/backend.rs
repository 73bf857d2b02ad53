//! Seam between the scene lifecycle and whatever owns GPU resources.
//!
//! The core never talks to a graphics API directly. A backend uploads meshes
//! and textures, hands back opaque handles, and draws a flat list of items per
//! frame. The lifecycle guarantees every handle it receives is released once.

use glam::Mat4;

use crate::indicator::IconSpec;
use crate::mesh::MeshData;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Clone, Copy, Debug)]
pub enum TextureSource<'a> {
    /// Equirectangular panorama image.
    Panorama { uri: &'a str },
    /// Indicator icon; the backend falls back to the generated glyph when the
    /// asset is missing or fails to load.
    Icon(&'a IconSpec),
}

/// How the fragment stage combines `color` with the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Solid color.
    Flat,
    /// Texture sample multiplied by color.
    Textured,
    /// Color fading out radially from the UV center (indicator glow).
    Radial,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshHandle,
    pub texture: Option<TextureHandle>,
    pub model: Mat4,
    /// Linear RGBA multiplied with the texture (or used alone).
    pub color: [f32; 4],
    pub shading: Shading,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameDraw {
    pub view_proj: Mat4,
    /// Back to front; the backend draws in order with alpha blending.
    pub items: Vec<DrawItem>,
}

pub trait SceneBackend {
    type Error: std::fmt::Debug;

    fn upload_mesh(&mut self, label: &str, mesh: &MeshData) -> MeshHandle;
    fn release_mesh(&mut self, handle: MeshHandle);

    /// Start loading a texture. The handle is usable immediately; it draws as a
    /// placeholder until [`SceneBackend::texture_ready`] reports true.
    fn load_texture(&mut self, source: TextureSource<'_>) -> TextureHandle;
    fn texture_ready(&self, handle: TextureHandle) -> bool;
    /// Why a texture could not be loaded, if it failed.
    fn texture_error(&self, _handle: TextureHandle) -> Option<String> {
        None
    }
    fn release_texture(&mut self, handle: TextureHandle);

    fn draw(&mut self, frame: &FrameDraw) -> Result<(), Self::Error>;
}
