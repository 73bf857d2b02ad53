//! Viewer and scene lifecycle.
//!
//! A [`Viewer`] moves through `Uninitialized -> Loading -> Ready`. Every load
//! disposes the current [`Scene`] first and hands out a fresh [`LoadToken`];
//! only the response carrying the newest token is ever turned into geometry.
//! The host drives the viewer from a single thread: it forwards input, calls
//! [`Viewer::frame`] once per animation frame, resolves [`LoadRequest`]s and
//! drains [`ViewerEvent`]s after each call.

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::Serialize;

use crate::backend::{
    DrawItem, FrameDraw, MeshHandle, SceneBackend, Shading, TextureHandle, TextureSource,
};
use crate::camera::LookCamera;
use crate::compass::CompassStabilizer;
use crate::config::{IndicatorStyle, ViewerConfig};
use crate::constants::*;
use crate::descriptor::{ActionType, PanoramaDescriptor};
use crate::error::LoadError;
use crate::events::{IndicatorAction, MediaLayout, ViewerEvent};
use crate::hotspot::{build_hotspot, Hotspot};
use crate::indicator::{build_indicator, Indicator, IndicatorGpu, IndicatorPart};
use crate::interaction::{Dispatch, Dispatcher, Dispatches, GestureEnd, PointerInput};
use crate::mesh::{disc, inward_sphere, quad, ring};
use crate::pick::{nearer, HitTest, Interactable, PickHit, Ray};

/// Identifies one load request. Strictly increasing per viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LoadToken(pub u64);

/// Ask the host to fetch a panorama descriptor and report back with
/// [`Viewer::complete_load`] under the same token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadRequest {
    pub token: LoadToken,
    pub panorama_id: String,
    pub language: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerStatus {
    /// Nothing loaded, after construction, disposal or a failed load.
    Uninitialized,
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// Superseded by a newer request; dropped without side effects.
    Stale,
    Failed,
}

/// Everything materialized for one panorama. Owned exclusively by its viewer
/// and released through [`Scene::release`], which consumes it.
#[derive(Debug)]
pub struct Scene {
    pub token: LoadToken,
    pub panorama_id: String,
    pub image: String,
    /// North offset the geometry was rotated by, in degrees.
    pub applied_offset_deg: f32,
    root: Quat,
    sphere: MeshHandle,
    texture: TextureHandle,
    pub hotspots: Vec<Hotspot>,
    pub indicators: Vec<Indicator>,
}

impl Scene {
    /// Upload the sphere and every valid hotspot and indicator. Invalid
    /// entries are logged and skipped.
    pub fn build<B: SceneBackend>(
        token: LoadToken,
        descriptor: &PanoramaDescriptor,
        config: &ViewerConfig,
        backend: &mut B,
    ) -> Self {
        let offset = if descriptor.north_offset.is_finite() {
            descriptor.north_offset
        } else {
            0.0
        };
        // Panorama heading h shows up at world heading h + offset, which puts
        // north at world yaw 0.
        let root = Quat::from_rotation_y(-offset.to_radians());

        let sphere_mesh = inward_sphere(
            SPHERE_RADIUS,
            SPHERE_WIDTH_SEGMENTS,
            SPHERE_HEIGHT_SEGMENTS,
        );
        let sphere = backend.upload_mesh("panorama-sphere", &sphere_mesh);
        let texture = backend.load_texture(TextureSource::Panorama {
            uri: &descriptor.image,
        });

        let mut hotspots = Vec::with_capacity(descriptor.hotspots.len());
        for hd in &descriptor.hotspots {
            match build_hotspot(hd, HOTSPOT_RADIUS, &config.hotspot) {
                Ok(mut h) => {
                    h.gpu = Some(backend.upload_mesh(&format!("hotspot-{}", hd.id), &h.mesh));
                    hotspots.push(h);
                }
                Err(e) => log::warn!("[scene] dropping hotspot: {}", e),
            }
        }

        let mut indicators = Vec::with_capacity(descriptor.indicators.len());
        for idesc in &descriptor.indicators {
            match build_indicator(idesc, INDICATOR_RADIUS, &config.indicator) {
                Ok(mut ind) => {
                    ind.gpu = upload_indicator(&ind, backend);
                    indicators.push(ind);
                }
                Err(e) => log::warn!("[scene] dropping indicator: {}", e),
            }
        }

        log::info!(
            "[scene] built {} ({} hotspots, {} indicators)",
            descriptor.id,
            hotspots.len(),
            indicators.len()
        );
        Self {
            token,
            panorama_id: descriptor.id.clone(),
            image: descriptor.image.clone(),
            applied_offset_deg: offset,
            root,
            sphere,
            texture,
            hotspots,
            indicators,
        }
    }

    /// Give every GPU resource back to the backend.
    pub fn release<B: SceneBackend>(self, backend: &mut B) {
        backend.release_mesh(self.sphere);
        backend.release_texture(self.texture);
        for h in self.hotspots {
            if let Some(mesh) = h.gpu {
                backend.release_mesh(mesh);
            }
        }
        for ind in self.indicators {
            let gpu = ind.gpu;
            for part in IndicatorPart::ALL {
                if let Some(mesh) = gpu.mesh(part) {
                    backend.release_mesh(mesh);
                }
            }
            if let Some(tex) = gpu.icon_texture {
                backend.release_texture(tex);
            }
        }
        log::debug!("[scene] released {}", self.panorama_id);
    }

    pub fn root(&self) -> Quat {
        self.root
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Addressable objects in registration order: hotspots, then indicators.
    pub fn interactables(&self) -> Vec<Interactable> {
        (0..self.hotspots.len())
            .map(Interactable::Hotspot)
            .chain((0..self.indicators.len()).map(Interactable::Indicator))
            .collect()
    }

    /// Nearest hit among `candidates` for a world-space ray.
    pub fn pick(
        &self,
        ray: Ray,
        candidates: &[Interactable],
        style: &IndicatorStyle,
    ) -> Option<PickHit> {
        let local = ray.into_frame(self.root);
        candidates.iter().fold(None, |best, &target| {
            let distance = match target {
                Interactable::Hotspot(i) => self.hotspots.get(i).and_then(|h| h.intersect(&local)),
                Interactable::Indicator(i) => self
                    .indicators
                    .get(i)
                    .and_then(|ind| ind.intersect(&local, style)),
            };
            nearer(best, distance.map(|distance| PickHit { target, distance }))
        })
    }

    fn set_hovered(&mut self, target: Interactable, hovered: bool) {
        match target {
            Interactable::Hotspot(i) => {
                if let Some(h) = self.hotspots.get_mut(i) {
                    h.hovered = hovered;
                }
            }
            Interactable::Indicator(i) => {
                if let Some(ind) = self.indicators.get_mut(i) {
                    ind.hovered = hovered;
                }
            }
        }
    }

    fn update(&mut self, dt_sec: f32, camera_pos: Vec3, config: &ViewerConfig) {
        let local_camera = self.root.inverse() * camera_pos;
        for h in &mut self.hotspots {
            h.step(dt_sec, &config.hotspot);
        }
        for ind in &mut self.indicators {
            ind.update_orientation(local_camera);
            ind.update(dt_sec, &config.indicator);
        }
    }

    /// Back-to-front draw list: sphere, hotspot fills, then indicator parts.
    pub fn draw_items(&self, config: &ViewerConfig) -> Vec<DrawItem> {
        let root = Mat4::from_quat(self.root);
        let mut items = Vec::with_capacity(1 + self.hotspots.len() + self.indicators.len() * 4);
        items.push(DrawItem {
            mesh: self.sphere,
            texture: Some(self.texture),
            model: root,
            color: [1.0; 4],
            shading: Shading::Textured,
        });
        for h in &self.hotspots {
            let Some(mesh) = h.gpu else { continue };
            let look = h.appearance(&config.hotspot);
            let [r, g, b] = look.color;
            items.push(DrawItem {
                mesh,
                texture: None,
                model: root * h.transform(),
                color: [r, g, b, look.opacity],
                shading: Shading::Flat,
            });
        }
        for ind in &self.indicators {
            for part in IndicatorPart::ALL {
                let Some(mesh) = ind.gpu.mesh(part) else { continue };
                let (texture, shading) = match part {
                    IndicatorPart::Glow => (None, Shading::Radial),
                    IndicatorPart::Icon => (ind.gpu.icon_texture, Shading::Textured),
                    IndicatorPart::Ring | IndicatorPart::Dot => (None, Shading::Flat),
                };
                items.push(DrawItem {
                    mesh,
                    texture,
                    model: root * ind.part_transform(part, &config.indicator),
                    color: ind.part_color(part),
                    shading,
                });
            }
        }
        items
    }
}

fn upload_indicator<B: SceneBackend>(ind: &Indicator, backend: &mut B) -> IndicatorGpu {
    let id = &ind.descriptor.id;
    IndicatorGpu {
        glow: Some(backend.upload_mesh(
            &format!("indicator-{id}-glow"),
            &disc(INDICATOR_GLOW_RADIUS, INDICATOR_DISC_SEGMENTS),
        )),
        ring: Some(backend.upload_mesh(
            &format!("indicator-{id}-ring"),
            &ring(INDICATOR_RING_INNER, INDICATOR_RING_OUTER, INDICATOR_DISC_SEGMENTS),
        )),
        icon: Some(backend.upload_mesh(
            &format!("indicator-{id}-icon"),
            &quad(INDICATOR_ICON_SIZE),
        )),
        dot: Some(backend.upload_mesh(
            &format!("indicator-{id}-dot"),
            &disc(INDICATOR_DOT_RADIUS, INDICATOR_DISC_SEGMENTS / 2),
        )),
        icon_texture: Some(backend.load_texture(TextureSource::Icon(&ind.icon))),
    }
}

/// Hit tests against the current scene through the current camera.
pub struct ScenePicker<'a> {
    pub scene: Option<&'a Scene>,
    pub camera: &'a LookCamera,
    pub style: &'a IndicatorStyle,
}

impl HitTest for ScenePicker<'_> {
    fn hit_test(&self, ndc: Vec2, candidates: &[Interactable]) -> Option<PickHit> {
        let scene = self.scene?;
        scene.pick(self.camera.ray_from_ndc(ndc), candidates, self.style)
    }
}

pub struct Viewer<B: SceneBackend> {
    backend: B,
    config: ViewerConfig,
    camera: LookCamera,
    dispatcher: Dispatcher,
    compass: CompassStabilizer,
    scene: Option<Scene>,
    status: ViewerStatus,
    next_token: u64,
    pending: Option<LoadToken>,
    /// Last requested panorama and language, replayed by `reinitialize`.
    current: Option<(String, String)>,
    awaiting_first_frame: bool,
    error: Option<LoadError>,
    last_frame_ms: Option<f64>,
    heading: f32,
    events: Vec<ViewerEvent>,
}

impl<B: SceneBackend> Viewer<B> {
    pub fn new(backend: B, config: ViewerConfig) -> Self {
        Self {
            backend,
            camera: LookCamera::new(config.camera.clone()),
            dispatcher: Dispatcher::new(config.gesture.clone()),
            compass: CompassStabilizer::new(config.compass.clone()),
            config,
            scene: None,
            status: ViewerStatus::Uninitialized,
            next_token: 0,
            pending: None,
            current: None,
            awaiting_first_frame: false,
            error: None,
            last_frame_ms: None,
            heading: 0.0,
            events: Vec::new(),
        }
    }

    pub fn status(&self) -> ViewerStatus {
        self.status
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn camera(&self) -> &LookCamera {
        &self.camera
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    pub fn pending_token(&self) -> Option<LoadToken> {
        self.pending
    }

    /// Stabilized compass heading in degrees, updated once per frame.
    pub fn compass_heading(&self) -> f32 {
        self.heading
    }

    pub fn north_offset(&self) -> f32 {
        self.compass.north_offset()
    }

    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start loading `panorama_id`. The current scene is disposed right away;
    /// any response still in flight for an older token becomes stale.
    pub fn load(
        &mut self,
        panorama_id: impl Into<String>,
        language: impl Into<String>,
    ) -> LoadRequest {
        let panorama_id = panorama_id.into();
        let language = language.into();
        self.dispose_scene();
        if self.error.take().is_some() {
            self.events.push(ViewerEvent::ClearError);
        }
        self.next_token += 1;
        let token = LoadToken(self.next_token);
        self.pending = Some(token);
        self.status = ViewerStatus::Loading;
        self.awaiting_first_frame = false;
        self.current = Some((panorama_id.clone(), language.clone()));
        self.events.push(ViewerEvent::ShowLoading);
        log::info!("[viewer] loading {} ({:?})", panorama_id, token);
        LoadRequest {
            token,
            panorama_id,
            language,
        }
    }

    /// Deliver the host's answer to a [`LoadRequest`].
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        result: Result<PanoramaDescriptor, LoadError>,
    ) -> LoadOutcome {
        if self.pending != Some(token) {
            log::debug!("[viewer] discarding stale response {:?}", token);
            return LoadOutcome::Stale;
        }
        self.pending = None;
        match result {
            Ok(descriptor) => {
                let scene = Scene::build(token, &descriptor, &self.config, &mut self.backend);
                let out = self.dispatcher.register(scene.interactables());
                self.apply(out);
                self.compass.set_north_offset(scene.applied_offset_deg);
                self.camera.reset();
                self.scene = Some(scene);
                self.status = ViewerStatus::Ready;
                self.awaiting_first_frame = true;
                LoadOutcome::Applied
            }
            Err(e) => {
                self.fail(e);
                LoadOutcome::Failed
            }
        }
    }

    fn fail(&mut self, error: LoadError) {
        log::warn!("[viewer] {}", error);
        self.dispose_scene();
        self.status = ViewerStatus::Uninitialized;
        self.awaiting_first_frame = false;
        self.events.push(ViewerEvent::HideLoading);
        self.events.push(ViewerEvent::ShowError {
            message: error.to_string(),
        });
        self.error = Some(error);
    }

    /// Advance animations, filter the compass and draw. `now_ms` is the host's
    /// monotonic clock.
    pub fn frame(&mut self, now_ms: f64) -> Result<(), B::Error> {
        let dt_sec = self
            .last_frame_ms
            .map(|last| ((now_ms - last) / 1000.0).clamp(0.0, 0.1) as f32)
            .unwrap_or(0.0);
        self.last_frame_ms = Some(now_ms);

        let image_error = self.scene.as_ref().and_then(|s| {
            self.backend
                .texture_error(s.texture)
                .map(|reason| (s.image.clone(), reason))
        });
        if let Some((uri, reason)) = image_error {
            self.fail(LoadError::Image { uri, reason });
        }

        let gesture = &self.config.gesture;
        self.camera
            .step_inertia(gesture.inertia_decay, gesture.inertia_min_velocity);

        let picker = ScenePicker {
            scene: self.scene.as_ref(),
            camera: &self.camera,
            style: &self.config.indicator,
        };
        let out = self.dispatcher.tick(now_ms, &picker);
        self.apply(out);

        let camera_pos = self.camera.camera().eye;
        if let Some(scene) = self.scene.as_mut() {
            scene.update(dt_sec, camera_pos, &self.config);
        }
        self.heading = self.compass.sample(self.panorama_yaw());

        let frame = FrameDraw {
            view_proj: self.camera.view_proj(),
            items: self
                .scene
                .as_ref()
                .map(|s| s.draw_items(&self.config))
                .unwrap_or_default(),
        };
        self.backend.draw(&frame)?;

        if self.awaiting_first_frame {
            if let Some(scene) = self.scene.as_ref() {
                if self.backend.texture_ready(scene.texture) {
                    self.awaiting_first_frame = false;
                    self.events.push(ViewerEvent::HideLoading);
                    log::info!("[viewer] {} ready", scene.panorama_id);
                }
            }
        }
        Ok(())
    }

    /// Camera yaw measured in the panorama's own frame.
    fn panorama_yaw(&self) -> f32 {
        let offset = self
            .scene
            .as_ref()
            .map(|s| s.applied_offset_deg)
            .unwrap_or(0.0);
        self.camera.yaw - offset.to_radians()
    }

    /// Render surface size in CSS pixels.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
        self.dispatcher.resize(Vec2::new(width, height));
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        let picker = ScenePicker {
            scene: self.scene.as_ref(),
            camera: &self.camera,
            style: &self.config.indicator,
        };
        let out = self.dispatcher.pointer_move(input, &picker);
        self.apply(out);
    }

    pub fn pointer_down(&mut self, input: PointerInput) {
        let out = self.dispatcher.pointer_down(input);
        self.apply(out);
    }

    pub fn pointer_up(&mut self, input: PointerInput) -> GestureEnd {
        let (end, out) = self.dispatcher.pointer_up(input);
        self.apply(out);
        end
    }

    pub fn pointer_cancel(&mut self) {
        let out = self.dispatcher.pointer_cancel();
        self.apply(out);
    }

    pub fn pointer_leave(&mut self, time_ms: f64) {
        let out = self.dispatcher.pointer_leave(time_ms);
        self.apply(out);
    }

    /// Platform click or tap at a surface position.
    pub fn click(&mut self, input: PointerInput) {
        let picker = ScenePicker {
            scene: self.scene.as_ref(),
            camera: &self.camera,
            style: &self.config.indicator,
        };
        let out = self.dispatcher.click(input, &picker);
        self.apply(out);
    }

    /// Mouse wheel; positive `delta_y` zooms out.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y.is_finite() {
            self.camera.zoom(delta_y * ZOOM_DEG_PER_WHEEL_UNIT);
        }
    }

    /// Keyboard navigation by `KeyboardEvent.key`. Returns whether the key was
    /// consumed.
    pub fn key(&mut self, key: &str) -> bool {
        let step = self.camera.key_step();
        let delta = match key {
            "ArrowLeft" => Vec2::new(-step, 0.0),
            "ArrowRight" => Vec2::new(step, 0.0),
            "ArrowUp" => Vec2::new(0.0, step),
            "ArrowDown" => Vec2::new(0.0, -step),
            "+" | "=" => {
                self.camera.zoom(-self.config.camera.key_step_deg);
                return true;
            }
            "-" | "_" => {
                self.camera.zoom(self.config.camera.key_step_deg);
                return true;
            }
            _ => return false,
        };
        self.camera.velocity = Vec2::ZERO;
        self.camera.rotate(delta);
        true
    }

    pub fn set_north_offset(&mut self, degrees: f32) {
        self.compass.set_north_offset(degrees);
    }

    /// Make the current view direction read as north. Returns the new offset,
    /// also announced as [`ViewerEvent::NorthOffsetCaptured`] for persistence.
    pub fn capture_current_as_north(&mut self) -> Option<f32> {
        let panorama_id = self.scene.as_ref()?.panorama_id.clone();
        let degrees = self.compass.capture_north(self.panorama_yaw());
        self.events.push(ViewerEvent::NorthOffsetCaptured {
            panorama_id,
            degrees,
        });
        Some(degrees)
    }

    /// Release everything and return to `Uninitialized`. Any in-flight load is
    /// invalidated. The viewer stays usable.
    pub fn dispose(&mut self) {
        self.dispose_scene();
        self.pending = None;
        self.status = ViewerStatus::Uninitialized;
        self.awaiting_first_frame = false;
        self.dispatcher.reset();
        self.last_frame_ms = None;
    }

    /// Dispose, reset the camera and compass, then reload the last requested
    /// panorama if there was one.
    pub fn reinitialize(&mut self) -> Option<LoadRequest> {
        self.dispose();
        self.compass.reset();
        self.camera.reset();
        self.heading = 0.0;
        let (id, language) = self.current.clone()?;
        Some(self.load(id, language))
    }

    fn dispose_scene(&mut self) {
        if let Some(scene) = self.scene.take() {
            scene.release(&mut self.backend);
        }
        if self.dispatcher.tooltip_visible() {
            self.events.push(ViewerEvent::HideTooltip);
        }
        let out = self.dispatcher.clear();
        self.apply(out);
    }

    fn apply(&mut self, out: Dispatches) {
        for d in out {
            self.apply_one(d);
        }
    }

    fn apply_one(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::HoverExit(target) => {
                log::debug!("[viewer] hover exit {:?}", target);
                if let Some(scene) = self.scene.as_mut() {
                    scene.set_hovered(target, false);
                }
            }
            Dispatch::HoverEnter { target, pos } => {
                log::debug!("[viewer] hover enter {:?}", target);
                let Some(scene) = self.scene.as_mut() else {
                    return;
                };
                scene.set_hovered(target, true);
                if let Interactable::Indicator(i) = target {
                    if let Some(ind) = scene.indicators.get(i) {
                        self.events.push(ViewerEvent::ShowTooltip {
                            text: ind.tooltip().to_string(),
                            x: pos.x,
                            y: pos.y,
                        });
                    }
                }
            }
            Dispatch::Cursor(cursor) => self.events.push(ViewerEvent::Cursor { cursor }),
            Dispatch::Rotate(px) => {
                let delta = self
                    .camera
                    .drag_delta(px, self.config.gesture.drag_degrees_per_px);
                self.camera.rotate(delta);
            }
            Dispatch::StopInertia => self.camera.velocity = Vec2::ZERO,
            Dispatch::Release { velocity_px } => {
                self.camera.velocity = self
                    .camera
                    .drag_delta(velocity_px, self.config.gesture.drag_degrees_per_px);
            }
            Dispatch::Activate(target) => self.activate(target),
            Dispatch::HideTooltip => self.events.push(ViewerEvent::HideTooltip),
        }
    }

    fn activate(&mut self, target: Interactable) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        match target {
            Interactable::Hotspot(i) => {
                if let Some(h) = scene.hotspots.get(i) {
                    self.events.push(ViewerEvent::HotspotActivated {
                        hotspot: h.descriptor.clone(),
                    });
                }
            }
            Interactable::Indicator(i) => {
                let Some(ind) = scene.indicators.get(i) else {
                    return;
                };
                let descriptor = ind.descriptor.clone();
                let action = ind.action;
                match action {
                    None => {
                        log::warn!(
                            "[viewer] indicator {} has action `{}`; ignoring click",
                            descriptor.id,
                            descriptor.action_type
                        );
                    }
                    Some(ActionType::Panorama) => {
                        let panorama_id = descriptor.target.trim().to_string();
                        if panorama_id.is_empty() {
                            log::warn!(
                                "[viewer] indicator {} has no target panorama",
                                descriptor.id
                            );
                            return;
                        }
                        let language = self
                            .current
                            .as_ref()
                            .map(|(_, lang)| lang.clone())
                            .unwrap_or_default();
                        self.events.push(ViewerEvent::IndicatorActivated {
                            indicator: descriptor,
                            action: IndicatorAction::Navigate {
                                panorama_id: panorama_id.clone(),
                            },
                        });
                        self.events.push(ViewerEvent::LocationChanged {
                            panorama_id: panorama_id.clone(),
                        });
                        let request = self.load(panorama_id, language);
                        self.events.push(ViewerEvent::LoadRequested { request });
                    }
                    Some(action) => {
                        let uri = descriptor.target.clone();
                        self.events.push(ViewerEvent::IndicatorActivated {
                            indicator: descriptor,
                            action: IndicatorAction::OpenMedia {
                                action,
                                uri,
                                layout: MediaLayout::for_action(action),
                            },
                        });
                    }
                }
            }
        }
    }
}

impl<B: SceneBackend> Drop for Viewer<B> {
    fn drop(&mut self) {
        if let Some(scene) = self.scene.take() {
            scene.release(&mut self.backend);
        }
    }
}
