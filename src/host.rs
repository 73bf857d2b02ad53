use fnv::FnvHashMap;
use pano_core::{
    IndicatorAction, LoadError, LoadRequest, PanoramaDescriptor, Viewer, ViewerConfig,
    ViewerError, ViewerEvent, ViewerManager,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::dom::{self, Surfaces};
use crate::events::{self, ListenerGuard};
use crate::frame::{self, FrameLoop};
use crate::render::GpuBackend;

/// Page-side state of one mounted viewer. Dropping it removes the listeners
/// and stops the frame loop.
pub struct Mount {
    surfaces: Surfaces,
    _listeners: ListenerGuard,
    _frames: FrameLoop,
}

pub struct Host {
    manager: ViewerManager<GpuBackend>,
    mounts: FnvHashMap<String, Mount>,
    /// `(panoramaId, language) => descriptor | Promise<descriptor>`
    loader: js_sys::Function,
    /// `(containerId, eventJson) => void`, optional.
    on_event: Option<js_sys::Function>,
}

pub type SharedHost = Rc<RefCell<Host>>;

impl Host {
    pub fn new(loader: js_sys::Function, on_event: Option<js_sys::Function>) -> Self {
        Self {
            manager: ViewerManager::new(),
            mounts: FnvHashMap::default(),
            loader,
            on_event,
        }
    }

    pub fn is_mounted(&self, container_id: &str) -> bool {
        self.manager.contains(container_id)
    }
}

/// Run `f` on the viewer in `id`, then apply whatever it queued. The host is
/// released before events reach the page so callbacks may call back in.
pub fn with_viewer<R>(
    host: &SharedHost,
    id: &str,
    f: impl FnOnce(&mut Viewer<GpuBackend>) -> R,
) -> Option<R> {
    let (result, queued) = {
        let Ok(mut h) = host.try_borrow_mut() else {
            log::warn!("[host] re-entrant call for `{}` ignored", id);
            return None;
        };
        let viewer = h.manager.get_mut(id).ok()?;
        let result = f(viewer);
        (result, viewer.drain_events())
    };
    deliver(host, id, queued);
    Some(result)
}

fn apply_to_page(surfaces: &Surfaces, event: &ViewerEvent) {
    match event {
        ViewerEvent::ShowLoading => surfaces.set_loading(true),
        ViewerEvent::HideLoading => surfaces.set_loading(false),
        ViewerEvent::ShowError { message } => surfaces.show_error(message),
        ViewerEvent::ClearError => surfaces.clear_error(),
        ViewerEvent::Cursor { cursor } => dom::set_cursor(surfaces.canvas(), *cursor),
        ViewerEvent::ShowTooltip { text, x, y } => surfaces.show_tooltip(text, *x, *y),
        ViewerEvent::HideTooltip => surfaces.hide_tooltip(),
        ViewerEvent::IndicatorActivated {
            action: IndicatorAction::OpenMedia { action, uri, layout },
            ..
        } => surfaces.open_media(*action, uri, *layout),
        ViewerEvent::LocationChanged { panorama_id } => dom::replace_location(panorama_id),
        ViewerEvent::IndicatorActivated { .. }
        | ViewerEvent::HotspotActivated { .. }
        | ViewerEvent::LoadRequested { .. }
        | ViewerEvent::NorthOffsetCaptured { .. } => {}
    }
}

fn notify(host: &SharedHost, id: &str, event: &ViewerEvent) {
    let Some(callback) = host.borrow().on_event.clone() else {
        return;
    };
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("[host] could not serialize event: {}", e);
            return;
        }
    };
    if let Err(e) = callback.call2(&JsValue::NULL, &JsValue::from_str(id), &JsValue::from_str(&json))
    {
        log::warn!("[host] event callback threw: {:?}", e);
    }
}

pub fn deliver(host: &SharedHost, id: &str, queued: Vec<ViewerEvent>) {
    for event in queued {
        if let Ok(h) = host.try_borrow() {
            if let Some(mount) = h.mounts.get(id) {
                apply_to_page(&mount.surfaces, &event);
            }
        }
        if let ViewerEvent::LoadRequested { request } = &event {
            spawn_fetch(Rc::downgrade(host), id.to_string(), request.clone());
        }
        notify(host, id, &event);
    }
}

fn fetch_error(request: &LoadRequest, e: JsValue) -> LoadError {
    LoadError::Fetch {
        id: request.panorama_id.clone(),
        reason: e.as_string().unwrap_or_else(|| format!("{:?}", e)),
    }
}

/// Ask the page's loader for a descriptor. It may answer with a JSON string,
/// a plain object, or a promise of either.
async fn fetch_descriptor(
    loader: &js_sys::Function,
    request: &LoadRequest,
) -> Result<PanoramaDescriptor, LoadError> {
    let answer = loader
        .call2(
            &JsValue::NULL,
            &JsValue::from_str(&request.panorama_id),
            &JsValue::from_str(&request.language),
        )
        .map_err(|e| fetch_error(request, e))?;
    let value = JsFuture::from(js_sys::Promise::resolve(&answer))
        .await
        .map_err(|e| fetch_error(request, e))?;
    let text = match value.as_string() {
        Some(text) => text,
        None => js_sys::JSON::stringify(&value)
            .map(String::from)
            .map_err(|e| fetch_error(request, e))?,
    };
    serde_json::from_str(&text).map_err(|e| LoadError::Parse(e.to_string()))
}

pub fn spawn_fetch(host: Weak<RefCell<Host>>, id: String, request: LoadRequest) {
    spawn_local(async move {
        let Some(loader) = host.upgrade().map(|h| h.borrow().loader.clone()) else {
            return;
        };
        let result = fetch_descriptor(&loader, &request).await;
        // The viewer may have been unmounted or moved on meanwhile; a stale
        // token is discarded by the viewer itself.
        let Some(host) = host.upgrade() else {
            return;
        };
        let token = request.token;
        with_viewer(&host, &id, |v| {
            let outcome = v.complete_load(token, result);
            log::debug!("[host] `{}` load {:?}: {:?}", id, token, outcome);
        });
    });
}

fn on_frame(host: &SharedHost, id: &str, now_ms: f64) {
    let heading = with_viewer(host, id, |v| {
        match v.frame(now_ms) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                v.backend_mut().reconfigure()
            }
            Err(e) => log::warn!("[frame] {:?}", e),
        }
        v.compass_heading()
    });
    let Some(heading) = heading else {
        return;
    };
    if let Ok(mut h) = host.try_borrow_mut() {
        if let Some(mount) = h.mounts.get_mut(id) {
            mount.surfaces.set_heading(heading);
        }
    }
}

/// Resync the canvas to its laid-out size and tell the viewer.
pub fn resize(host: &SharedHost, id: &str) {
    let Some(canvas) = host
        .borrow()
        .mounts
        .get(id)
        .map(|m| m.surfaces.canvas().clone())
    else {
        return;
    };
    let (css_w, css_h) = dom::sync_canvas_backing_size(&canvas);
    with_viewer(host, id, |v| {
        v.backend_mut().resize_if_needed(canvas.width(), canvas.height());
        v.resize(css_w, css_h);
    });
}

/// Create the canvas and overlays inside `container_id`, bring up WebGPU and
/// register the viewer.
pub async fn mount(host: SharedHost, container_id: String, config: ViewerConfig) -> anyhow::Result<()> {
    if host.borrow().is_mounted(&container_id) {
        return Err(ViewerError::AlreadyMounted(container_id).into());
    }
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container: web::HtmlElement = document
        .get_element_by_id(&container_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", container_id))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let surfaces = Surfaces::create(&document, &container)?;
    let (css_w, css_h) = dom::sync_canvas_backing_size(surfaces.canvas());
    let backend = match GpuBackend::new(surfaces.canvas()).await {
        Ok(backend) => backend,
        Err(e) => {
            surfaces.remove();
            return Err(e);
        }
    };

    let weak = Rc::downgrade(&host);
    let listeners = events::wire_viewer(weak.clone(), container_id.clone(), surfaces.canvas().clone());
    let frames = {
        let id = container_id.clone();
        frame::start_loop(move |now_ms| {
            if let Some(host) = weak.upgrade() {
                on_frame(&host, &id, now_ms);
            }
        })
    };

    let mut h = host.borrow_mut();
    // Another mount for the same container may have finished while WebGPU
    // was initializing.
    match h.manager.mount(container_id.clone(), backend, config) {
        Ok(viewer) => viewer.resize(css_w, css_h),
        Err(e) => {
            surfaces.remove();
            return Err(e.into());
        }
    }
    h.mounts.insert(
        container_id,
        Mount {
            surfaces,
            _listeners: listeners,
            _frames: frames,
        },
    );
    Ok(())
}

/// Dispose the viewer and take its elements off the page.
pub fn unmount(host: &SharedHost, id: &str) -> Result<(), ViewerError> {
    let mount = {
        let mut h = host.borrow_mut();
        h.manager.unmount(id)?;
        h.mounts.remove(id)
    };
    if let Some(mount) = mount {
        mount.surfaces.remove();
        // Unmount can be reached from inside one of this mount's own
        // callbacks; the closures must outlive the current call.
        spawn_local(async move { drop(mount) });
    }
    Ok(())
}
