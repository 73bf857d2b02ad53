#![cfg(target_arch = "wasm32")]
//! Browser front-end for the panorama viewer: WebGPU rendering, DOM overlays
//! and input wiring around `pano-core`.

use pano_core::ViewerConfig;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

mod dom;
mod events;
mod frame;
mod host;
mod input;
mod render;

use host::{Host, SharedHost};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pano-web starting");
    Ok(())
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn unknown(container_id: &str) -> JsValue {
    to_js(pano_core::ViewerError::UnknownViewer(container_id.to_string()))
}

/// All viewers on a page, keyed by the id of the element each one lives in.
#[wasm_bindgen]
pub struct PanoramaViewers {
    host: SharedHost,
}

#[wasm_bindgen]
impl PanoramaViewers {
    /// `loader(panoramaId, language)` returns a descriptor (object or JSON
    /// string) or a promise of one. `on_event(containerId, eventJson)`
    /// receives every viewer notification.
    #[wasm_bindgen(constructor)]
    pub fn new(loader: js_sys::Function, on_event: Option<js_sys::Function>) -> Self {
        Self {
            host: Rc::new(RefCell::new(Host::new(loader, on_event))),
        }
    }

    /// Mount a viewer inside the element with id `container_id`. `config_json`
    /// may override any tunable; missing fields keep their defaults.
    pub fn mount(&self, container_id: String, config_json: Option<String>) -> js_sys::Promise {
        let host = self.host.clone();
        future_to_promise(async move {
            let config = match config_json.as_deref() {
                Some(json) if !json.trim().is_empty() => {
                    serde_json::from_str::<ViewerConfig>(json).map_err(to_js)?
                }
                _ => ViewerConfig::default(),
            };
            host::mount(host, container_id, config)
                .await
                .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn unmount(&self, container_id: &str) -> Result<(), JsValue> {
        host::unmount(&self.host, container_id).map_err(to_js)
    }

    /// Start loading `panorama_id`; the response arrives through the loader.
    pub fn load(&self, container_id: &str, panorama_id: &str, language: &str) -> Result<(), JsValue> {
        let request = host::with_viewer(&self.host, container_id, |v| v.load(panorama_id, language))
            .ok_or_else(|| unknown(container_id))?;
        host::spawn_fetch(Rc::downgrade(&self.host), container_id.to_string(), request);
        Ok(())
    }

    pub fn dispose(&self, container_id: &str) -> Result<(), JsValue> {
        host::with_viewer(&self.host, container_id, |v| v.dispose())
            .ok_or_else(|| unknown(container_id))
    }

    /// Reset and reload whatever the viewer last loaded.
    pub fn reinitialize(&self, container_id: &str) -> Result<(), JsValue> {
        let request = host::with_viewer(&self.host, container_id, |v| v.reinitialize())
            .ok_or_else(|| unknown(container_id))?;
        if let Some(request) = request {
            host::spawn_fetch(Rc::downgrade(&self.host), container_id.to_string(), request);
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = setNorthOffset)]
    pub fn set_north_offset(&self, container_id: &str, degrees: f32) -> Result<(), JsValue> {
        host::with_viewer(&self.host, container_id, |v| v.set_north_offset(degrees))
            .ok_or_else(|| unknown(container_id))
    }

    /// Make the current view direction north. Returns the new offset in
    /// degrees, or `undefined` when nothing is loaded.
    #[wasm_bindgen(js_name = captureNorth)]
    pub fn capture_north(&self, container_id: &str) -> Result<Option<f32>, JsValue> {
        host::with_viewer(&self.host, container_id, |v| v.capture_current_as_north())
            .ok_or_else(|| unknown(container_id))
    }

    #[wasm_bindgen(js_name = compassHeading)]
    pub fn compass_heading(&self, container_id: &str) -> Result<f32, JsValue> {
        host::with_viewer(&self.host, container_id, |v| v.compass_heading())
            .ok_or_else(|| unknown(container_id))
    }

    #[wasm_bindgen(js_name = northOffset)]
    pub fn north_offset(&self, container_id: &str) -> Result<f32, JsValue> {
        host::with_viewer(&self.host, container_id, |v| v.north_offset())
            .ok_or_else(|| unknown(container_id))
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self, container_id: &str) -> bool {
        self.host
            .try_borrow()
            .map(|h| h.is_mounted(container_id))
            .unwrap_or(false)
    }
}
