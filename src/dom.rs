use pano_core::{ActionType, Cursor, MediaLayout};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::input;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Match the canvas backing store to its CSS size times the device pixel
/// ratio. Returns the CSS size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), dpr);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (rect.width() as f32, rect.height() as f32)
}

pub fn set_cursor(canvas: &web::HtmlCanvasElement, cursor: Cursor) {
    _ = canvas.style().set_property("cursor", cursor.as_css());
}

/// Point the shareable URL at `panorama_id` without reloading the page.
pub fn replace_location(panorama_id: &str) {
    let Some(window) = web::window() else {
        return;
    };
    let search = window.location().search().unwrap_or_default();
    let url = input::with_query_param(&search, "panorama", panorama_id);
    if let Ok(history) = window.history() {
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("[dom] replaceState failed: {:?}", e);
        }
    }
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

fn create_div(document: &web::Document, class: &str) -> anyhow::Result<web::HtmlElement> {
    let el: web::HtmlElement = document
        .create_element("div")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    el.set_class_name(class);
    Ok(el)
}

#[inline]
fn show(el: &web::HtmlElement) {
    _ = el.class_list().remove_1("hidden");
}

#[inline]
fn hide(el: &web::HtmlElement) {
    _ = el.class_list().add_1("hidden");
}

/// Page elements a viewer draws on besides its canvas, created inside the
/// viewer's container and removed with it.
pub struct Surfaces {
    canvas: web::HtmlCanvasElement,
    tooltip: web::HtmlElement,
    loading: web::HtmlElement,
    error: web::HtmlElement,
    compass: web::HtmlElement,
    modal: web::HtmlElement,
    modal_body: web::HtmlElement,
    last_heading: f32,
    _close_modal: Closure<dyn FnMut()>,
}

impl Surfaces {
    pub fn create(
        document: &web::Document,
        container: &web::HtmlElement,
    ) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        canvas.set_class_name("pano-canvas");
        // Focusable so arrow keys reach the viewer.
        canvas.set_tab_index(0);
        _ = canvas.style().set_property("touch-action", "none");

        let tooltip = create_div(document, "pano-tooltip hidden")?;
        let loading = create_div(document, "pano-loading hidden")?;
        loading.set_text_content(Some("Loading…"));
        let error = create_div(document, "pano-error hidden")?;
        let compass = create_div(document, "pano-compass")?;
        let needle = create_div(document, "pano-compass-needle")?;
        needle.set_text_content(Some("N"));
        compass.append_child(&needle).map_err(js_err)?;

        let modal = create_div(document, "pano-modal hidden")?;
        let close = create_div(document, "pano-modal-close")?;
        close.set_text_content(Some("×"));
        let modal_body = create_div(document, "pano-modal-body")?;
        modal.append_child(&close).map_err(js_err)?;
        modal.append_child(&modal_body).map_err(js_err)?;

        let modal_for_close = modal.clone();
        let body_for_close = modal_body.clone();
        let close_modal = Closure::wrap(Box::new(move || {
            hide(&modal_for_close);
            // Detached media elements stop playing.
            body_for_close.set_inner_html("");
        }) as Box<dyn FnMut()>);
        close
            .add_event_listener_with_callback("click", close_modal.as_ref().unchecked_ref())
            .map_err(js_err)?;

        for el in [
            canvas.unchecked_ref::<web::Node>(),
            tooltip.unchecked_ref(),
            loading.unchecked_ref(),
            error.unchecked_ref(),
            compass.unchecked_ref(),
            modal.unchecked_ref(),
        ] {
            container.append_child(el).map_err(js_err)?;
        }

        Ok(Self {
            canvas,
            tooltip,
            loading,
            error,
            compass,
            modal,
            modal_body,
            last_heading: f32::NAN,
            _close_modal: close_modal,
        })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn show_tooltip(&self, text: &str, x: f32, y: f32) {
        self.tooltip.set_text_content(Some(text));
        let style = self.tooltip.style();
        _ = style.set_property("left", &format!("{}px", x + 12.0));
        _ = style.set_property("top", &format!("{}px", y + 12.0));
        show(&self.tooltip);
    }

    pub fn hide_tooltip(&self) {
        hide(&self.tooltip);
    }

    pub fn set_loading(&self, visible: bool) {
        if visible {
            show(&self.loading);
        } else {
            hide(&self.loading);
        }
    }

    pub fn show_error(&self, message: &str) {
        self.error.set_text_content(Some(message));
        show(&self.error);
    }

    pub fn clear_error(&self) {
        self.error.set_text_content(None);
        hide(&self.error);
    }

    pub fn set_heading(&mut self, heading_deg: f32) {
        if (heading_deg - self.last_heading).abs() < 0.05 {
            return;
        }
        self.last_heading = heading_deg;
        _ = self
            .compass
            .style()
            .set_property("transform", &input::compass_transform(heading_deg));
    }

    /// Show a media target in the modal, sized by `layout`.
    pub fn open_media(&self, action: ActionType, uri: &str, layout: MediaLayout) {
        if !input::is_safe_media_uri(uri) {
            log::warn!("[dom] refusing media uri {:?}", uri);
            return;
        }
        let Some(document) = window_document() else {
            return;
        };
        let (tag, extra): (&str, &[(&str, &str)]) = match action {
            ActionType::Video => ("video", &[("controls", ""), ("autoplay", "")]),
            ActionType::Audio => ("audio", &[("controls", ""), ("autoplay", "")]),
            ActionType::Pdf => ("iframe", &[("title", "document")]),
            ActionType::Image => ("img", &[("alt", "")]),
            ActionType::Panorama => return,
        };
        let Ok(el) = document.create_element(tag) else {
            return;
        };
        _ = el.set_attribute("src", uri);
        for (name, value) in extra {
            _ = el.set_attribute(name, value);
        }
        self.modal_body.set_inner_html("");
        _ = self.modal_body.append_child(&el);

        let cl = self.modal.class_list();
        let (add, remove) = match layout {
            MediaLayout::Centered => ("pano-modal--centered", "pano-modal--corner"),
            MediaLayout::Corner => ("pano-modal--corner", "pano-modal--centered"),
        };
        _ = cl.remove_1(remove);
        _ = cl.add_1(add);
        show(&self.modal);
    }

    /// Detach everything this viewer added to its container.
    pub fn remove(&self) {
        self.modal_body.set_inner_html("");
        self.canvas.remove();
        self.tooltip.remove();
        self.loading.remove();
        self.error.remove();
        self.compass.remove();
        self.modal.remove();
    }
}
