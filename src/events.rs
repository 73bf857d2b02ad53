use pano_core::{PointerInput, PointerKind, Viewer};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::host::{self, Host};
use crate::input;
use crate::render::GpuBackend;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Owns a set of DOM listeners and removes them all when dropped.
#[derive(Default)]
pub struct ListenerGuard {
    listeners: Vec<Listener>,
}

impl ListenerGuard {
    pub fn listen(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        self.add(target, kind, handler, None);
    }

    /// Listener that may call `preventDefault` (wheel is passive by default).
    pub fn listen_active(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        self.add(target, kind, handler, Some(opts));
    }

    fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
        opts: Option<web::AddEventListenerOptions>,
    ) {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let res = match &opts {
            Some(o) => target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                o,
            ),
            None => target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref()),
        };
        if let Err(e) = res {
            log::warn!("[events] could not listen for {}: {:?}", kind, e);
            return;
        }
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
    }
}

fn pointer_input(ev: &web::MouseEvent, kind: PointerKind, canvas: &web::HtmlCanvasElement) -> PointerInput {
    let rect = canvas.get_bounding_client_rect();
    let pos = input::client_to_surface(
        ev.client_x() as f64,
        ev.client_y() as f64,
        rect.left(),
        rect.top(),
    );
    PointerInput::new(kind, pos, ev.time_stamp())
}

fn pointer_kind(ev: &web::Event) -> PointerKind {
    ev.dyn_ref::<web::PointerEvent>()
        .map(|p| PointerKind::from_pointer_type(&p.pointer_type()))
        .unwrap_or(PointerKind::Mouse)
}

fn with(host: &Weak<RefCell<Host>>, id: &str, f: impl FnOnce(&mut Viewer<GpuBackend>)) {
    if let Some(host) = host.upgrade() {
        host::with_viewer(&host, id, f);
    }
}

/// Attach every input listener one viewer needs. Handlers hold only a weak
/// reference to the host so the listeners never keep it alive.
pub fn wire_viewer(
    host: Weak<RefCell<Host>>,
    id: String,
    canvas: web::HtmlCanvasElement,
) -> ListenerGuard {
    let mut guard = ListenerGuard::default();

    {
        let (h, i, c) = (host.clone(), id.clone(), canvas.clone());
        guard.listen(&canvas, "pointermove", move |ev| {
            let Some(pe) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let input = pointer_input(pe, pointer_kind(&ev), &c);
            with(&h, &i, |v| v.pointer_move(input));
        });
    }
    {
        let (h, i, c) = (host.clone(), id.clone(), canvas.clone());
        guard.listen(&canvas, "pointerdown", move |ev| {
            let Some(pe) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            _ = c.set_pointer_capture(pe.pointer_id());
            _ = c.focus();
            let input = pointer_input(pe, pointer_kind(&ev), &c);
            with(&h, &i, |v| v.pointer_down(input));
        });
    }
    {
        let (h, i, c) = (host.clone(), id.clone(), canvas.clone());
        guard.listen(&canvas, "pointerup", move |ev| {
            let Some(pe) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            _ = c.release_pointer_capture(pe.pointer_id());
            let input = pointer_input(pe, pointer_kind(&ev), &c);
            with(&h, &i, |v| {
                let end = v.pointer_up(input);
                log::debug!("[events] gesture ended as {:?}", end);
            });
        });
    }
    {
        let (h, i) = (host.clone(), id.clone());
        guard.listen(&canvas, "pointercancel", move |_ev| {
            with(&h, &i, |v| v.pointer_cancel());
        });
    }
    {
        let (h, i) = (host.clone(), id.clone());
        guard.listen(&canvas, "pointerleave", move |ev| {
            let t = ev.time_stamp();
            with(&h, &i, |v| v.pointer_leave(t));
        });
    }
    {
        let (h, i, c) = (host.clone(), id.clone(), canvas.clone());
        guard.listen(&canvas, "click", move |ev| {
            let Some(me) = ev.dyn_ref::<web::MouseEvent>() else {
                return;
            };
            let input = pointer_input(me, pointer_kind(&ev), &c);
            with(&h, &i, |v| v.click(input));
        });
    }
    {
        let (h, i, c) = (host.clone(), id.clone(), canvas.clone());
        guard.listen_active(&canvas, "wheel", move |ev| {
            let Some(we) = ev.dyn_ref::<web::WheelEvent>() else {
                return;
            };
            ev.prevent_default();
            let delta = input::wheel_pixels(we.delta_y(), we.delta_mode(), c.client_height() as f64);
            with(&h, &i, |v| v.wheel(delta));
        });
    }
    {
        let (h, i) = (host.clone(), id.clone());
        guard.listen(&canvas, "keydown", move |ev| {
            let Some(ke) = ev.dyn_ref::<web::KeyboardEvent>() else {
                return;
            };
            let key = ke.key();
            let mut handled = false;
            with(&h, &i, |v| handled = v.key(&key));
            if handled {
                ev.prevent_default();
            }
        });
    }
    if let Some(window) = web::window() {
        let (h, i) = (host, id);
        guard.listen(&window, "resize", move |_ev| {
            if let Some(host) = h.upgrade() {
                host::resize(&host, &i);
            }
        });
    }

    guard
}
