use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop that stops when dropped.
pub struct FrameLoop {
    tick: Tick,
    handle: Rc<Cell<Option<i32>>>,
}

fn request(tick: &Tick, handle: &Cell<Option<i32>>) {
    let Some(window) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        handle.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

/// Call `on_frame` with the frame timestamp (ms, same clock as event
/// `timeStamp`) once per animation frame.
pub fn start_loop(mut on_frame: impl FnMut(f64) + 'static) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let handle = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let handle_clone = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        handle_clone.set(None);
        on_frame(now_ms);
        request(&tick_clone, &handle_clone);
    }) as Box<dyn FnMut(f64)>));
    request(&tick, &handle);
    FrameLoop { tick, handle }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(window), Some(id)) = (web::window(), self.handle.take()) {
            _ = window.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to its own slot.
        self.tick.borrow_mut().take();
    }
}
