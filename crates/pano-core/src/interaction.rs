//! Pointer and touch interaction: hover tracking, tap-vs-drag disambiguation
//! and click routing.
//!
//! The dispatcher is a plain state machine. Input methods return a short list
//! of [`Dispatch`] commands that the viewer applies to the scene and camera,
//! so every transition can be exercised without a renderer or a DOM.

use glam::Vec2;
use smallvec::SmallVec;

use crate::config::GestureConfig;
use crate::constants::INERTIA_IDLE_MS;
use crate::events::Cursor;
use crate::pick::{HitTest, Interactable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Pointer-event `pointerType` string to kind; unknown types act like a
    /// mouse.
    pub fn from_pointer_type(s: &str) -> Self {
        match s {
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Mouse,
        }
    }

    fn hovers(self) -> bool {
        !matches!(self, PointerKind::Touch)
    }
}

/// One pointer sample, in CSS pixels relative to the render surface's
/// top-left corner, stamped with the host's millisecond clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub pos: Vec2,
    pub time_ms: f64,
}

impl PointerInput {
    pub fn new(kind: PointerKind, pos: Vec2, time_ms: f64) -> Self {
        Self { kind, pos, time_ms }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureState {
    Idle,
    /// Touch held back until it either moves past the slop or lifts.
    Pending { start: Vec2, start_ms: f64, last: Vec2 },
    /// Camera rotation in progress.
    Dragging {
        kind: PointerKind,
        start: Vec2,
        last: Vec2,
        last_delta: Vec2,
        last_move_ms: f64,
        /// Farthest the pointer has been from `start` during this gesture.
        max_travel: f32,
    },
}

/// How a finished gesture was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEnd {
    /// Short, still touch; the platform's click follows and is hit-tested.
    Tap,
    Drag,
    /// Touch held past the tap window without moving.
    LongPress,
    /// Mouse press released without turning into a drag.
    Press,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TooltipState {
    Hidden,
    Shown(usize),
    PendingHide { deadline_ms: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dispatch {
    HoverExit(Interactable),
    HoverEnter { target: Interactable, pos: Vec2 },
    Cursor(Cursor),
    /// Rotate the camera by a pointer movement in CSS pixels.
    Rotate(Vec2),
    StopInertia,
    /// Drag released; keep rotating with this per-frame pixel velocity.
    Release { velocity_px: Vec2 },
    Activate(Interactable),
    HideTooltip,
}

pub type Dispatches = SmallVec<[Dispatch; 4]>;

#[derive(Clone, Debug)]
pub struct Dispatcher {
    config: GestureConfig,
    surface: Vec2,
    registered: Vec<Interactable>,
    hovered: Option<Interactable>,
    gesture: GestureState,
    suppress_click: bool,
    mouse_pos: Option<Vec2>,
    tooltip: TooltipState,
    cursor: Cursor,
}

impl Dispatcher {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            surface: Vec2::ONE,
            registered: Vec::new(),
            hovered: None,
            gesture: GestureState::Idle,
            suppress_click: false,
            mouse_pos: None,
            tooltip: TooltipState::Hidden,
            cursor: Cursor::Grab,
        }
    }

    /// Replace the active object set. Hover and tooltip state belong to the
    /// previous set and are dropped without exit notifications; a hover cursor
    /// left over from that set is switched back.
    pub fn register(&mut self, targets: Vec<Interactable>) -> Dispatches {
        let mut out = Dispatches::new();
        self.registered = targets;
        self.hovered = None;
        self.tooltip = TooltipState::Hidden;
        if self.cursor == Cursor::Pointer {
            self.set_cursor(Cursor::Grab, &mut out);
        }
        out
    }

    pub fn clear(&mut self) -> Dispatches {
        self.register(Vec::new())
    }

    /// Forget everything, including an in-flight gesture.
    pub fn reset(&mut self) {
        self.registered.clear();
        self.hovered = None;
        self.tooltip = TooltipState::Hidden;
        self.gesture = GestureState::Idle;
        self.suppress_click = false;
        self.mouse_pos = None;
        self.cursor = Cursor::Grab;
    }

    pub fn registered(&self) -> &[Interactable] {
        &self.registered
    }

    pub fn hovered(&self) -> Option<Interactable> {
        self.hovered
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn tooltip_visible(&self) -> bool {
        !matches!(self.tooltip, TooltipState::Hidden)
    }

    /// Render surface size in CSS pixels.
    pub fn resize(&mut self, size: Vec2) {
        if size.x > 0.0 && size.y > 0.0 {
            self.surface = size;
        }
    }

    /// Surface position to normalized device coordinates.
    pub fn to_ndc(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * pos.x / self.surface.x - 1.0,
            1.0 - 2.0 * pos.y / self.surface.y,
        )
    }

    pub fn pointer_move(&mut self, input: PointerInput, picker: &impl HitTest) -> Dispatches {
        let mut out = Dispatches::new();
        if input.kind.hovers() {
            self.mouse_pos = Some(input.pos);
        }
        match self.gesture {
            GestureState::Pending {
                start,
                start_ms,
                last,
            } => {
                let travel = input.pos.distance(start);
                if travel > self.config.tap_slop_px {
                    // Past the slop this gesture can never become a tap. Catch
                    // up on the movement held back while pending.
                    out.push(Dispatch::Rotate(input.pos - start));
                    self.gesture = GestureState::Dragging {
                        kind: input.kind,
                        start,
                        last: input.pos,
                        last_delta: input.pos - last,
                        last_move_ms: input.time_ms,
                        max_travel: travel,
                    };
                    self.set_cursor(Cursor::Grabbing, &mut out);
                } else {
                    self.gesture = GestureState::Pending {
                        start,
                        start_ms,
                        last: input.pos,
                    };
                }
            }
            GestureState::Dragging {
                kind,
                start,
                last,
                max_travel,
                ..
            } => {
                let delta = input.pos - last;
                if delta != Vec2::ZERO {
                    out.push(Dispatch::Rotate(delta));
                }
                self.gesture = GestureState::Dragging {
                    kind,
                    start,
                    last: input.pos,
                    last_delta: delta,
                    last_move_ms: input.time_ms,
                    max_travel: max_travel.max(input.pos.distance(start)),
                };
            }
            GestureState::Idle => {
                if input.kind.hovers() {
                    self.update_hover(input.pos, input.time_ms, picker, &mut out);
                }
            }
        }
        out
    }

    pub fn pointer_down(&mut self, input: PointerInput) -> Dispatches {
        let mut out = Dispatches::new();
        out.push(Dispatch::StopInertia);
        self.suppress_click = false;
        self.gesture = match input.kind {
            PointerKind::Touch => GestureState::Pending {
                start: input.pos,
                start_ms: input.time_ms,
                last: input.pos,
            },
            kind => GestureState::Dragging {
                kind,
                start: input.pos,
                last: input.pos,
                last_delta: Vec2::ZERO,
                last_move_ms: input.time_ms,
                max_travel: 0.0,
            },
        };
        out
    }

    /// Finish the current gesture. Returns the classification alongside the
    /// commands to apply.
    pub fn pointer_up(&mut self, input: PointerInput) -> (GestureEnd, Dispatches) {
        let mut out = Dispatches::new();
        let end = match self.gesture {
            GestureState::Idle => GestureEnd::None,
            GestureState::Pending { start_ms, .. } => {
                if input.time_ms - start_ms <= self.config.tap_max_ms {
                    GestureEnd::Tap
                } else {
                    self.suppress_click = true;
                    GestureEnd::LongPress
                }
            }
            GestureState::Dragging {
                kind,
                start,
                last_delta,
                last_move_ms,
                max_travel,
                ..
            } => {
                // A drag that returns to its start point is still a drag.
                let travelled = max_travel.max(input.pos.distance(start));
                if kind == PointerKind::Touch || travelled > self.config.tap_slop_px {
                    self.suppress_click = true;
                    let idle = input.time_ms - last_move_ms > INERTIA_IDLE_MS;
                    let velocity_px = if self.config.inertia && !idle {
                        last_delta
                    } else {
                        Vec2::ZERO
                    };
                    out.push(Dispatch::Release { velocity_px });
                    GestureEnd::Drag
                } else {
                    GestureEnd::Press
                }
            }
        };
        self.gesture = GestureState::Idle;
        let idle_cursor = if self.hovered.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Grab
        };
        self.set_cursor(idle_cursor, &mut out);
        (end, out)
    }

    /// Pointer capture lost or gesture aborted by the platform.
    pub fn pointer_cancel(&mut self) -> Dispatches {
        let mut out = Dispatches::new();
        if matches!(self.gesture, GestureState::Dragging { .. }) {
            out.push(Dispatch::Release {
                velocity_px: Vec2::ZERO,
            });
        }
        self.gesture = GestureState::Idle;
        self.suppress_click = true;
        self.set_cursor(Cursor::Grab, &mut out);
        out
    }

    /// Mouse left the surface.
    pub fn pointer_leave(&mut self, time_ms: f64) -> Dispatches {
        let mut out = Dispatches::new();
        self.mouse_pos = None;
        if matches!(self.gesture, GestureState::Idle) {
            self.transition_hover(None, Vec2::ZERO, time_ms, &mut out);
        }
        out
    }

    /// Platform click (mouse) or tap (touch). Hit-tests exactly once unless
    /// the gesture that produced it was a drag or a long press.
    pub fn click(&mut self, input: PointerInput, picker: &impl HitTest) -> Dispatches {
        let mut out = Dispatches::new();
        if std::mem::take(&mut self.suppress_click) {
            return out;
        }
        if let Some(hit) = picker.hit_test(self.to_ndc(input.pos), &self.registered) {
            out.push(Dispatch::Activate(hit.target));
        }
        out
    }

    /// Per-frame housekeeping: re-probe hover under a resting mouse (the scene
    /// may have rotated beneath it) and expire the tooltip debounce.
    pub fn tick(&mut self, now_ms: f64, picker: &impl HitTest) -> Dispatches {
        let mut out = Dispatches::new();
        if let (Some(pos), GestureState::Idle) = (self.mouse_pos, self.gesture) {
            self.update_hover(pos, now_ms, picker, &mut out);
        }
        if let TooltipState::PendingHide { deadline_ms } = self.tooltip {
            if now_ms >= deadline_ms {
                self.tooltip = TooltipState::Hidden;
                out.push(Dispatch::HideTooltip);
            }
        }
        out
    }

    fn update_hover(
        &mut self,
        pos: Vec2,
        time_ms: f64,
        picker: &impl HitTest,
        out: &mut Dispatches,
    ) {
        let hit = picker
            .hit_test(self.to_ndc(pos), &self.registered)
            .map(|h| h.target);
        self.transition_hover(hit, pos, time_ms, out);
    }

    fn transition_hover(
        &mut self,
        next: Option<Interactable>,
        pos: Vec2,
        time_ms: f64,
        out: &mut Dispatches,
    ) {
        if next == self.hovered {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            out.push(Dispatch::HoverExit(prev));
            if let (Interactable::Indicator(_), TooltipState::Shown(_)) = (prev, self.tooltip) {
                self.tooltip = TooltipState::PendingHide {
                    deadline_ms: time_ms + self.config.tooltip_hide_delay_ms,
                };
            }
        }
        if let Some(target) = next {
            out.push(Dispatch::HoverEnter { target, pos });
            if let Interactable::Indicator(i) = target {
                self.tooltip = TooltipState::Shown(i);
            }
        }
        self.hovered = next;
        let cursor = if next.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Grab
        };
        self.set_cursor(cursor, out);
    }

    fn set_cursor(&mut self, cursor: Cursor, out: &mut Dispatches) {
        if self.cursor != cursor {
            self.cursor = cursor;
            out.push(Dispatch::Cursor(cursor));
        }
    }
}
