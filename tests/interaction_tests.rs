// Host-side tests for the pointer dispatcher: tap versus drag, hover and the
// tooltip debounce. A scripted picker stands in for the scene.

use glam::Vec2;
use pano_core::config::GestureConfig;
use pano_core::interaction::{Dispatch, Dispatcher, GestureState};
use pano_core::pick::{HitTest, PickHit};
use pano_core::{Cursor, GestureEnd, Interactable, PointerInput, PointerKind};
use std::cell::Cell;

struct Picker {
    hit: Cell<Option<Interactable>>,
    calls: Cell<usize>,
}

impl Picker {
    fn new(hit: Option<Interactable>) -> Self {
        Self {
            hit: Cell::new(hit),
            calls: Cell::new(0),
        }
    }
}

impl HitTest for Picker {
    fn hit_test(&self, _ndc: Vec2, candidates: &[Interactable]) -> Option<PickHit> {
        self.calls.set(self.calls.get() + 1);
        self.hit
            .get()
            .filter(|t| candidates.contains(t))
            .map(|target| PickHit {
                target,
                distance: 1.0,
            })
    }
}

const HOTSPOT: Interactable = Interactable::Hotspot(0);
const INDICATOR: Interactable = Interactable::Indicator(0);

fn dispatcher() -> Dispatcher {
    let mut d = Dispatcher::new(GestureConfig::default());
    d.resize(Vec2::new(800.0, 600.0));
    d.register(vec![HOTSPOT, INDICATOR]);
    d
}

fn touch(x: f32, y: f32, t: f64) -> PointerInput {
    PointerInput::new(PointerKind::Touch, Vec2::new(x, y), t)
}

fn mouse(x: f32, y: f32, t: f64) -> PointerInput {
    PointerInput::new(PointerKind::Mouse, Vec2::new(x, y), t)
}

fn count(out: &[Dispatch], pred: impl Fn(&Dispatch) -> bool) -> usize {
    out.iter().filter(|d| pred(d)).count()
}

#[test]
fn short_still_touch_is_a_tap_and_hit_tests_once() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(HOTSPOT));
    d.pointer_down(touch(100.0, 100.0, 0.0));
    let moved = d.pointer_move(touch(105.0, 102.0, 50.0), &picker);
    assert!(moved.is_empty(), "a touch inside the slop must not rotate");
    let (end, _) = d.pointer_up(touch(105.0, 102.0, 120.0));
    assert_eq!(end, GestureEnd::Tap);

    let out = d.click(touch(105.0, 102.0, 125.0), &picker);
    assert_eq!(out.as_slice(), &[Dispatch::Activate(HOTSPOT)]);
    assert_eq!(picker.calls.get(), 1);
}

#[test]
fn touch_past_slop_drags_and_never_activates() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(HOTSPOT));
    d.pointer_down(touch(100.0, 100.0, 0.0));
    let out = d.pointer_move(touch(140.0, 100.0, 30.0), &picker);
    assert!(out.contains(&Dispatch::Rotate(Vec2::new(40.0, 0.0))));
    assert!(out.contains(&Dispatch::Cursor(Cursor::Grabbing)));
    assert!(matches!(d.gesture(), GestureState::Dragging { .. }));

    let out = d.pointer_move(touch(150.0, 100.0, 40.0), &picker);
    assert_eq!(out.as_slice(), &[Dispatch::Rotate(Vec2::new(10.0, 0.0))]);

    let (end, out) = d.pointer_up(touch(150.0, 100.0, 50.0));
    assert_eq!(end, GestureEnd::Drag);
    assert!(out.contains(&Dispatch::Release {
        velocity_px: Vec2::new(10.0, 0.0)
    }));

    assert!(d.click(touch(150.0, 100.0, 55.0), &picker).is_empty());
    assert_eq!(picker.calls.get(), 0);
}

#[test]
fn long_press_is_not_a_tap() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(HOTSPOT));
    d.pointer_down(touch(10.0, 10.0, 0.0));
    let (end, _) = d.pointer_up(touch(10.0, 10.0, 900.0));
    assert_eq!(end, GestureEnd::LongPress);
    assert!(d.click(touch(10.0, 10.0, 905.0), &picker).is_empty());
    assert_eq!(picker.calls.get(), 0);
}

#[test]
fn suppression_only_swallows_one_click() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(HOTSPOT));
    d.pointer_down(mouse(0.0, 0.0, 0.0));
    d.pointer_move(mouse(100.0, 0.0, 10.0), &picker);
    let (end, _) = d.pointer_up(mouse(100.0, 0.0, 20.0));
    assert_eq!(end, GestureEnd::Drag);
    assert!(d.click(mouse(100.0, 0.0, 21.0), &picker).is_empty());
    assert_eq!(
        d.click(mouse(100.0, 0.0, 500.0), &picker).as_slice(),
        &[Dispatch::Activate(HOTSPOT)]
    );
}

#[test]
fn mouse_press_without_movement_still_clicks() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(INDICATOR));
    let down = d.pointer_down(mouse(50.0, 50.0, 0.0));
    assert_eq!(down.as_slice(), &[Dispatch::StopInertia]);
    let (end, out) = d.pointer_up(mouse(52.0, 50.0, 80.0));
    assert_eq!(end, GestureEnd::Press);
    assert_eq!(count(&out, |x| matches!(x, Dispatch::Release { .. })), 0);
    assert_eq!(
        d.click(mouse(52.0, 50.0, 81.0), &picker).as_slice(),
        &[Dispatch::Activate(INDICATOR)]
    );
}

#[test]
fn paused_drag_releases_without_momentum() {
    let mut d = dispatcher();
    let picker = Picker::new(None);
    d.pointer_down(mouse(0.0, 0.0, 0.0));
    d.pointer_move(mouse(60.0, 0.0, 10.0), &picker);
    let (_, out) = d.pointer_up(mouse(60.0, 0.0, 400.0));
    assert!(out.contains(&Dispatch::Release {
        velocity_px: Vec2::ZERO
    }));
}

#[test]
fn inertia_can_be_disabled() {
    let mut d = Dispatcher::new(GestureConfig {
        inertia: false,
        ..Default::default()
    });
    let picker = Picker::new(None);
    d.pointer_down(mouse(0.0, 0.0, 0.0));
    d.pointer_move(mouse(60.0, 0.0, 10.0), &picker);
    let (_, out) = d.pointer_up(mouse(60.0, 0.0, 12.0));
    assert!(out.contains(&Dispatch::Release {
        velocity_px: Vec2::ZERO
    }));
}

#[test]
fn click_with_nothing_registered_activates_nothing() {
    let mut d = dispatcher();
    d.clear();
    let picker = Picker::new(Some(HOTSPOT));
    assert!(d.click(mouse(1.0, 1.0, 0.0), &picker).is_empty());
}

#[test]
fn hover_enter_and_exit_switch_cursor() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(HOTSPOT));
    let out = d.pointer_move(mouse(400.0, 300.0, 0.0), &picker);
    assert_eq!(
        out.as_slice(),
        &[
            Dispatch::HoverEnter {
                target: HOTSPOT,
                pos: Vec2::new(400.0, 300.0)
            },
            Dispatch::Cursor(Cursor::Pointer),
        ]
    );
    // Same target again: nothing new.
    assert!(d.pointer_move(mouse(401.0, 300.0, 5.0), &picker).is_empty());

    picker.hit.set(None);
    let out = d.pointer_move(mouse(10.0, 10.0, 10.0), &picker);
    assert_eq!(
        out.as_slice(),
        &[Dispatch::HoverExit(HOTSPOT), Dispatch::Cursor(Cursor::Grab)]
    );
    assert_eq!(d.hovered(), None);
}

#[test]
fn touch_never_hovers() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(HOTSPOT));
    assert!(d.pointer_move(touch(400.0, 300.0, 0.0), &picker).is_empty());
    assert_eq!(picker.calls.get(), 0);
}

#[test]
fn tooltip_hides_once_after_the_debounce() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(INDICATOR));
    d.pointer_move(mouse(400.0, 300.0, 1000.0), &picker);
    assert!(d.tooltip_visible());

    picker.hit.set(None);
    let out = d.pointer_move(mouse(20.0, 20.0, 1000.0), &picker);
    assert_eq!(count(&out, |x| matches!(x, Dispatch::HoverExit(_))), 1);
    assert_eq!(count(&out, |x| matches!(x, Dispatch::HideTooltip)), 0);
    assert!(d.tooltip_visible());

    let early = d.tick(1100.0, &picker);
    assert_eq!(count(&early, |x| matches!(x, Dispatch::HideTooltip)), 0);

    let due = d.tick(1150.0, &picker);
    assert_eq!(count(&due, |x| matches!(x, Dispatch::HideTooltip)), 1);
    assert!(!d.tooltip_visible());

    let later = d.tick(1300.0, &picker);
    assert_eq!(count(&later, |x| matches!(x, Dispatch::HideTooltip)), 0);
    assert_eq!(count(&later, |x| matches!(x, Dispatch::HoverExit(_))), 0);
}

#[test]
fn returning_before_the_deadline_keeps_the_tooltip() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(INDICATOR));
    d.pointer_move(mouse(400.0, 300.0, 0.0), &picker);
    picker.hit.set(None);
    d.pointer_move(mouse(20.0, 20.0, 10.0), &picker);
    picker.hit.set(Some(INDICATOR));
    let back = d.pointer_move(mouse(400.0, 300.0, 60.0), &picker);
    assert_eq!(count(&back, |x| matches!(x, Dispatch::HoverEnter { .. })), 1);
    let out = d.tick(500.0, &picker);
    assert_eq!(count(&out, |x| matches!(x, Dispatch::HideTooltip)), 0);
    assert!(d.tooltip_visible());
}

#[test]
fn resting_mouse_is_reprobed_each_tick() {
    let mut d = dispatcher();
    let picker = Picker::new(None);
    d.pointer_move(mouse(400.0, 300.0, 0.0), &picker);
    // The scene rotated under the cursor.
    picker.hit.set(Some(HOTSPOT));
    let out = d.tick(16.0, &picker);
    assert!(out.contains(&Dispatch::Cursor(Cursor::Pointer)));
    assert_eq!(d.hovered(), Some(HOTSPOT));

    d.pointer_leave(20.0);
    let calls = picker.calls.get();
    d.tick(32.0, &picker);
    assert_eq!(picker.calls.get(), calls, "no probing once the mouse left");
    assert_eq!(d.hovered(), None);
}

#[test]
fn cancel_suppresses_the_trailing_click() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(HOTSPOT));
    d.pointer_down(mouse(0.0, 0.0, 0.0));
    let out = d.pointer_cancel();
    assert!(out.contains(&Dispatch::Release {
        velocity_px: Vec2::ZERO
    }));
    assert!(d.click(mouse(0.0, 0.0, 5.0), &picker).is_empty());
    assert_eq!(d.gesture(), GestureState::Idle);
}

#[test]
fn ndc_mapping_covers_the_surface() {
    let d = dispatcher();
    assert_eq!(d.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    assert_eq!(d.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
    assert_eq!(d.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
}

#[test]
fn pointer_type_strings() {
    assert_eq!(PointerKind::from_pointer_type("touch"), PointerKind::Touch);
    assert_eq!(PointerKind::from_pointer_type("pen"), PointerKind::Pen);
    assert_eq!(PointerKind::from_pointer_type("mouse"), PointerKind::Mouse);
    assert_eq!(PointerKind::from_pointer_type(""), PointerKind::Mouse);
}

#[test]
fn drag_that_returns_to_its_start_is_still_a_drag() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(HOTSPOT));
    d.pointer_down(mouse(400.0, 300.0, 0.0));
    for (i, x) in [500.0, 600.0, 500.0, 405.0].into_iter().enumerate() {
        d.pointer_move(mouse(x, 300.0, 10.0 * (i + 1) as f64), &picker);
    }
    let (end, _) = d.pointer_up(mouse(405.0, 300.0, 50.0));
    assert_eq!(end, GestureEnd::Drag);
    assert!(d.click(mouse(405.0, 300.0, 51.0), &picker).is_empty());
    assert_eq!(picker.calls.get(), 0);
}

#[test]
fn touch_promotion_catches_up_on_held_back_movement() {
    let mut d = dispatcher();
    let picker = Picker::new(None);
    d.pointer_down(touch(100.0, 100.0, 0.0));
    assert!(d.pointer_move(touch(110.0, 100.0, 10.0), &picker).is_empty());
    let out = d.pointer_move(touch(120.0, 100.0, 20.0), &picker);
    // The whole displacement since touch-down, not just the last step.
    assert!(out.contains(&Dispatch::Rotate(Vec2::new(20.0, 0.0))));
    let (_, out) = d.pointer_up(touch(120.0, 100.0, 25.0));
    assert!(out.contains(&Dispatch::Release {
        velocity_px: Vec2::new(10.0, 0.0)
    }));
}

#[test]
fn replacing_the_object_set_restores_the_grab_cursor() {
    let mut d = dispatcher();
    let picker = Picker::new(Some(INDICATOR));
    d.pointer_move(mouse(400.0, 300.0, 0.0), &picker);
    assert_eq!(d.cursor(), Cursor::Pointer);

    let out = d.clear();
    assert_eq!(out.as_slice(), &[Dispatch::Cursor(Cursor::Grab)]);
    let out = d.register(vec![HOTSPOT]);
    assert!(out.is_empty());

    picker.hit.set(None);
    assert!(d.pointer_move(mouse(10.0, 10.0, 5.0), &picker).is_empty());
    assert_eq!(d.cursor(), Cursor::Grab);
    assert_eq!(d.hovered(), None);
}
