// Host-side tests for the compass heading stabilizer.

use pano_core::compass::{
    angle_to_vector, angular_distance, normalize_degrees, vector_to_angle, CompassStabilizer,
};
use pano_core::config::CompassConfig;

fn stabilizer() -> CompassStabilizer {
    CompassStabilizer::new(CompassConfig::default())
}

fn circular_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[test]
fn normalize_wraps_into_range() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(725.0), 5.0);
    let tiny = normalize_degrees(-1e-6);
    assert!((0.0..360.0).contains(&tiny));
}

#[test]
fn vector_helpers_agree() {
    for deg in [0.0_f32, 45.0, 179.0, 270.0, 359.5] {
        assert!(circular_diff(vector_to_angle(angle_to_vector(deg)), deg) < 1e-3);
    }
    let d = angular_distance(angle_to_vector(350.0), angle_to_vector(10.0));
    assert!((d - 20.0).abs() < 1e-3);
}

#[test]
fn constant_input_freezes_after_hold_frames() {
    let mut c = stabilizer();
    let yaw = 42.0_f32.to_radians();
    let first = c.sample(yaw);
    assert!(circular_diff(first, 42.0) < 1e-3);
    for _ in 0..CompassConfig::default().hold_frames {
        c.sample(yaw);
    }
    assert!(c.is_frozen());
    assert!(circular_diff(c.heading(), 42.0) < 1e-3);
}

#[test]
fn small_jitter_keeps_heading_frozen() {
    let mut c = stabilizer();
    let base = 120.0_f32;
    for _ in 0..20 {
        c.sample(base.to_radians());
    }
    assert!(c.is_frozen());
    let frozen = c.heading();
    for i in 0..50 {
        let jitter = if i % 2 == 0 { 0.2 } else { -0.2 };
        let shown = c.sample((base + jitter).to_radians());
        assert_eq!(shown, frozen, "heading moved on jitter frame {i}");
    }
}

#[test]
fn large_turn_converges_monotonically_without_overshoot() {
    let mut c = stabilizer();
    let start = 10.0_f32;
    let end = 100.0_f32;
    for _ in 0..20 {
        c.sample(start.to_radians());
    }
    let mut prev = c.heading();
    for frame in 0..200 {
        let h = c.sample(end.to_radians());
        assert!(h + 1e-3 >= prev, "heading went backwards at frame {frame}: {prev} -> {h}");
        assert!(h <= end + 1e-3, "overshoot at frame {frame}: {h}");
        prev = h;
    }
    assert!((prev - end).abs() < 0.5, "did not settle: {prev}");
    assert!(c.is_frozen());
}

#[test]
fn crossing_north_takes_the_short_way() {
    let mut c = stabilizer();
    for _ in 0..20 {
        c.sample(350.0_f32.to_radians());
    }
    for _ in 0..5 {
        let h = c.sample(10.0_f32.to_radians());
        // Never swings through the south.
        assert!(circular_diff(h, 0.0) <= 10.0 + 1e-3, "{h}");
    }
}

#[test]
fn unfiltered_mode_follows_the_target() {
    let mut c = CompassStabilizer::new(CompassConfig {
        smoothing: false,
        history_len: 1,
        ..Default::default()
    });
    c.sample(0.0);
    let h = c.sample(90.0_f32.to_radians());
    assert!(circular_diff(h, 90.0) < 1e-3);
}

#[test]
fn north_offset_shifts_heading_and_restarts_filter() {
    let mut c = stabilizer();
    for _ in 0..20 {
        c.sample(0.0);
    }
    c.set_north_offset(30.0);
    assert!(!c.is_frozen());
    let h = c.sample(0.0);
    assert!(circular_diff(h, 30.0) < 1e-3);
    assert!(circular_diff(c.raw_heading(10.0_f32.to_radians()), 40.0) < 1e-3);
}

#[test]
fn capture_makes_current_view_north() {
    let mut c = stabilizer();
    let yaw = 75.0_f32.to_radians();
    let offset = c.capture_north(yaw);
    assert!(circular_diff(offset, 285.0) < 1e-3);
    assert!(circular_diff(c.sample(yaw), 0.0) < 1e-3);
}

#[test]
fn non_finite_offset_and_yaw_are_ignored() {
    let mut c = stabilizer();
    c.set_north_offset(f32::NAN);
    assert_eq!(c.north_offset(), 0.0);
    let h = c.sample(20.0_f32.to_radians());
    assert_eq!(c.sample(f32::NAN), h);
}

#[test]
fn reset_forgets_offset() {
    let mut c = stabilizer();
    c.set_north_offset(90.0);
    c.sample(0.0);
    c.reset();
    assert_eq!(c.north_offset(), 0.0);
    assert_eq!(c.heading(), 0.0);
    assert_eq!(c.stable_frames(), 0);
}

#[test]
fn unfiltered_mode_follows_small_moves_until_it_freezes() {
    let mut c = CompassStabilizer::new(CompassConfig {
        smoothing: false,
        history_len: 1,
        ..Default::default()
    });
    c.sample(0.0);
    // Below the stillness threshold but before the hold engages.
    let h = c.sample(0.3_f32.to_radians());
    assert!(circular_diff(h, 0.3) < 1e-3, "{h}");
    for _ in 0..CompassConfig::default().hold_frames {
        c.sample(0.3_f32.to_radians());
    }
    assert!(c.is_frozen());
    assert_eq!(c.sample(0.1_f32.to_radians()), c.heading());
    assert!(circular_diff(c.heading(), 0.3) < 1e-3);
}
