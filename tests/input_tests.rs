// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn client_point_is_relative_to_the_surface() {
    let p = client_to_surface(150.0, 80.0, 100.0, 30.0);
    assert_eq!(p, glam::Vec2::new(50.0, 50.0));
}

#[test]
fn backing_size_scales_by_device_pixel_ratio() {
    assert_eq!(backing_size(400.0, 300.0, 2.0), (800, 600));
    assert_eq!(backing_size(401.3, 299.6, 1.0), (401, 300));
}

#[test]
fn backing_size_is_never_zero() {
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
    assert_eq!(backing_size(-5.0, 10.0, 1.0), (1, 10));
    // Bogus ratios fall back to 1.
    assert_eq!(backing_size(10.0, 10.0, 0.0), (10, 10));
    assert_eq!(backing_size(10.0, 10.0, f64::NAN), (10, 10));
}

#[test]
fn wheel_delta_modes() {
    assert_eq!(wheel_pixels(3.0, 0, 600.0), 3.0);
    assert_eq!(wheel_pixels(3.0, 1, 600.0), 48.0);
    assert_eq!(wheel_pixels(-1.0, 2, 600.0), -600.0);
}

#[test]
fn script_uris_are_refused() {
    assert!(!is_safe_media_uri("javascript:alert(1)"));
    assert!(!is_safe_media_uri("  JavaScript:alert(1)"));
    assert!(!is_safe_media_uri("java\tscript:alert(1)"));
    assert!(!is_safe_media_uri("vbscript:msgbox"));
    assert!(!is_safe_media_uri("data:text/html,<b>x</b>"));
    assert!(!is_safe_media_uri("   "));
}

#[test]
fn ordinary_media_uris_are_allowed() {
    assert!(is_safe_media_uri("https://cdn.test/video.mp4"));
    assert!(is_safe_media_uri("/media/audio.mp3"));
    assert!(is_safe_media_uri("docs/manual.pdf"));
    assert!(is_safe_media_uri("data:image/png;base64,AAAA"));
}

#[test]
fn query_param_is_added() {
    assert_eq!(with_query_param("", "panorama", "lobby"), "?panorama=lobby");
    assert_eq!(
        with_query_param("?lang=en", "panorama", "lobby"),
        "?lang=en&panorama=lobby"
    );
}

#[test]
fn query_param_is_replaced_not_duplicated() {
    assert_eq!(
        with_query_param("?panorama=a&lang=en&panorama=b", "panorama", "c"),
        "?lang=en&panorama=c"
    );
    // Keys that merely share a prefix are kept.
    assert_eq!(
        with_query_param("panoramas=2", "panorama", "c"),
        "?panoramas=2&panorama=c"
    );
}

#[test]
fn query_value_is_percent_encoded() {
    assert_eq!(
        with_query_param("", "panorama", "hall 2/é"),
        "?panorama=hall%202%2F%C3%A9"
    );
}

#[test]
fn compass_rose_counter_rotates() {
    assert_eq!(compass_transform(90.0), "rotate(-90.0deg)");
    assert_eq!(compass_transform(0.0), "rotate(-0.0deg)");
}
