// Pure pointer and page helpers for the web front-end. Kept free of web-sys so
// the host-side tests can include this file directly.

use glam::Vec2;

/// Pixels per wheel "line" when the browser reports `DOM_DELTA_LINE`.
const WHEEL_LINE_PX: f64 = 16.0;

/// Pointer position relative to the surface's client rect, in CSS pixels.
#[inline]
pub fn client_to_surface(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Vec2 {
    Vec2::new((client_x - rect_left) as f32, (client_y - rect_top) as f32)
}

/// Backing-store size for a CSS size at a device pixel ratio; never zero.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let w = (css_width.max(0.0) * dpr).round() as u32;
    let h = (css_height.max(0.0) * dpr).round() as u32;
    (w.max(1), h.max(1))
}

/// Wheel delta in pixels whatever the event's `deltaMode`
/// (0 = pixels, 1 = lines, 2 = pages).
#[inline]
pub fn wheel_pixels(delta: f64, delta_mode: u32, page_height: f64) -> f32 {
    let px = match delta_mode {
        1 => delta * WHEEL_LINE_PX,
        2 => delta * page_height.max(1.0),
        _ => delta,
    };
    px as f32
}

/// Media targets come from authored content; refuse script URLs before they
/// reach an `src` attribute.
pub fn is_safe_media_uri(uri: &str) -> bool {
    let trimmed = uri.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lower: String = trimmed
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    !["javascript:", "vbscript:", "data:text/html"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Return `search` (with or without the leading `?`) with `key` set to
/// `value`. Other parameters keep their order; repeated `key`s collapse.
pub fn with_query_param(search: &str, key: &str, value: &str) -> String {
    let mut pairs: Vec<String> = search
        .trim_start_matches('?')
        .split('&')
        .filter(|p| !p.is_empty())
        .filter(|p| p.split('=').next() != Some(key))
        .map(str::to_string)
        .collect();
    pairs.push(format!("{}={}", key, encode_component(value)));
    format!("?{}", pairs.join("&"))
}

/// CSS transform for a compass rose so that the needle keeps pointing north.
#[inline]
pub fn compass_transform(heading_deg: f32) -> String {
    format!("rotate({:.1}deg)", -heading_deg)
}
