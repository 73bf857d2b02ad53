// Host-side tests for hotspot and indicator construction and ray picking.

use glam::{Quat, Vec3};
use pano_core::config::{HotspotStyle, IndicatorStyle};
use pano_core::hotspot::build_hotspot;
use pano_core::indicator::{action_color, build_indicator, fallback_glyph, IconSpec};
use pano_core::pick::{nearer, ray_sphere, ray_triangle, PickHit, Ray};
use pano_core::sphere::{uv_to_direction, HOTSPOT_RADIUS, INDICATOR_RADIUS};
use pano_core::{
    ActionType, HotspotDescriptor, HotspotError, IndicatorDescriptor, IndicatorError,
    Interactable, UvPoint,
};

fn square(id: &str, u: f32, v: f32, half: f32) -> HotspotDescriptor {
    HotspotDescriptor {
        id: id.to_string(),
        points: vec![
            UvPoint::new(u - half, v - half),
            UvPoint::new(u + half, v - half),
            UvPoint::new(u + half, v + half),
            UvPoint::new(u - half, v + half),
        ],
        title: "Square".to_string(),
        ..Default::default()
    }
}

fn indicator(action_type: &str, position: Vec3) -> IndicatorDescriptor {
    IndicatorDescriptor {
        id: "ind".to_string(),
        position,
        title: String::new(),
        action_type: action_type.to_string(),
        target: "t".to_string(),
        icon_type: "door".to_string(),
    }
}

#[test]
fn hotspot_anchor_lies_on_its_sphere() {
    let h = build_hotspot(&square("a", 0.3, 0.6, 0.03), HOTSPOT_RADIUS, &HotspotStyle::default())
        .unwrap();
    assert!((h.anchor.length() - HOTSPOT_RADIUS).abs() < 1e-2);
    // Anchor points roughly at the polygon's image-space center.
    let center = uv_to_direction(0.3, 0.6);
    assert!(h.anchor.normalize().dot(center) > 0.999);
    assert!(h.mesh.triangle_count() >= 2);
    assert_eq!(h.outline.first(), h.outline.last());
}

#[test]
fn center_ray_hits_hotspot_fill() {
    let h = build_hotspot(&square("a", 0.5, 0.5, 0.02), HOTSPOT_RADIUS, &HotspotStyle::default())
        .unwrap();
    let ray = Ray::new(Vec3::ZERO, h.anchor);
    let t = h.intersect(&ray).expect("ray through the anchor must hit");
    assert!((t - HOTSPOT_RADIUS).abs() < 0.5, "t = {t}");

    let away = Ray::new(Vec3::ZERO, -h.anchor);
    assert_eq!(h.intersect(&away), None);
}

#[test]
fn hotspot_with_two_points_is_rejected() {
    let mut d = square("short", 0.5, 0.5, 0.02);
    d.points.truncate(2);
    let err = build_hotspot(&d, HOTSPOT_RADIUS, &HotspotStyle::default()).unwrap_err();
    assert_eq!(
        err,
        HotspotError::TooFewPoints {
            id: "short".to_string(),
            count: 2
        }
    );
}

#[test]
fn collinear_hotspot_is_degenerate() {
    let d = HotspotDescriptor {
        id: "line".to_string(),
        points: vec![
            UvPoint::new(0.4, 0.5),
            UvPoint::new(0.5, 0.5),
            UvPoint::new(0.6, 0.5),
        ],
        ..Default::default()
    };
    let err = build_hotspot(&d, HOTSPOT_RADIUS, &HotspotStyle::default()).unwrap_err();
    assert!(matches!(err, HotspotError::Degenerate { .. }), "{err:?}");
}

#[test]
fn non_finite_point_is_reported_with_its_index() {
    let mut d = square("nan", 0.5, 0.5, 0.02);
    d.points[2].v = f32::NAN;
    let err = build_hotspot(&d, HOTSPOT_RADIUS, &HotspotStyle::default()).unwrap_err();
    assert_eq!(
        err,
        HotspotError::NonFinite {
            id: "nan".to_string(),
            index: 2
        }
    );
}

#[test]
fn indicator_is_normalized_onto_its_sphere() {
    let ind = build_indicator(
        &indicator("video", Vec3::new(0.0, 0.0, 42.0)),
        INDICATOR_RADIUS,
        &IndicatorStyle::default(),
    )
    .unwrap();
    assert!((ind.anchor - Vec3::Z * INDICATOR_RADIUS).length() < 1e-3);
    assert_eq!(ind.action, Some(ActionType::Video));
    assert_eq!(ind.color, action_color(Some(ActionType::Video)));
    // Billboarded towards the sphere center.
    let facing = ind.orientation * Vec3::Z;
    assert!(facing.dot(-Vec3::Z) > 0.999);
}

#[test]
fn indicator_without_direction_is_rejected() {
    let err = build_indicator(
        &indicator("video", Vec3::ZERO),
        INDICATOR_RADIUS,
        &IndicatorStyle::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        IndicatorError::NoDirection {
            id: "ind".to_string()
        }
    );
}

#[test]
fn unknown_action_still_builds_with_default_look() {
    let ind = build_indicator(
        &indicator("hologram", Vec3::X),
        INDICATOR_RADIUS,
        &IndicatorStyle::default(),
    )
    .unwrap();
    assert_eq!(ind.action, None);
    assert_eq!(ind.color, action_color(None));
    assert_eq!(ind.icon.glyph, fallback_glyph(None));
    assert_eq!(ind.tooltip(), "");
}

#[test]
fn action_types_parse_case_insensitively() {
    for action in ActionType::ALL {
        let upper = action.as_str().to_ascii_uppercase();
        assert_eq!(upper.parse::<ActionType>().unwrap(), action);
    }
    assert!("hologram".parse::<ActionType>().is_err());
    assert!(!ActionType::Panorama.is_media());
    assert!(ActionType::Pdf.is_media());
}

#[test]
fn every_action_has_its_own_color() {
    let mut colors: Vec<[f32; 3]> = ActionType::ALL
        .iter()
        .map(|a| action_color(Some(*a)))
        .collect();
    colors.push(action_color(None));
    for (i, a) in colors.iter().enumerate() {
        for b in &colors[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn icon_asset_needs_a_base_uri() {
    let d = indicator("audio", Vec3::X);
    let plain = IconSpec::for_indicator(&d, Some(ActionType::Audio), &IndicatorStyle::default());
    assert_eq!(plain.asset, None);
    let style = IndicatorStyle {
        icon_base: Some("/icons/".to_string()),
        ..Default::default()
    };
    let with_base = IconSpec::for_indicator(&d, Some(ActionType::Audio), &style);
    assert_eq!(with_base.asset.as_deref(), Some("/icons/door.png"));
}

#[test]
fn indicator_pick_sphere_surrounds_the_anchor() {
    let style = IndicatorStyle::default();
    let ind = build_indicator(&indicator("image", Vec3::X), INDICATOR_RADIUS, &style).unwrap();
    let hit = ind.intersect(&Ray::new(Vec3::ZERO, Vec3::X), &style).unwrap();
    assert!(hit < INDICATOR_RADIUS);
    let off = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.5, 0.0));
    assert_eq!(ind.intersect(&off, &style), None);
}

#[test]
fn ray_primitives() {
    assert_eq!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(5.0, 0.0, 0.0), 1.0), Some(4.0));
    assert_eq!(ray_sphere(Vec3::ZERO, Vec3::Y, Vec3::new(5.0, 0.0, 0.0), 1.0), None);
    // Origin inside the sphere.
    assert_eq!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::ZERO, 1.0), None);

    let tri = [
        Vec3::new(2.0, -1.0, -1.0),
        Vec3::new(2.0, 1.0, -1.0),
        Vec3::new(2.0, 0.0, 1.0),
    ];
    let t = ray_triangle(&Ray::new(Vec3::ZERO, Vec3::X), &tri).unwrap();
    assert!((t - 2.0).abs() < 1e-5);
    assert_eq!(ray_triangle(&Ray::new(Vec3::ZERO, -Vec3::X), &tri), None);
}

#[test]
fn nearer_keeps_the_first_on_ties() {
    let a = PickHit {
        target: Interactable::Hotspot(0),
        distance: 3.0,
    };
    let b = PickHit {
        target: Interactable::Indicator(0),
        distance: 3.0,
    };
    let c = PickHit {
        target: Interactable::Indicator(1),
        distance: 1.0,
    };
    assert_eq!(nearer(Some(a), Some(b)), Some(a));
    assert_eq!(nearer(Some(a), Some(c)), Some(c));
    assert_eq!(nearer(None, Some(b)), Some(b));
    assert_eq!(nearer(Some(a), None), Some(a));
}

#[test]
fn ray_into_rotated_frame() {
    let rot = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let ray = Ray::new(Vec3::ZERO, rot * Vec3::X);
    let local = ray.into_frame(rot);
    assert!((local.dir - Vec3::X).length() < 1e-5);
}
