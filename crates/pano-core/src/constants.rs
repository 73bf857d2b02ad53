// Shared geometry and tuning constants used by the core and the web frontend.
//
// Most of the interaction and compass numbers were tuned by feel; they are the
// defaults of `ViewerConfig` and can be overridden per viewer.

// Sphere layout
pub const SPHERE_RADIUS: f32 = 500.0; // panorama mesh radius
pub const HOTSPOT_RADIUS: f32 = 495.0; // area overlays sit just inside the panorama
pub const INDICATOR_RADIUS: f32 = 490.0; // markers sit in front of area overlays
pub const SPHERE_WIDTH_SEGMENTS: u32 = 60;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 40;

// Hotspot fill
pub const HOTSPOT_IDLE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const HOTSPOT_HOVER_COLOR: [f32; 3] = [0.26, 0.65, 0.96];
pub const HOTSPOT_OPACITY_MIN: f32 = 0.05;
pub const HOTSPOT_OPACITY_MAX: f32 = 0.4;
pub const HOTSPOT_OPACITY_HOVER: f32 = 0.6;
pub const HOTSPOT_PULSE_SPEED: f32 = 0.45; // opacity units per second

// Indicator sizing (world units at INDICATOR_RADIUS)
pub const INDICATOR_GLOW_RADIUS: f32 = 18.0;
pub const INDICATOR_RING_INNER: f32 = 10.0;
pub const INDICATOR_RING_OUTER: f32 = 12.5;
pub const INDICATOR_ICON_SIZE: f32 = 14.0;
pub const INDICATOR_DOT_RADIUS: f32 = 2.0;
pub const INDICATOR_DISC_SEGMENTS: u32 = 32;

// Indicator animation
pub const INDICATOR_PULSE_RATE: f32 = 2.0; // radians of pulse phase per second
pub const INDICATOR_HOVER_PULSE_RATE: f32 = 5.0;
pub const INDICATOR_PULSE_AMPLITUDE: f32 = 0.08; // fraction of base scale
pub const INDICATOR_HOVER_SCALE: f32 = 1.3;
pub const INDICATOR_RING_SPIN: f32 = 0.8; // radians per second
pub const INDICATOR_GLOW_OPACITY: f32 = 0.35;
pub const INDICATOR_GLOW_OPACITY_SWING: f32 = 0.15;

// Action palette
pub const COLOR_PANORAMA: [f32; 3] = [0.13, 0.59, 0.95]; // blue
pub const COLOR_VIDEO: [f32; 3] = [0.91, 0.12, 0.55]; // magenta
pub const COLOR_AUDIO: [f32; 3] = [1.0, 0.6, 0.0]; // orange
pub const COLOR_PDF: [f32; 3] = [0.61, 0.15, 0.69]; // purple
pub const COLOR_IMAGE: [f32; 3] = [0.0, 0.59, 0.53]; // teal
pub const COLOR_DEFAULT: [f32; 3] = [0.3, 0.69, 0.31]; // green

// Touch / pointer gestures
pub const TAP_SLOP_PX: f32 = 15.0; // movement beyond this promotes a touch to a drag
pub const TAP_MAX_MS: f64 = 500.0; // touches held longer are not taps
pub const DRAG_DEGREES_PER_PX: f32 = 0.2;
pub const INERTIA_DECAY: f32 = 0.92; // velocity multiplier per frame
pub const INERTIA_MIN_VELOCITY: f32 = 0.0005; // radians per frame
pub const INERTIA_IDLE_MS: f64 = 60.0; // a drag that paused this long before release has no momentum
pub const TOOLTIP_HIDE_DELAY_MS: f64 = 150.0;

// Camera
pub const FOV_DEFAULT_DEG: f32 = 75.0;
pub const FOV_MIN_DEG: f32 = 30.0;
pub const FOV_MAX_DEG: f32 = 100.0;
pub const PITCH_LIMIT_DEG: f32 = 85.0;
pub const INITIAL_YAW_DEG: f32 = 90.0; // image center (u = 0.5) when the north offset is zero
pub const KEY_ROTATE_STEP_DEG: f32 = 5.0;
pub const ZOOM_DEG_PER_WHEEL_UNIT: f32 = 0.05;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 2000.0;

// Compass stabilizer
pub const COMPASS_HISTORY_LEN: usize = 5;
pub const COMPASS_STILL_THRESHOLD_DEG: f32 = 0.5;
pub const COMPASS_BLEND: f32 = 0.15;
pub const COMPASS_STILL_BLEND: f32 = 0.05;
pub const COMPASS_HOLD_FRAMES: u32 = 10;
