// Page wiring and presentation constants for the browser front-end.
// Simulation tuning lives in `katharos_core::constants`.

// Element ids the page is expected to provide
pub const EFFECTS_CANVAS_ID: &str = "katharos-effects";
pub const TABLET_LAYER_ID: &str = "katharos-tablets";
pub const FLASH_OVERLAY_ID: &str = "katharos-flash";
pub const CURSOR_DOT_ID: &str = "katharos-cursor-dot";
pub const CURSOR_RING_ID: &str = "katharos-cursor-ring";
pub const MUTE_BUTTON_ID: &str = "katharos-mute";

// Waitlist modal
pub const MODAL_ID: &str = "waitlist-modal";
pub const MODAL_OPEN_ID: &str = "waitlist-open";
pub const MODAL_CLOSE_ID: &str = "waitlist-close";
pub const MODAL_FORM_ID: &str = "waitlist-form";
pub const MODAL_EMAIL_ID: &str = "waitlist-email";
pub const MODAL_MESSAGE_ID: &str = "waitlist-message";
/// Delay before a submitted modal closes and clears itself.
pub const MODAL_RESET_MS: i32 = 3000;

/// Section whose visibility drives the debate chatter.
pub const CHATTER_SECTION_SELECTOR: &str = ".dojo-content";

/// Class toggled on `<body>` while the custom cursor is active.
pub const CURSOR_ACTIVE_CLASS: &str = "katharos-cursor-active";
pub const CURSOR_HOVER_CLASS: &str = "hovering";
pub const HIDDEN_CLASS: &str = "hidden";

// Stacking order of the overlays (CSS z-index)
pub const Z_TABLETS: i32 = 1;
pub const Z_EFFECTS_CANVAS: i32 = 5;
pub const Z_FLASH: i32 = 40;
pub const Z_CURSOR: i32 = 9999;

/// Relic artwork; a failed load falls back to procedural blocks.
pub const RELIC_SPRITE_URL: &str = "/images/relic.png";

/// Perspective applied to the tablet layer (px).
pub const TABLET_PERSPECTIVE_PX: f32 = 1000.0;

// Procedural relic block shading
pub const RELIC_EDGE_ALPHA: f32 = 0.6;
pub const RELIC_FACE_LIGHTEN: f32 = 0.15;

/// Rain streak stroke width (px).
pub const RAIN_STROKE_WIDTH: f64 = 1.0;
/// Opacity bands rain is batched into; one stroke call per band.
pub const RAIN_OPACITY_BUCKETS: usize = 16;

/// Ember glow radius as a multiple of its core size.
pub const EMBER_GLOW_SPREAD: f64 = 2.5;

/// Ripple stroke width (px) and base radius before scaling.
pub const RIPPLE_STROKE_WIDTH: f64 = 1.5;
pub const RIPPLE_BASE_RADIUS: f64 = 10.0;

/// Flash overlay tint.
pub const FLASH_COLOR: [f32; 4] = [0.95, 0.97, 1.0, 1.0];

/// Media query that identifies touch-first devices.
pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";

/// Clamp on per-frame dt so a backgrounded tab does not produce one huge step.
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
