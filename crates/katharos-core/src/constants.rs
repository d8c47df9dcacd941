use glam::Vec3;

// Shared effect tuning constants used by both web and native frontends.

// Falling relics (scroll-reactive spawner)
pub const MAX_RELICS: usize = 10; // hard cap on concurrent relics
pub const SPAWN_THRESHOLD: f32 = 15.0; // px of scroll per event before anything spawns
pub const SPAWN_VELOCITY_DIVISOR: f32 = 25.0; // px of scroll per spawned relic
pub const MAX_SPAWN_PER_EVENT: usize = 2;
pub const SPAWN_COOLDOWN_FRAMES: i32 = 4; // animation frames between spawn bursts
pub const RELIC_STEP_EVERY: u64 = 2; // kinematics run on every other frame (~30 fps)
pub const RELIC_SPAWN_Y: f32 = -50.0; // off-screen top, px
pub const RELIC_X_RANGE: (f32, f32) = (5.0, 95.0); // percent of viewport width
pub const RELIC_FALL_SPEED: (f32, f32) = (4.0, 9.0); // px per step
pub const RELIC_SPIN_XY: f32 = 6.0; // full span of X/Y spin speed, deg per step
pub const RELIC_SPIN_Z: f32 = 4.0; // full span of Z spin speed, deg per step
pub const RELIC_SIZE: (f32, f32) = (18.0, 40.0); // px
pub const RELIC_FADE_MARGIN: f32 = 100.0; // fade starts this far above the bottom edge
pub const RELIC_DISMISS_MARGIN: f32 = 50.0; // removed this far below the bottom edge
pub const RELIC_FADE_STEP: f32 = 0.025; // opacity lost per step while fading

pub const RELIC_PALETTE: [[f32; 4]; 3] = [
    [75.0 / 255.0, 72.0 / 255.0, 68.0 / 255.0, 0.8],  // weathered granite
    [65.0 / 255.0, 62.0 / 255.0, 58.0 / 255.0, 0.75], // basalt
    [85.0 / 255.0, 82.0 / 255.0, 78.0 / 255.0, 0.7],  // limestone
];

// Floating tablets
pub const TABLET_COUNT: usize = 5;
pub const TABLET_TIME_STEP: f32 = 0.016; // fallback dt when the frame delta is unknown
pub const TABLET_FLOAT_AMPLITUDE: f32 = 15.0; // px
pub const TABLET_WOBBLE_RATE: f32 = 0.25; // rad/s of the slow Y wobble
pub const TABLET_WOBBLE_AMPLITUDE: f32 = 5.0; // deg
pub const TABLET_SCROLL_DEPTH: f32 = 100.0; // px of depth gained over the full page
pub const TABLET_SCRUB_SECONDS: f32 = 2.0; // lag of the scroll-driven depth shift
pub const TABLET_SIZE: (f32, f32) = (80.0, 140.0);
pub const TABLET_X_RANGE: (f32, f32) = (10.0, 90.0);
pub const TABLET_Y_RANGE: (f32, f32) = (20.0, 80.0);
pub const TABLET_DEPTH_RANGE: (f32, f32) = (-300.0, -100.0);
pub const TABLET_FLOAT_SPEED: (f32, f32) = (0.5, 1.0);

pub const TABLET_INSCRIPTIONS: [&str; 5] = [
    "ΓΝΩΘΙ ΣΑΥΤΟΝ",
    "ΜΗΔΕΝ ΑΓΑΝ",
    "ΕΝ ΟΙΔΑ ΟΤΙ ΟΥΔΕΝ ΟΙΔΑ",
    "ΠΑΝΤΑ ΡΕΙ",
    "ΚΑΛΟΣ ΚΑΓΑΘΟΣ",
];

// Rain (world units)
pub const RAIN_MAX_DROPS: usize = 3000; // drop count at intensity 1.0
pub const RAIN_DEFAULT_INTENSITY: f32 = 0.5;
pub const RAIN_HALF_WIDTH: f32 = 20.0; // x and z span is [-20, 20]
pub const RAIN_START_HEIGHT: f32 = 30.0; // initial y is [0, 30)
pub const RAIN_FLOOR_Y: f32 = -10.0; // drops below this are recycled
pub const RAIN_RESPAWN_BAND: (f32, f32) = (20.0, 30.0);
pub const RAIN_FALL_SPEED: (f32, f32) = (0.5, 1.0); // world units per frame
pub const RAIN_DRIFT: Vec3 = Vec3::new(0.02, 0.0, 0.01); // wind, per frame
pub const RAIN_COLOR: [f32; 4] = [174.0 / 255.0, 194.0 / 255.0, 224.0 / 255.0, 1.0];

// Lightning
pub const LIGHTNING_INTERVAL_SEC: (f64, f64) = (8.0, 20.0); // jittered gap between strikes
pub const FLASH_PRIMARY_OPACITY: f32 = 0.8;
pub const FLASH_PRIMARY_HOLD_SEC: f64 = 0.05;
pub const FLASH_PRIMARY_FADE_SEC: f64 = 0.10;
pub const FLASH_SECONDARY_DELAY_SEC: f64 = 0.10; // after the primary
pub const FLASH_SECONDARY_OPACITY: f32 = 0.4;
pub const FLASH_SECONDARY_HOLD_SEC: f64 = 0.05;
pub const FLASH_SECONDARY_FADE_SEC: f64 = 0.05;
pub const THUNDER_DELAY_SEC: (f64, f64) = (0.2, 1.2); // sound lags the flash

// Thunder burst
pub const THUNDER_DURATION_SEC: f32 = 3.0;
pub const THUNDER_LOWPASS_HZ: f32 = 200.0;
pub const THUNDER_GAIN_START: f32 = 0.3;
pub const THUNDER_GAIN_END: f32 = 0.01;
pub const BROWN_NOISE_LEAK: f32 = 1.02;
pub const BROWN_NOISE_STEP: f32 = 0.02;
pub const BROWN_NOISE_GAIN: f32 = 3.5;

// Cursor
pub const CURSOR_SMOOTHING: f32 = 0.15; // ring lerp factor per frame
pub const CURSOR_RING_SIZE: f32 = 40.0; // px
pub const CURSOR_RING_SIZE_HOVER: f32 = 60.0;
pub const CURSOR_DOT_SIZE: f32 = 6.0;
pub const CURSOR_DOT_SIZE_HOVER: f32 = 8.0;
pub const CURSOR_GOLD: [f32; 4] = [201.0 / 255.0, 168.0 / 255.0, 76.0 / 255.0, 0.6];

// Click ripples
pub const MAX_RIPPLES: usize = 16;
pub const RIPPLE_LIFETIME_SEC: f64 = 1.5;
pub const RIPPLE_GROWTH: f32 = 5.0; // scale gained per second
pub const RIPPLE_OPACITY: f32 = 0.8;

// Ambient soundscape
pub const DRONE_HZ: f32 = 60.0;
pub const DRONE_GAIN: f32 = 0.05;
pub const WIND_LOWPASS_HZ: f32 = 400.0;
pub const WIND_GAIN_BASE: f32 = 0.02;
pub const WIND_GAIN_SCROLL: f32 = 0.04; // added at full scroll progress
pub const WIND_GAIN_UNMUTED: f32 = 0.03;
pub const MUTE_RAMP_TAU_SEC: f32 = 0.3;
pub const WIND_RAMP_TAU_SEC: f32 = 0.5;
pub const CRACKLE_INTERVAL_SEC: (f64, f64) = (0.5, 2.5);
pub const CRACKLE_HZ: (f32, f32) = (100.0, 300.0);
pub const CRACKLE_GAIN_START: f32 = 0.02;
pub const CRACKLE_GAIN_END: f32 = 0.001;
pub const CRACKLE_DURATION_SEC: f32 = 0.1;

// Rising embers (world units; the visible box is [-10, 10] on x and y)
pub const EMBER_COUNT: usize = 600;
pub const EMBER_BOX: Vec3 = Vec3::new(20.0, 20.0, 10.0); // spread of base positions
pub const EMBER_RISE_SPAN: f32 = 20.0; // rise wraps after this many units
pub const EMBER_RISE_SPEED: (f32, f32) = (0.2, 0.7); // units per second
pub const EMBER_SIZE: (f32, f32) = (1.0, 4.0);
pub const EMBER_SIZE_PX: f32 = 1.5; // px per size unit
pub const EMBER_SWAY: f32 = 0.3;
pub const EMBER_SWAY_RATE: (f32, f32) = (0.5, 0.3); // rad/s on x and z
pub const EMBER_POINTER_GAIN: f32 = 0.1;
pub const EMBER_POINTER_REACH: f32 = 2.0;
pub const EMBER_FADE_BAND: (f32, f32) = (0.0, 5.0); // height over which embers fade out
pub const EMBER_PALETTE: [[f32; 4]; 5] = [
    [232.0 / 255.0, 145.0 / 255.0, 58.0 / 255.0, 1.0],  // ember orange
    [201.0 / 255.0, 168.0 / 255.0, 76.0 / 255.0, 1.0],  // gold
    [139.0 / 255.0, 115.0 / 255.0, 85.0 / 255.0, 1.0],  // bronze
    [232.0 / 255.0, 228.0 / 255.0, 223.0 / 255.0, 1.0], // marble
    [77.0 / 255.0, 201.0 / 255.0, 246.0 / 255.0, 1.0],  // oracle blue
];

// Hover sparks (px)
pub const SPARK_COUNT: usize = 20;
pub const SPARK_UNIT_PX: f32 = 20.0; // px per world unit of the spark motion
pub const SPARK_RADIUS: f32 = 2.0; // sparks return to the anchor past this distance
pub const SPARK_SPEED_XZ: f32 = 0.1; // full span of sideways speed, units per frame
pub const SPARK_SPEED_UP: f32 = 0.1;
pub const SPARK_SIZE_PX: f32 = 3.0;

// Debate chatter
pub const CHATTER_VOICES: usize = 3;
pub const CHATTER_STAGGER_SEC: f64 = 0.2; // start offset between voices
pub const CHATTER_PAUSE_JITTER_SEC: f64 = 0.5;
pub const CHATTER_DETUNE_HZ: f32 = 40.0; // full span of per-phrase pitch variation
pub const CHATTER_VISIBLE_RATIO: f32 = 0.3; // share of the section on screen
/// (base Hz, duration s, pause s)
pub const CHATTER_PHRASES: [(f32, f32, f64); 5] = [
    (150.0, 0.4, 0.3),
    (120.0, 0.6, 0.2),
    (180.0, 0.3, 0.4),
    (100.0, 0.5, 0.3),
    (200.0, 0.35, 0.25),
];
pub const CHATTER_GLIDE: f32 = 0.8; // pitch ratio reached at 80% of the phrase
pub const CHATTER_BANDPASS_HZ: f32 = 800.0;
pub const CHATTER_BANDPASS_Q: f32 = 5.0;
pub const CHATTER_GAIN_PEAK: f32 = 0.03;
pub const CHATTER_ATTACK_SEC: f32 = 0.05;
pub const CHATTER_GAIN_END: f32 = 0.01;
pub const CHATTER_HARMONIC_RATIO: f32 = 1.5;
pub const CHATTER_HARMONIC_PEAK: f32 = 0.02;
pub const CHATTER_HARMONIC_ATTACK_SEC: f32 = 0.03;
pub const CHATTER_HARMONIC_END: f32 = 0.005;
