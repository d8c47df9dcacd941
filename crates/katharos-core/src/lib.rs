pub mod ambient;
pub mod audio;
pub mod cadence;
pub mod chatter;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod embers;
pub mod error;
pub mod lightning;
pub mod pool;
pub mod rain;
pub mod random;
pub mod relics;
pub mod render;
pub mod ripples;
pub mod scene;
pub mod signals;
pub mod sparks;
pub mod subscribe;
pub mod tablets;

pub use ambient::AmbientSoundscape;
pub use audio::{
    brown_noise, exponential_gain_at, white_noise, AmbientBed, AudioBackend, AudioRequest,
    ChatterVoice, CrackleBurst, NoiseKind, SharedAudio, ThunderBurst, Waveform,
};
pub use cadence::Cadence;
pub use chatter::{phrase_gap_bounds, DebateChatter};
pub use config::EffectsConfig;
pub use constants::*;
pub use cursor::{is_interactive, is_interactive_element, CursorFollower, HoverTarget};
pub use embers::{Ember, EmberField};
pub use error::{FxError, FxResult};
pub use lightning::{Flash, Lightning, Strike};
pub use pool::{EntityId, IdAllocator, Pool};
pub use rain::{drop_count, RainField, Raindrop};
pub use relics::{Phase, Relic, RelicSpawner};
pub use render::{css_rgba, AssetSlot, DrawHint, Layer, RenderInstance, Resolved, SpriteId};
pub use ripples::{Ripple, RippleField};
pub use scene::{FrameOutput, Scene, SceneStats};
pub use signals::{scroll_progress, FrameSignals, PointerSignal, Scrub, Viewport};
pub use sparks::{Spark, SparkField};
pub use subscribe::{is_valid_email, SubmitOutcome, SubscriberList};
pub use tablets::{Tablet, TabletField, TabletPose};
