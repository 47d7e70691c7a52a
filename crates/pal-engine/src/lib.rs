pub mod api;
pub mod core;
pub mod components;
pub mod spatial;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{CameraConfig, EngineConfig, InputConfig};
pub use api::types::{BodyId, Color, EntityId, SceneId, Scope, SurfaceId};
pub use crate::core::rect::Rect;
pub use crate::core::rng::Rng;
pub use crate::core::scene::{Scene, SortKey};
pub use components::animation::{FrameList, SpriteImage};
pub use components::emitter::ParticleEmitter;
pub use components::particle::{Particle, ParticleInstance};
pub use components::sprite::Sprite;
pub use spatial::body::{BodyCallback, BodyDesc, BodyKind, OverlapEvent, OverlapKind, OwnerPositions, SpatialBody};
pub use spatial::registry::BodyRegistry;
pub use renderer::camera::Camera;
pub use renderer::recorder::{DrawCommand, RecordingRenderer};
pub use renderer::traits::Renderer;
pub use input::queue::{InputEvent, InputQueue, KeyCode, MouseButton};
pub use input::state::{ButtonTracker, InputState, PressState};

// Extensions: decoupled optional systems
pub use extensions::{
    easing::{ease, ease_vec2, lerp},
    Animator, Easing, Tween, TweenId, TweenLoop, TweenValue,
};
