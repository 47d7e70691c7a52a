pub mod config;
pub mod types;

pub use config::{CameraConfig, EngineConfig, InputConfig};
pub use types::{BodyId, Color, EntityId, SceneId, Scope, SurfaceId};
