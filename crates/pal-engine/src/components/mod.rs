pub mod animation;
pub mod emitter;
pub mod particle;
pub mod sprite;

pub use animation::{FrameList, SpriteImage};
pub use emitter::ParticleEmitter;
pub use particle::{Particle, ParticleInstance};
pub use sprite::Sprite;
