use bytemuck::{Pod, Zeroable};
use glam::DVec2;

use crate::api::types::{Color, SurfaceId};
use crate::renderer::traits::Renderer;

/// A single particle, owned by a [`ParticleEmitter`](super::emitter::ParticleEmitter).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    /// Remaining life, in the same units as `dt`.
    pub lifetime: f64,
    /// Circle radius.
    pub size: f64,
    /// Radius lost per unit of time.
    pub size_decay: f64,
    pub color: Color,
}

impl Particle {
    /// Advance particle physics. Returns false when expired.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.size -= self.size_decay * dt;
        self.lifetime -= dt;
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.size > 0.0 && self.lifetime > 0.0
    }

    pub fn draw<R: Renderer>(&self, renderer: &mut R, surface: SurfaceId) {
        renderer.fill_circle(surface, self.position, self.size, self.color);
    }

    pub fn to_instance(&self) -> ParticleInstance {
        ParticleInstance {
            position: [self.position.x as f32, self.position.y as f32],
            radius: self.size as f32,
            color: self.color,
        }
    }
}

/// GPU-ready particle record, 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub color: Color,
}
