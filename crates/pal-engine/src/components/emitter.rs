use glam::DVec2;

use crate::api::types::{Color, SurfaceId};
use crate::components::particle::{Particle, ParticleInstance};
use crate::core::rng::Rng;
use crate::renderer::traits::Renderer;

/// Emits particles from a (possibly moving) rectangle for the duration of its lifetime.
///
/// Time is measured in whatever unit the host passes as `dt`; particle delay is counted
/// in updates.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    /// Top-left of the emission area.
    pub position: DVec2,
    /// Particles spawn uniformly inside `position..position + size`.
    pub size: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    /// Remaining emission time. `None` emits forever.
    pub lifetime: Option<f64>,
    /// Updates between emissions.
    pub particle_delay: u32,
    pub particle_velocity: (DVec2, DVec2),
    pub particle_acceleration: (DVec2, DVec2),
    pub particle_lifetime: f64,
    pub particle_size: f64,
    pub particle_size_decay: f64,
    /// Each particle picks a colour from this palette.
    pub palette: Vec<Color>,
    particles: Vec<Particle>,
    since_last: u32,
    finished: bool,
    rng: Rng,
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            size: DVec2::ZERO,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            lifetime: Some(100.0),
            particle_delay: 5,
            particle_velocity: (DVec2::splat(-1.0), DVec2::splat(1.0)),
            particle_acceleration: (DVec2::ZERO, DVec2::ZERO),
            particle_lifetime: 100.0,
            particle_size: 20.0,
            particle_size_decay: 0.2,
            palette: vec![Color::WHITE],
            particles: Vec::new(),
            since_last: 0,
            finished: false,
            rng: Rng::new(0x5EED),
        }
    }
}

impl ParticleEmitter {
    pub fn new(position: DVec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    // -- Builder pattern --

    pub fn with_size(mut self, size: DVec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_motion(mut self, velocity: DVec2, acceleration: DVec2) -> Self {
        self.velocity = velocity;
        self.acceleration = acceleration;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f64) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    pub fn forever(mut self) -> Self {
        self.lifetime = None;
        self
    }

    pub fn with_particle_delay(mut self, delay: u32) -> Self {
        self.particle_delay = delay;
        self
    }

    pub fn with_particle_velocity(mut self, min: DVec2, max: DVec2) -> Self {
        self.particle_velocity = (min, max);
        self
    }

    pub fn with_particle_acceleration(mut self, min: DVec2, max: DVec2) -> Self {
        self.particle_acceleration = (min, max);
        self
    }

    pub fn with_particle_lifetime(mut self, lifetime: f64) -> Self {
        self.particle_lifetime = lifetime;
        self
    }

    pub fn with_particle_size(mut self, size: f64, decay: f64) -> Self {
        self.particle_size = size;
        self.particle_size_decay = decay;
        self
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::new(seed);
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// True once the emitter has run out of lifetime and every particle has died.
    pub fn finished(&self) -> bool {
        self.finished
    }

    fn emitting(&self) -> bool {
        self.lifetime.map_or(true, |l| l > 0.0)
    }

    /// Move the emitter, emit if due, then age particles and drop dead ones.
    pub fn update(&mut self, dt: f64) {
        if self.finished {
            return;
        }

        if let Some(lifetime) = self.lifetime.as_mut() {
            if *lifetime > 0.0 {
                *lifetime -= dt;
            }
        }
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;

        self.since_last += 1;
        if !self.emitting() && self.particles.is_empty() {
            self.finished = true;
            log::trace!("particle emitter finished at {:?}", self.position);
            return;
        }

        if self.since_last >= self.particle_delay && self.emitting() {
            self.since_last = 0;
            let particle = self.spawn();
            self.particles.push(particle);
        }

        self.particles.retain_mut(|p| p.tick(dt));
    }

    fn spawn(&mut self) -> Particle {
        let (amin, amax) = self.particle_acceleration;
        let (vmin, vmax) = self.particle_velocity;
        let acceleration = DVec2::new(
            self.rng.uniform(amin.x, amax.x),
            self.rng.uniform(amin.y, amax.y),
        );
        let velocity = DVec2::new(
            self.rng.uniform(vmin.x, vmax.x),
            self.rng.uniform(vmin.y, vmax.y),
        );
        let position = DVec2::new(
            self.rng.uniform(self.position.x, self.position.x + self.size.x),
            self.rng.uniform(self.position.y, self.position.y + self.size.y),
        );
        let color = if self.palette.is_empty() {
            Color::WHITE
        } else {
            self.palette[self.rng.next_int(self.palette.len() as u32) as usize]
        };
        Particle {
            position,
            velocity,
            acceleration,
            lifetime: self.particle_lifetime,
            size: self.particle_size,
            size_decay: self.particle_size_decay,
            color,
        }
    }

    pub fn draw<R: Renderer>(&self, renderer: &mut R, surface: SurfaceId) {
        if self.finished {
            return;
        }
        for p in &self.particles {
            p.draw(renderer, surface);
        }
    }

    /// Append one instance per live particle to `out`. Returns the number written.
    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) -> usize {
        out.extend(self.particles.iter().map(Particle::to_instance));
        self.particles.len()
    }
}
