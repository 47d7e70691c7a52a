use glam::DVec2;

use crate::api::types::{BodyId, Color, EntityId, SurfaceId};
use crate::components::animation::SpriteImage;
use crate::core::rect::Rect;
use crate::renderer::traits::Renderer;
use crate::spatial::body::OwnerPositions;
use crate::spatial::registry::BodyRegistry;

/// A positioned, sized game object with an optional image and spatial bodies.
///
/// Bodies are owned by the [`BodyRegistry`]; the sprite only holds their ids. When the
/// sprite is part of a scene, the scene keeps the bodies attached to it each frame.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: EntityId,
    /// Top-left corner.
    pub position: DVec2,
    pub size: DVec2,
    /// Draw order when the scene sorts by depth.
    pub z: i32,
    pub collider: Option<BodyId>,
    pub trigger: Option<BodyId>,
    pub image: Option<SpriteImage>,
    pub active: bool,
    /// Colour of the debug label.
    pub draw_color: Color,
}

impl Sprite {
    pub fn new(id: EntityId, position: DVec2, size: DVec2) -> Self {
        Self {
            id,
            position,
            size,
            z: 0,
            collider: None,
            trigger: None,
            image: None,
            active: true,
            draw_color: Color::WHITE,
        }
    }

    // -- Builder pattern --

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_collider(mut self, body: BodyId) -> Self {
        self.collider = Some(body);
        self
    }

    pub fn with_trigger(mut self, body: BodyId) -> Self {
        self.trigger = Some(body);
        self
    }

    pub fn with_image(mut self, image: SpriteImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_draw_color(mut self, color: Color) -> Self {
        self.draw_color = color;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn center(&self) -> DVec2 {
        self.rect().center()
    }

    /// Whether the sprites' boxes overlap.
    pub fn touching(&self, other: &Sprite) -> bool {
        self.rect().intersects(&other.rect())
    }

    /// Bodies attached to this sprite.
    pub fn bodies(&self) -> impl Iterator<Item = BodyId> {
        self.collider.into_iter().chain(self.trigger)
    }

    pub fn draw<R: Renderer>(&self, renderer: &mut R, surface: SurfaceId) {
        if let Some(image) = &self.image {
            image.draw(renderer, surface, self.position);
        }
    }

    /// Bounding box and `[x, y, w, h]` label, plus the overlays of attached bodies.
    pub fn draw_debug<R: Renderer>(
        &self,
        renderer: &mut R,
        surface: SurfaceId,
        registry: &BodyRegistry,
    ) {
        let r = self.rect();
        renderer.stroke_rect(surface, r, Color::WHITE, 1.0);
        let label = format!("[{}, {}, {}, {}]", r.left(), r.top(), r.size.x, r.size.y);
        renderer.draw_text(
            surface,
            &label,
            DVec2::new(r.right() + 2.0, r.top() + r.size.y / 2.0 - 5.0),
            self.draw_color,
        );
        for body in self.bodies().filter_map(|id| registry.get(id)) {
            body.draw(renderer, surface);
        }
    }
}

impl OwnerPositions for [Sprite] {
    fn owner_position(&self, owner: EntityId) -> Option<DVec2> {
        self.iter().find(|s| s.id == owner).map(|s| s.position)
    }
}
