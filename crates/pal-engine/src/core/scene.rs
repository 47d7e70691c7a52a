use glam::DVec2;

use crate::api::config::EngineConfig;
use crate::api::types::{BodyId, Color, EntityId, SceneId, Scope, SurfaceId};
use crate::components::sprite::Sprite;
use crate::core::rect::Rect;
use crate::renderer::camera::Camera;
use crate::renderer::traits::Renderer;
use crate::spatial::registry::BodyRegistry;

/// Sprite draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending depth.
    #[default]
    Z,
    Top,
    /// Bottom edge, for top-down games where lower sprites appear in front.
    Bottom,
    Left,
    Right,
}

impl SortKey {
    fn key(self, sprite: &Sprite) -> f64 {
        let r = sprite.rect();
        match self {
            SortKey::Z => sprite.z as f64,
            SortKey::Top => r.top(),
            SortKey::Bottom => r.bottom(),
            SortKey::Left => r.left(),
            SortKey::Right => r.right(),
        }
    }
}

/// A world full of sprites and standalone bodies, viewed through one camera.
///
/// Sprites live in a flat Vec, which is fine for the hundreds of objects a scene
/// typically holds. Bodies live in a shared [`BodyRegistry`]; the scene stamps its own
/// [`Scope`] on every body it owns so that scenes never see each other's overlaps.
pub struct Scene {
    pub id: SceneId,
    pub world_size: DVec2,
    pub background: Color,
    pub camera: Camera,
    pub sort_key: SortKey,
    /// Draw sprite boxes and body overlays.
    pub debug: bool,
    sprites: Vec<Sprite>,
    bodies: Vec<BodyId>,
    frame: u64,
}

impl Scene {
    /// Scene whose camera fills a `view_size` screen and looks at the middle of it.
    pub fn new(id: SceneId, world_size: DVec2, view_size: DVec2) -> Self {
        let camera = Camera::new(DVec2::ZERO, view_size).with_target(view_size / 2.0);
        Self {
            id,
            world_size,
            background: Color::CORNFLOWER_BLUE,
            camera,
            sort_key: SortKey::Z,
            debug: false,
            sprites: Vec::with_capacity(64),
            bodies: Vec::new(),
            frame: 0,
        }
    }

    pub fn from_config(id: SceneId, world_size: DVec2, config: &EngineConfig) -> Self {
        Self {
            camera: Camera::from_config(&config.camera),
            debug: config.debug,
            ..Self::new(id, world_size, config.camera.size)
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::Scene(self.id)
    }

    /// Updates run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    // -- Sprites --

    /// Add a sprite, replacing any sprite with the same id.
    pub fn add_sprite(&mut self, sprite: Sprite) {
        self.remove_sprite(sprite.id);
        self.sprites.push(sprite);
    }

    /// Remove a sprite, keeping the order of the rest. Its bodies stay registered.
    pub fn remove_sprite(&mut self, id: EntityId) -> Option<Sprite> {
        let idx = self.sprites.iter().position(|s| s.id == id)?;
        Some(self.sprites.remove(idx))
    }

    pub fn sprite(&self, id: EntityId) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.id == id)
    }

    pub fn sprite_mut(&mut self, id: EntityId) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.id == id)
    }

    /// Sprites in draw order as of the last update.
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    // -- Standalone bodies --

    pub fn add_body(&mut self, body: BodyId) {
        if !self.bodies.contains(&body) {
            self.bodies.push(body);
        }
    }

    pub fn remove_body(&mut self, body: BodyId) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|&b| b != body);
        self.bodies.len() != before
    }

    pub fn bodies(&self) -> &[BodyId] {
        &self.bodies
    }

    // -- Frame --

    /// Advance the scene one frame.
    ///
    /// Bodies are repositioned and tested after the sprites are sorted, and sprite images
    /// animate last.
    pub fn update(&mut self, registry: &mut BodyRegistry, dt: f64) {
        self.frame += 1;
        self.camera.update(dt);

        let sort_key = self.sort_key;
        self.sprites
            .sort_by(|a, b| sort_key.key(a).total_cmp(&sort_key.key(b)));

        let scope = self.scope();
        for &body in &self.bodies {
            registry.set_scope(body, scope);
        }
        for sprite in &self.sprites {
            for body in sprite.bodies() {
                registry.set_scope(body, scope);
                registry.set_owner(body, Some(sprite.id));
            }
        }
        registry.update_scope(scope, self.sprites.as_slice());

        for sprite in self.sprites.iter_mut().filter(|s| s.active) {
            if let Some(image) = sprite.image.as_mut() {
                image.update();
            }
        }
    }

    /// Move a sprite towards `to`, stopping at colliders if it has one.
    /// Returns where the sprite ended up.
    pub fn move_sprite(
        &mut self,
        registry: &BodyRegistry,
        id: EntityId,
        to: DVec2,
    ) -> Option<DVec2> {
        let sprite = self.sprite_mut(id)?;
        let resolved = match sprite.collider {
            Some(collider) => registry.try_move(collider, sprite.position, to),
            None => to,
        };
        sprite.position = resolved;
        Some(resolved)
    }

    /// Draw the world onto `scene_surface`, then present it through the camera onto
    /// `screen_surface`.
    pub fn draw<R: Renderer>(
        &self,
        renderer: &mut R,
        registry: &BodyRegistry,
        scene_surface: SurfaceId,
        screen_surface: SurfaceId,
    ) {
        renderer.fill_rect(
            scene_surface,
            Rect::new(DVec2::ZERO, self.world_size),
            self.background,
        );

        for sprite in self.sprites.iter().filter(|s| s.active) {
            sprite.draw(renderer, scene_surface);
        }

        if self.debug {
            for sprite in self.sprites.iter().filter(|s| s.active) {
                sprite.draw_debug(renderer, scene_surface, registry);
            }
            for body in self.bodies.iter().filter_map(|&b| registry.get(b)) {
                body.draw(renderer, scene_surface);
            }
        }

        self.camera.render(renderer, scene_surface, screen_surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::{FrameList, SpriteImage};
    use crate::renderer::recorder::{DrawCommand, RecordingRenderer};
    use crate::spatial::body::BodyDesc;

    fn scene() -> Scene {
        Scene::new(SceneId(1), DVec2::new(1000.0, 1000.0), DVec2::new(640.0, 480.0))
    }

    #[test]
    fn camera_starts_at_view_center() {
        let s = scene();
        assert_eq!(s.camera.target(), DVec2::new(320.0, 240.0));
        assert_eq!(s.background, Color::CORNFLOWER_BLUE);
    }

    #[test]
    fn add_replaces_and_remove_keeps_order() {
        let mut s = scene();
        for i in 0..3 {
            s.add_sprite(Sprite::new(EntityId(i), DVec2::ZERO, DVec2::ONE));
        }
        s.add_sprite(Sprite::new(EntityId(0), DVec2::ONE, DVec2::ONE));
        assert_eq!(s.sprites().len(), 3);
        assert_eq!(s.sprite(EntityId(0)).unwrap().position, DVec2::ONE);

        s.remove_sprite(EntityId(2));
        let ids: Vec<_> = s.sprites().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(0)]);
    }

    #[test]
    fn update_sorts_by_key() {
        let mut s = scene();
        let mut reg = BodyRegistry::new();
        s.add_sprite(Sprite::new(EntityId(1), DVec2::new(0.0, 50.0), DVec2::ONE).with_z(2));
        s.add_sprite(Sprite::new(EntityId(2), DVec2::new(0.0, 10.0), DVec2::ONE).with_z(1));
        s.update(&mut reg, 1.0);
        assert_eq!(s.sprites()[0].id, EntityId(2));

        s.sort_key = SortKey::Bottom;
        s.sprite_mut(EntityId(1)).unwrap().position.y = 0.0;
        s.update(&mut reg, 1.0);
        assert_eq!(s.sprites()[0].id, EntityId(1));
        assert_eq!(s.frame(), 2);
    }

    #[test]
    fn update_scopes_bodies_and_attaches_owners() {
        let mut s = scene();
        let mut reg = BodyRegistry::new();
        let trig = reg.create(BodyDesc::trigger(DVec2::ZERO, DVec2::splat(10.0)));
        let zone = reg.create(BodyDesc::trigger(DVec2::new(100.0, 100.0), DVec2::splat(10.0)));
        s.add_sprite(
            Sprite::new(EntityId(5), DVec2::new(95.0, 95.0), DVec2::splat(10.0)).with_trigger(trig),
        );
        s.add_body(zone);

        s.update(&mut reg, 1.0);
        let body = reg.get(trig).unwrap();
        assert_eq!(body.scope(), s.scope());
        assert_eq!(body.owner(), Some(EntityId(5)));
        assert_eq!(body.position(), DVec2::new(95.0, 95.0));
        assert!(body.is_overlapping(zone));
        assert!(reg.get(zone).unwrap().is_overlapping(trig));
    }

    #[test]
    fn move_sprite_stops_at_collider() {
        let mut s = scene();
        let mut reg = BodyRegistry::new();
        let me = reg.create(BodyDesc::collider(DVec2::ZERO, DVec2::splat(10.0)));
        let wall = reg.create(BodyDesc::collider(DVec2::new(30.0, 0.0), DVec2::splat(10.0)));
        s.add_sprite(Sprite::new(EntityId(1), DVec2::ZERO, DVec2::splat(10.0)).with_collider(me));
        s.add_body(wall);
        s.update(&mut reg, 1.0);

        let pos = s.move_sprite(&reg, EntityId(1), DVec2::new(25.0, 0.0));
        assert_eq!(pos, Some(DVec2::new(20.0, 0.0)));
        assert_eq!(s.sprite(EntityId(1)).unwrap().position, DVec2::new(20.0, 0.0));
        assert_eq!(s.move_sprite(&reg, EntityId(99), DVec2::ZERO), None);
    }

    #[test]
    fn sprite_images_animate_on_update() {
        let mut s = scene();
        let mut reg = BodyRegistry::new();
        let image = SpriteImage::single(FrameList::new(vec![SurfaceId(10), SurfaceId(11)]).with_delay(1));
        s.add_sprite(Sprite::new(EntityId(1), DVec2::ZERO, DVec2::ONE).with_image(image));
        s.update(&mut reg, 1.0);
        let tex = s.sprite(EntityId(1)).and_then(|sp| sp.image.as_ref()).and_then(|i| i.current_texture());
        assert_eq!(tex, Some(SurfaceId(11)));
    }

    #[test]
    fn draw_clears_then_presents_through_camera() {
        let mut s = scene();
        let reg = BodyRegistry::new();
        let image = SpriteImage::single(FrameList::new(vec![SurfaceId(10)]));
        s.add_sprite(Sprite::new(EntityId(1), DVec2::ZERO, DVec2::ONE).with_image(image));

        let mut r = RecordingRenderer::new();
        s.draw(&mut r, &reg, SurfaceId(1), SurfaceId(0));
        let cmds = r.commands();
        assert!(matches!(cmds[0], DrawCommand::FillRect { surface: SurfaceId(1), .. }));
        assert!(matches!(cmds[1], DrawCommand::DrawTexture { texture: SurfaceId(10), .. }));
        assert!(cmds
            .iter()
            .any(|c| matches!(c, DrawCommand::DrawScaled { source: SurfaceId(1), dest: SurfaceId(0), .. })));
    }

    #[test]
    fn debug_draws_overlays() {
        let mut s = scene();
        let mut reg = BodyRegistry::new();
        let zone = reg.create(BodyDesc::trigger(DVec2::ZERO, DVec2::ONE));
        s.add_body(zone);
        s.debug = true;

        let mut r = RecordingRenderer::new();
        s.draw(&mut r, &reg, SurfaceId(1), SurfaceId(0));
        assert!(r
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::DrawText { text, .. } if text == "[0, 0, 1, 1]")));
    }
}
