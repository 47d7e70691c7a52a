//! Drives whole frames the way a host game loop would: input, scene update, draw.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use pal_engine::{
    BodyDesc, BodyRegistry, DrawCommand, EngineConfig, EntityId, InputEvent, InputQueue,
    InputState, KeyCode, OverlapKind, RecordingRenderer, Scene, SceneId, Sprite, SurfaceId,
};

const SCENE_SURFACE: SurfaceId = SurfaceId(1);
const SCREEN: SurfaceId = SurfaceId(0);
const RIGHT: KeyCode = KeyCode(39);

const CONFIG: &str = r#"{
    "camera": {
        "size": [200, 100],
        "lazy_follow": 0.5,
        "clamp_rect": { "position": [0, 0], "size": [1000, 100] },
        "border_thickness": 0
    }
}"#;

struct World {
    scene: Scene,
    registry: BodyRegistry,
    input: InputState,
    queue: InputQueue,
    renderer: RecordingRenderer,
}

const HERO: EntityId = EntityId(1);

fn world() -> World {
    let config = EngineConfig::from_json(CONFIG).unwrap();
    let mut registry = BodyRegistry::new();
    let mut scene = Scene::from_config(SceneId(1), DVec2::new(1000.0, 100.0), &config);

    let collider = registry.create(BodyDesc::collider(DVec2::ZERO, DVec2::splat(10.0)));
    let trigger = registry.create(BodyDesc::trigger(DVec2::ZERO, DVec2::splat(10.0)));
    scene.add_sprite(
        Sprite::new(HERO, DVec2::new(0.0, 50.0), DVec2::splat(10.0))
            .with_collider(collider)
            .with_trigger(trigger),
    );

    World {
        scene,
        registry,
        input: InputState::from_config(&config.input),
        queue: InputQueue::new(),
        renderer: RecordingRenderer::new(),
    }
}

impl World {
    /// One frame: walk right while the key is held, follow the hero with the camera.
    fn frame(&mut self) {
        self.registry.clear_events();
        self.input.apply(&mut self.queue);
        self.input.update(1.0);

        if self.input.is_key_down(RIGHT) {
            let pos = self.scene.sprite(HERO).unwrap().position;
            self.scene
                .move_sprite(&self.registry, HERO, pos + DVec2::new(5.0, 0.0));
        }
        let center = self.scene.sprite(HERO).unwrap().center();
        self.scene.camera.set_target(center, false);

        self.scene.update(&mut self.registry, 1.0);
        self.renderer.clear();
        self.scene
            .draw(&mut self.renderer, &self.registry, SCENE_SURFACE, SCREEN);
    }
}

#[test]
fn hero_walks_into_zone_and_out_again() {
    let mut w = world();
    let zone = w
        .registry
        .create(BodyDesc::trigger(DVec2::new(30.0, 50.0), DVec2::new(10.0, 10.0)));
    w.scene.add_body(zone);

    let entered = Rc::new(RefCell::new(0));
    let exited = Rc::new(RefCell::new(0));
    let e = entered.clone();
    w.registry.on_enter(zone, move |_, _, _| *e.borrow_mut() += 1);
    let x = exited.clone();
    w.registry.on_exit(zone, move |_, _, _| *x.borrow_mut() += 1);

    w.queue.push(InputEvent::KeyDown { key: RIGHT });
    for _ in 0..20 {
        w.frame();
    }

    // Walked 100 units, straight through the 10-wide zone.
    assert_eq!(w.scene.sprite(HERO).unwrap().position, DVec2::new(100.0, 50.0));
    assert_eq!(*entered.borrow(), 1);
    assert_eq!(*exited.borrow(), 1);
}

#[test]
fn wall_stops_the_hero() {
    let mut w = world();
    let wall = w
        .registry
        .create(BodyDesc::collider(DVec2::new(52.0, 0.0), DVec2::new(10.0, 100.0)));
    w.scene.add_body(wall);

    w.queue.push(InputEvent::KeyDown { key: RIGHT });
    for _ in 0..20 {
        w.frame();
    }
    assert_eq!(w.scene.sprite(HERO).unwrap().position, DVec2::new(42.0, 50.0));
}

#[test]
fn collide_reported_once_per_pair_per_frame() {
    let mut w = world();
    let zone = w
        .registry
        .create(BodyDesc::trigger(DVec2::new(0.0, 50.0), DVec2::new(10.0, 10.0)));
    w.scene.add_body(zone);

    for _ in 0..3 {
        w.frame();
        let hero_trigger = w.scene.sprite(HERO).unwrap().trigger.unwrap();
        let collides: Vec<_> = w
            .registry
            .events()
            .iter()
            .filter(|e| e.kind == OverlapKind::Collide && e.body == hero_trigger)
            .collect();
        assert_eq!(collides.len(), 1);
    }
}

#[test]
fn scenes_do_not_see_each_others_bodies() {
    let mut w = world();
    let mut other = Scene::new(SceneId(2), DVec2::new(1000.0, 100.0), DVec2::new(200.0, 100.0));
    let ghost = w
        .registry
        .create(BodyDesc::trigger(DVec2::new(0.0, 50.0), DVec2::splat(10.0)));
    other.add_body(ghost);

    for _ in 0..3 {
        other.update(&mut w.registry, 1.0);
        w.frame();
    }
    assert!(w.registry.get(ghost).unwrap().overlapping().is_empty());
    assert!(w
        .registry
        .events()
        .iter()
        .all(|e| e.body != ghost && e.other != ghost));
}

#[test]
fn camera_follows_lazily_and_stays_clamped() {
    let mut w = world();
    w.frame();
    // Target (5, 55) is clamped to half a view from the edges: (100, 50).
    let first = w.scene.camera.current_target();
    assert!(first.x > 5.0 && first.x <= 100.0);
    assert_eq!(w.scene.camera.target(), DVec2::new(100.0, 50.0));

    for _ in 0..60 {
        w.frame();
    }
    let settled = w.scene.camera.current_target();
    assert!((settled - DVec2::new(100.0, 50.0)).length() < 1e-6);
}

#[test]
fn each_frame_presents_through_the_camera() {
    let mut w = world();
    w.frame();
    let cmds = w.renderer.commands();
    assert!(matches!(cmds[0], DrawCommand::FillRect { surface: SCENE_SURFACE, .. }));
    let last = cmds.last().unwrap();
    // Border thickness is zero, so the clip reset is the final command.
    assert!(matches!(last, DrawCommand::SetClip { surface: SCREEN, clip: None }));
    assert!(cmds.iter().any(|c| matches!(
        c,
        DrawCommand::DrawScaled { source: SCENE_SURFACE, dest: SCREEN, .. }
    )));
}
