use glam::DVec2;

use crate::api::config::CameraConfig;
use crate::api::types::{Color, SurfaceId};
use crate::core::rect::Rect;
use crate::core::rng::Rng;
use crate::renderer::traits::Renderer;

/// Residual shake magnitude below `dampening * SHAKE_EPSILON` counts as finished.
const SHAKE_EPSILON: f64 = 1e-9;

/// Viewport camera with lazy follow, lazy zoom, world clamping and screen shake.
///
/// The camera samples a region of a source surface (the world) and draws it, scaled,
/// into a viewport rectangle on a destination surface (the screen).
/// Call [`Camera::update`] once per frame, then [`Camera::render`].
#[derive(Debug, Clone)]
pub struct Camera {
    /// Top-left of the viewport on the destination surface.
    pub position: DVec2,
    /// Viewport width and height on the destination surface.
    pub size: DVec2,
    /// Desired look-at point in source coordinates.
    target: DVec2,
    current_target: DVec2,
    zoom: f64,
    current_zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    lazy_follow: f64,
    lazy_zoom: f64,
    pub background: Color,
    pub border: Color,
    pub border_thickness: f64,
    clamp_rect: Option<Rect>,
    /// Radians of shake oscillation advanced per unit of `dt`.
    pub oscillate_speed: f64,
    /// Magnitude a shake starts at.
    pub shake_magnitude: f64,
    pub shake_direction: DVec2,
    /// Magnitude lost per update.
    pub shake_dampening: f64,
    /// Amplitude of the per-axis uniform noise added to the oscillation.
    pub shake_noise: f64,
    shake_time: f64,
    shake_magnitude_current: f64,
    shake_offset: DVec2,
    rng: Rng,
}

impl Camera {
    /// Create a camera covering `size` at `position`, looking at the origin.
    pub fn new(position: DVec2, size: DVec2) -> Self {
        Self::from_config(&CameraConfig {
            position,
            size,
            ..CameraConfig::default()
        })
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: config.position,
            size: config.size,
            target: config.target,
            current_target: config.target,
            zoom: 1.0,
            current_zoom: 1.0,
            min_zoom: config.min_zoom.min(config.max_zoom),
            max_zoom: config.max_zoom.max(config.min_zoom),
            lazy_follow: 0.0,
            lazy_zoom: 0.0,
            background: config.background,
            border: config.border,
            border_thickness: config.border_thickness,
            clamp_rect: None,
            oscillate_speed: config.oscillate_speed,
            shake_magnitude: config.shake_magnitude,
            shake_direction: config.shake_direction,
            shake_dampening: config.shake_dampening,
            shake_noise: config.shake_noise,
            shake_time: 0.0,
            shake_magnitude_current: 0.0,
            shake_offset: DVec2::ZERO,
            rng: Rng::new(config.shake_seed),
        };
        camera.set_zoom(config.zoom, true);
        camera.set_lazy_follow(config.lazy_follow);
        camera.set_lazy_zoom(config.lazy_zoom);
        camera.set_clamp_rect(config.clamp_rect);
        camera
    }

    // -- Builder pattern --

    pub fn with_target(mut self, target: DVec2) -> Self {
        self.set_target(target, true);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.set_zoom(zoom, true);
        self
    }

    pub fn with_lazy_follow(mut self, lazy_follow: f64) -> Self {
        self.set_lazy_follow(lazy_follow);
        self
    }

    pub fn with_lazy_zoom(mut self, lazy_zoom: f64) -> Self {
        self.set_lazy_zoom(lazy_zoom);
        self
    }

    pub fn with_clamp_rect(mut self, rect: Rect) -> Self {
        self.set_clamp_rect(Some(rect));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::new(seed);
        self
    }

    // -- Target and zoom --

    /// Set the look-at point. `instant` skips smoothing.
    pub fn set_target(&mut self, target: DVec2, instant: bool) {
        self.target = target;
        if instant {
            self.current_target = target;
        }
    }

    pub fn target(&self) -> DVec2 {
        self.target
    }

    /// Smoothed look-at point actually used for rendering.
    pub fn current_target(&self) -> DVec2 {
        self.current_target
    }

    /// Set the zoom, clamped to the zoom limits. `instant` skips smoothing.
    pub fn set_zoom(&mut self, zoom: f64, instant: bool) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if instant {
            self.current_zoom = self.zoom;
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn current_zoom(&self) -> f64 {
        self.current_zoom
    }

    /// Change the zoom limits and re-clamp both zoom values into them.
    /// Limits given in the wrong order are swapped.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
        self.current_zoom = self.current_zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// 0 snaps instantly, 1 never moves. Clamped to [0, 1].
    pub fn set_lazy_follow(&mut self, value: f64) {
        self.lazy_follow = value.clamp(0.0, 1.0);
    }

    pub fn lazy_follow(&self) -> f64 {
        self.lazy_follow
    }

    /// 0 zooms instantly, 1 never changes. Clamped to [0, 1].
    pub fn set_lazy_zoom(&mut self, value: f64) {
        self.lazy_zoom = value.clamp(0.0, 1.0);
    }

    pub fn lazy_zoom(&self) -> f64 {
        self.lazy_zoom
    }

    /// Keep the look-at point inside `rect`. `None` disables clamping.
    pub fn set_clamp_rect(&mut self, rect: Option<Rect>) {
        if let Some(r) = rect {
            if r.is_empty() {
                log::warn!("camera clamp rect has no area: {:?}", r);
            }
        }
        self.clamp_rect = rect;
    }

    pub fn clamp_rect(&self) -> Option<Rect> {
        self.clamp_rect
    }

    // -- Shake --

    /// Start a shake at full magnitude. A given direction replaces the stored one.
    pub fn trigger_shake(&mut self, direction: Option<DVec2>) {
        if let Some(direction) = direction {
            self.shake_direction = direction;
        }
        self.shake_magnitude_current = self.shake_magnitude;
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_magnitude_current > 0.0
    }

    pub fn shake_offset(&self) -> DVec2 {
        self.shake_offset
    }

    pub fn shake_time(&self) -> f64 {
        self.shake_time
    }

    pub fn shake_magnitude_current(&self) -> f64 {
        self.shake_magnitude_current
    }

    // -- Per-frame --

    /// Advance clamping, follow smoothing, shake and zoom smoothing by one frame.
    pub fn update(&mut self, dt: f64) {
        if let Some(rect) = self.clamp_rect {
            self.target.x = clamp_axis(
                self.target.x,
                rect.left(),
                rect.right(),
                self.size.x,
                self.current_zoom,
            );
            self.target.y = clamp_axis(
                self.target.y,
                rect.top(),
                rect.bottom(),
                self.size.y,
                self.current_zoom,
            );
        }

        self.current_target =
            self.current_target * self.lazy_follow + self.target * (1.0 - self.lazy_follow);

        self.advance_shake(dt);

        self.current_zoom = self.current_zoom * self.lazy_zoom + self.zoom * (1.0 - self.lazy_zoom);

        debug_assert!(self.current_zoom >= self.min_zoom - 1e-9);
        debug_assert!(self.current_zoom <= self.max_zoom + 1e-9);
    }

    fn advance_shake(&mut self, dt: f64) {
        self.shake_time += dt * self.oscillate_speed;
        let wave = self.shake_time.sin();
        let nx = self.rng.uniform(-1.0, 1.0) * self.shake_noise;
        let ny = self.rng.uniform(-1.0, 1.0) * self.shake_noise;
        let unit = DVec2::new(
            (wave + nx).clamp(-1.0, 1.0),
            (wave + ny).clamp(-1.0, 1.0),
        );
        self.shake_offset = unit * self.shake_magnitude_current * self.shake_direction;

        let remaining = self.shake_magnitude_current - self.shake_dampening;
        self.shake_magnitude_current = if remaining <= self.shake_dampening * SHAKE_EPSILON {
            0.0
        } else {
            remaining
        };
        if self.shake_magnitude_current == 0.0 {
            self.shake_time = 0.0;
        }
    }

    // -- Rendering --

    /// Viewport rectangle on the destination surface.
    pub fn viewport(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Top-left of the sampled region, in scaled source coordinates.
    pub fn source_origin(&self) -> DVec2 {
        self.current_target * self.current_zoom - self.size * 0.5 + self.shake_offset
    }

    /// Map a destination-surface point (e.g. the mouse) into source coordinates.
    pub fn screen_to_world(&self, point: DVec2) -> DVec2 {
        (self.source_origin() + (point - self.position)) / self.current_zoom
    }

    /// Map a source-surface point into destination coordinates.
    pub fn world_to_screen(&self, point: DVec2) -> DVec2 {
        point * self.current_zoom - self.source_origin() + self.position
    }

    /// Draw `source` into the viewport on `dest`.
    pub fn render<R: Renderer>(&self, renderer: &mut R, source: SurfaceId, dest: SurfaceId) {
        let viewport = self.viewport();
        renderer.fill_rect(dest, viewport, self.background);
        renderer.set_clip(dest, Some(viewport));
        renderer.draw_scaled(
            source,
            dest,
            self.position,
            Rect::new(self.source_origin(), self.size),
            self.current_zoom,
        );
        renderer.set_clip(dest, None);
        if self.border_thickness > 0.0 {
            renderer.stroke_rect(
                dest,
                viewport.inflate(self.border_thickness),
                self.border,
                self.border_thickness,
            );
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

/// Keep a look-at coordinate far enough from the world edges that the view stays
/// inside `[min, max]`; center it when the whole world fits in the view.
fn clamp_axis(value: f64, min: f64, max: f64, view: f64, zoom: f64) -> f64 {
    if (max - min) * zoom > view {
        let half = view / 2.0 / zoom;
        (min + half).max((max - half).min(value))
    } else {
        (min + max) / 2.0
    }
}
