//! Renderer contract consumed by the camera, bodies, sprites and particles.
//!
//! The engine never owns pixels. Surfaces and textures live in the backend and are
//! addressed through [`SurfaceId`] handles, so a single backend can hand out many
//! surfaces without the engine holding borrows across them.

use glam::DVec2;

use crate::api::types::{Color, SurfaceId};
use crate::core::rect::Rect;

/// Drawing backend.
///
/// # Example Implementation
///
/// ```ignore
/// struct SdlRenderer {
///     canvas: sdl2::render::WindowCanvas,
///     textures: Vec<sdl2::render::Texture>,
/// }
///
/// impl Renderer for SdlRenderer {
///     fn fill_rect(&mut self, surface: SurfaceId, rect: Rect, color: Color) {
///         // Bind the target texture, set the draw colour, fill...
///     }
///     // ...
/// }
/// ```
pub trait Renderer {
    /// Fill `rect` on `surface`, respecting the current clip.
    fn fill_rect(&mut self, surface: SurfaceId, rect: Rect, color: Color);

    /// Draw a rectangle outline `thickness` wide, inside `rect`.
    fn stroke_rect(&mut self, surface: SurfaceId, rect: Rect, color: Color, thickness: f64);

    /// Restrict subsequent drawing on `surface` to `clip`. `None` removes the clip.
    fn set_clip(&mut self, surface: SurfaceId, clip: Option<Rect>);

    /// Scale `source` by `scale`, then copy the region `source_rect` (in scaled
    /// coordinates) to `dest` with its top-left corner at `dest_top_left`.
    fn draw_scaled(
        &mut self,
        source: SurfaceId,
        dest: SurfaceId,
        dest_top_left: DVec2,
        source_rect: Rect,
        scale: f64,
    );

    /// Copy a whole texture with optional flips and alpha.
    fn draw_texture(
        &mut self,
        texture: SurfaceId,
        dest: SurfaceId,
        position: DVec2,
        flip_h: bool,
        flip_v: bool,
        alpha: u8,
    );

    fn fill_circle(&mut self, surface: SurfaceId, center: DVec2, radius: f64, color: Color);

    /// Diagnostic text. Font selection is the backend's business.
    fn draw_text(&mut self, surface: SurfaceId, text: &str, position: DVec2, color: Color);
}
