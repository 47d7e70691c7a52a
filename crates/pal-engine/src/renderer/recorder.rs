use std::collections::HashMap;

use glam::DVec2;

use crate::api::types::{Color, SurfaceId};
use crate::core::rect::Rect;
use crate::renderer::traits::Renderer;

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { surface: SurfaceId, rect: Rect, color: Color },
    StrokeRect { surface: SurfaceId, rect: Rect, color: Color, thickness: f64 },
    SetClip { surface: SurfaceId, clip: Option<Rect> },
    DrawScaled {
        source: SurfaceId,
        dest: SurfaceId,
        dest_top_left: DVec2,
        source_rect: Rect,
        scale: f64,
    },
    DrawTexture {
        texture: SurfaceId,
        dest: SurfaceId,
        position: DVec2,
        flip_h: bool,
        flip_v: bool,
        alpha: u8,
    },
    FillCircle { surface: SurfaceId, center: DVec2, radius: f64, color: Color },
    DrawText { surface: SurfaceId, text: String, position: DVec2, color: Color },
}

/// Headless renderer that records every call.
/// Hosts can replay the list onto a real backend; tests assert on it directly.
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    clips: HashMap<SurfaceId, Rect>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
            clips: HashMap::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The clip currently active on `surface`.
    pub fn clip(&self, surface: SurfaceId) -> Option<Rect> {
        self.clips.get(&surface).copied()
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rect(&mut self, surface: SurfaceId, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { surface, rect, color });
    }

    fn stroke_rect(&mut self, surface: SurfaceId, rect: Rect, color: Color, thickness: f64) {
        self.commands.push(DrawCommand::StrokeRect { surface, rect, color, thickness });
    }

    fn set_clip(&mut self, surface: SurfaceId, clip: Option<Rect>) {
        match clip {
            Some(rect) => self.clips.insert(surface, rect),
            None => self.clips.remove(&surface),
        };
        self.commands.push(DrawCommand::SetClip { surface, clip });
    }

    fn draw_scaled(
        &mut self,
        source: SurfaceId,
        dest: SurfaceId,
        dest_top_left: DVec2,
        source_rect: Rect,
        scale: f64,
    ) {
        self.commands.push(DrawCommand::DrawScaled {
            source,
            dest,
            dest_top_left,
            source_rect,
            scale,
        });
    }

    fn draw_texture(
        &mut self,
        texture: SurfaceId,
        dest: SurfaceId,
        position: DVec2,
        flip_h: bool,
        flip_v: bool,
        alpha: u8,
    ) {
        self.commands.push(DrawCommand::DrawTexture {
            texture,
            dest,
            position,
            flip_h,
            flip_v,
            alpha,
        });
    }

    fn fill_circle(&mut self, surface: SurfaceId, center: DVec2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle { surface, center, radius, color });
    }

    fn draw_text(&mut self, surface: SurfaceId, text: &str, position: DVec2, color: Color) {
        self.commands.push(DrawCommand::DrawText {
            surface,
            text: text.to_string(),
            position,
            color,
        });
    }
}
