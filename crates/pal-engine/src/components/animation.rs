//! Frame-based sprite animation.
//!
//! A [`SpriteImage`] maps named states ("idle", "walk", ...) to frame lists and
//! advances the current state's animation one tick per call to [`SpriteImage::update`].

use std::collections::HashMap;

use glam::DVec2;

use crate::api::types::SurfaceId;
use crate::renderer::traits::Renderer;

/// State name used when frames are added without one.
pub const DEFAULT_STATE: &str = "default";

/// Frames for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameList {
    /// Texture handles, in playback order.
    pub textures: Vec<SurfaceId>,
    /// Ticks each frame stays on screen.
    pub delay: u32,
    pub looping: bool,
    pub flip_h: bool,
    pub flip_v: bool,
    /// Subtracted from the draw position, to discount padding around the artwork.
    pub offset: DVec2,
}

impl FrameList {
    pub fn new(textures: Vec<SurfaceId>) -> Self {
        Self {
            textures,
            delay: 8,
            looping: true,
            flip_h: false,
            flip_v: false,
            offset: DVec2::ZERO,
        }
    }

    // -- Builder pattern --

    pub fn with_delay(mut self, delay: u32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_flip(mut self, flip_h: bool, flip_v: bool) -> Self {
        self.flip_h = flip_h;
        self.flip_v = flip_v;
        self
    }

    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn frame_count(&self) -> usize {
        self.textures.len()
    }
}

/// Animated image with named states.
#[derive(Debug, Clone)]
pub struct SpriteImage {
    states: HashMap<String, FrameList>,
    current: Option<String>,
    frame_index: usize,
    frame_timer: u32,
    pub visible: bool,
    pub alpha: u8,
    pub paused: bool,
}

impl Default for SpriteImage {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            current: None,
            frame_index: 0,
            frame_timer: 0,
            visible: true,
            alpha: 255,
            paused: false,
        }
    }
}

impl SpriteImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Image with a single default state.
    pub fn single(frames: FrameList) -> Self {
        let mut image = Self::new();
        image.add_frames(DEFAULT_STATE, frames);
        image
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    /// Add frames to a state, creating it if needed. Textures are appended to an existing
    /// state; its playback settings are replaced. The first state added becomes current.
    pub fn add_frames(&mut self, state: impl Into<String>, frames: FrameList) {
        let state = state.into();
        match self.states.get_mut(&state) {
            Some(existing) => {
                existing.textures.extend(frames.textures);
                existing.delay = frames.delay;
                existing.looping = frames.looping;
                existing.flip_h = frames.flip_h;
                existing.flip_v = frames.flip_v;
                existing.offset = frames.offset;
            }
            None => {
                self.states.insert(state.clone(), frames);
            }
        }
        if self.states.len() == 1 {
            self.current = Some(state);
        }
    }

    /// Switch state. Playback restarts only when the state actually changes; unknown
    /// states are ignored.
    pub fn set_state(&mut self, state: &str) {
        if self.current.as_deref() == Some(state) {
            return;
        }
        if !self.states.contains_key(state) {
            log::warn!("set_state: unknown sprite state {:?}", state);
            return;
        }
        self.current = Some(state.to_string());
        self.frame_index = 0;
        self.frame_timer = 0;
    }

    pub fn state(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    fn current_frames(&self) -> Option<&FrameList> {
        self.current.as_ref().and_then(|s| self.states.get(s))
    }

    /// Advance one tick. Returns true if the frame changed.
    pub fn update(&mut self) -> bool {
        if self.paused {
            return false;
        }
        let Some((count, delay, looping)) = self
            .current_frames()
            .map(|f| (f.textures.len(), f.delay, f.looping))
        else {
            return false;
        };
        if count == 0 {
            return false;
        }

        self.frame_timer += 1;
        if self.frame_timer < delay {
            return false;
        }
        self.frame_timer = 0;

        let last = count - 1;
        let previous = self.frame_index;
        self.frame_index = if self.frame_index < last {
            self.frame_index + 1
        } else if looping {
            0
        } else {
            last
        };
        self.frame_index != previous
    }

    pub fn current_texture(&self) -> Option<SurfaceId> {
        self.current_frames()
            .and_then(|f| f.textures.get(self.frame_index).copied())
    }

    /// Draw the current frame at `position`, less the state's offset.
    pub fn draw<R: Renderer>(&self, renderer: &mut R, surface: SurfaceId, position: DVec2) {
        if !self.visible {
            return;
        }
        let (Some(frames), Some(texture)) = (self.current_frames(), self.current_texture()) else {
            return;
        };
        renderer.draw_texture(
            texture,
            surface,
            position - frames.offset,
            frames.flip_h,
            frames.flip_v,
            self.alpha,
        );
    }
}
