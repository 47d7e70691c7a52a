// extensions/tween.rs
//
// Value tweens keyed by handle. The animator owns the current values; callers read them
// back each frame and apply them wherever they like.
//
// Usage:
//   let mut animator = Animator::new();
//   let id = animator.add(Tween::vec2(from, to, 30.0, Easing::QuadOut));
//   animator.tick(dt);
//   sprite.position = animator.vec2(id).unwrap_or(sprite.position);

use std::collections::HashMap;

use glam::DVec2;

use super::easing::{ease, ease_vec2, Easing};

/// A tweened value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Scalar(f64),
    Vec2(DVec2),
}

/// What happens when a tween completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop and remove the tween.
    #[default]
    Once,
    /// Restart from the beginning.
    Loop,
    /// Reverse direction.
    PingPong,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Span {
    Scalar { from: f64, to: f64 },
    Vec2 { from: DVec2, to: DVec2 },
}

#[derive(Debug, Clone)]
pub struct Tween {
    span: Span,
    /// Duration, in the unit of `dt`.
    pub duration: f64,
    pub elapsed: f64,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
    pub playing: bool,
    forward: bool,
}

impl Tween {
    fn with_span(span: Span, duration: f64, easing: Easing) -> Self {
        Self {
            span,
            duration,
            elapsed: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
            playing: true,
            forward: true,
        }
    }

    pub fn scalar(from: f64, to: f64, duration: f64, easing: Easing) -> Self {
        Self::with_span(Span::Scalar { from, to }, duration, easing)
    }

    pub fn vec2(from: DVec2, to: DVec2, duration: f64, easing: Easing) -> Self {
        Self::with_span(Span::Vec2 { from, to }, duration, easing)
    }

    // -- Builder methods --

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn paused(mut self) -> Self {
        self.playing = false;
        self
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Current value, taking ping-pong direction into account.
    pub fn value(&self) -> TweenValue {
        let t = if self.forward {
            self.progress()
        } else {
            1.0 - self.progress()
        };
        match self.span {
            Span::Scalar { from, to } => TweenValue::Scalar(ease(from, to, t, self.easing)),
            Span::Vec2 { from, to } => TweenValue::Vec2(ease_vec2(from, to, t, self.easing)),
        }
    }

    /// Advance by `dt`. Returns true when a `Once` tween has finished.
    fn advance(&mut self, dt: f64) -> bool {
        if !self.playing {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.duration {
            return false;
        }
        match self.loop_mode {
            TweenLoop::Once => {
                self.elapsed = self.duration;
                true
            }
            TweenLoop::Loop => {
                self.elapsed = 0.0;
                false
            }
            TweenLoop::PingPong => {
                self.elapsed = 0.0;
                self.forward = !self.forward;
                false
            }
        }
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

/// Owns all running tweens.
#[derive(Debug, Default)]
pub struct Animator {
    tweens: HashMap<TweenId, Tween>,
    next_id: u32,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, tween);
        id
    }

    pub fn remove(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    pub fn pause(&mut self, id: TweenId) {
        if let Some(tween) = self.tweens.get_mut(&id) {
            tween.playing = false;
        }
    }

    pub fn resume(&mut self, id: TweenId) {
        if let Some(tween) = self.tweens.get_mut(&id) {
            tween.playing = true;
        }
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id)
    }

    pub fn value(&self, id: TweenId) -> Option<TweenValue> {
        self.tweens.get(&id).map(Tween::value)
    }

    /// Current value of a scalar tween.
    pub fn scalar(&self, id: TweenId) -> Option<f64> {
        match self.value(id)? {
            TweenValue::Scalar(v) => Some(v),
            TweenValue::Vec2(_) => None,
        }
    }

    /// Current value of a vector tween.
    pub fn vec2(&self, id: TweenId) -> Option<DVec2> {
        match self.value(id)? {
            TweenValue::Vec2(v) => Some(v),
            TweenValue::Scalar(_) => None,
        }
    }

    /// Advance every playing tween. Finished `Once` tweens are removed and their ids
    /// returned in ascending order.
    pub fn tick(&mut self, dt: f64) -> Vec<TweenId> {
        let mut completed: Vec<TweenId> = self
            .tweens
            .iter_mut()
            .filter_map(|(&id, tween)| tween.advance(dt).then_some(id))
            .collect();
        completed.sort();
        for id in &completed {
            self.tweens.remove(id);
        }
        completed
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
