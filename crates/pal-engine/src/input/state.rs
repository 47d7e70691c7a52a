//! Per-frame key and mouse state derived from "what is held right now".
//!
//! Durations and timeouts are measured in the unit of the `dt` passed to
//! [`InputState::update`], frames by default.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use glam::{DVec2, IVec2};

use crate::api::config::InputConfig;
use crate::input::queue::{InputEvent, InputQueue, KeyCode, MouseButton};

/// Double-press detector state for one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressState {
    #[default]
    None,
    /// Pressed once; waiting for a second press within the timeout.
    Single,
    /// Second press landed this frame.
    Double,
}

/// Held/pressed/released bookkeeping for one kind of identifier (keys or buttons).
#[derive(Debug, Clone)]
pub struct ButtonTracker<K> {
    current: HashSet<K>,
    previous: HashSet<K>,
    durations: HashMap<K, f64>,
    previous_durations: HashMap<K, f64>,
    press_states: HashMap<K, (PressState, f64)>,
}

impl<K: Copy + Eq + Hash> Default for ButtonTracker<K> {
    fn default() -> Self {
        Self {
            current: HashSet::new(),
            previous: HashSet::new(),
            durations: HashMap::new(),
            previous_durations: HashMap::new(),
            press_states: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> ButtonTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame given the identifiers held now.
    pub fn update(&mut self, dt: f64, held: &HashSet<K>, double_press_timeout: f64) {
        self.previous = std::mem::replace(&mut self.current, held.clone());
        self.previous_durations = std::mem::take(&mut self.durations);
        for &k in &self.current {
            let held_for = self.previous_durations.get(&k).copied().unwrap_or(0.0) + dt;
            self.durations.insert(k, held_for);
        }

        let pressed: Vec<K> = self
            .current
            .iter()
            .copied()
            .filter(|k| !self.previous.contains(k))
            .collect();
        for &k in &pressed {
            self.press_states.entry(k).or_default();
        }

        self.press_states.retain(|k, (state, since)| {
            let is_pressed = pressed.contains(k);
            *since = if is_pressed { 0.0 } else { *since + dt };
            *state = match *state {
                PressState::None if is_pressed => PressState::Single,
                PressState::Single if is_pressed => PressState::Double,
                PressState::Single if *since > double_press_timeout => PressState::None,
                PressState::Double => PressState::None,
                other => other,
            };
            *state != PressState::None
        });
    }

    pub fn is_down(&self, k: K) -> bool {
        self.current.contains(&k)
    }

    /// Down this frame, up last frame.
    pub fn is_pressed(&self, k: K) -> bool {
        self.current.contains(&k) && !self.previous.contains(&k)
    }

    pub fn is_released(&self, k: K) -> bool {
        !self.current.contains(&k) && self.previous.contains(&k)
    }

    /// How long `k` has been held, zero when up.
    pub fn duration(&self, k: K) -> f64 {
        self.durations.get(&k).copied().unwrap_or(0.0)
    }

    pub fn is_long_down(&self, k: K, long_press: f64) -> bool {
        self.is_down(k) && self.duration(k) >= long_press
    }

    /// The hold crossed `long_press` this frame.
    pub fn is_long_pressed(&self, k: K, long_press: f64) -> bool {
        let before = self.previous_durations.get(&k).copied().unwrap_or(0.0);
        self.is_down(k) && before < long_press && self.duration(k) >= long_press
    }

    /// Hold progress towards a long press, `0..=100`.
    pub fn long_press_percentage(&self, k: K, long_press: f64) -> f64 {
        if long_press <= 0.0 {
            return if self.is_down(k) { 100.0 } else { 0.0 };
        }
        (self.duration(k) / long_press * 100.0).min(100.0)
    }

    pub fn press_state(&self, k: K) -> PressState {
        self.press_states
            .get(&k)
            .map_or(PressState::None, |&(state, _)| state)
    }

    pub fn is_double_pressed(&self, k: K) -> bool {
        self.press_state(k) == PressState::Double
    }
}

/// Keyboard and mouse state for the current frame.
///
/// Feed it either by draining an [`InputQueue`] with [`apply`](Self::apply) and then
/// calling [`update`](Self::update), or directly with [`update_with`](Self::update_with).
/// A key pressed and released between two updates is not seen.
#[derive(Debug, Clone)]
pub struct InputState {
    pub long_press_duration: f64,
    pub double_press_timeout: f64,
    keys: ButtonTracker<KeyCode>,
    buttons: ButtonTracker<MouseButton>,
    held_keys: HashSet<KeyCode>,
    held_buttons: HashSet<MouseButton>,
    pointer: DVec2,
    mouse_position: DVec2,
    previous_mouse_position: DVec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &InputConfig) -> Self {
        if config.long_press_duration <= 0.0 {
            log::warn!(
                "long_press_duration {} is not positive; every hold counts as long",
                config.long_press_duration
            );
        }
        Self {
            long_press_duration: config.long_press_duration,
            double_press_timeout: config.double_press_timeout,
            keys: ButtonTracker::new(),
            buttons: ButtonTracker::new(),
            held_keys: HashSet::new(),
            held_buttons: HashSet::new(),
            pointer: DVec2::ZERO,
            mouse_position: DVec2::ZERO,
            previous_mouse_position: DVec2::ZERO,
        }
    }

    /// Fold queued events into the held sets and pointer position.
    pub fn apply(&mut self, queue: &mut InputQueue) {
        for event in queue.drain() {
            match event {
                InputEvent::KeyDown { key } => {
                    self.held_keys.insert(key);
                }
                InputEvent::KeyUp { key } => {
                    self.held_keys.remove(&key);
                }
                InputEvent::PointerDown { position, button } => {
                    self.pointer = position;
                    self.held_buttons.insert(button);
                }
                InputEvent::PointerUp { position, button } => {
                    self.pointer = position;
                    self.held_buttons.remove(&button);
                }
                InputEvent::PointerMove { position } => {
                    self.pointer = position;
                }
            }
        }
    }

    /// Advance one frame using the state accumulated by [`apply`](Self::apply).
    pub fn update(&mut self, dt: f64) {
        self.keys
            .update(dt, &self.held_keys, self.double_press_timeout);
        self.buttons
            .update(dt, &self.held_buttons, self.double_press_timeout);
        self.previous_mouse_position = self.mouse_position;
        self.mouse_position = self.pointer;
    }

    /// Advance one frame from the full set of held keys and buttons.
    pub fn update_with(
        &mut self,
        dt: f64,
        keys: impl IntoIterator<Item = KeyCode>,
        buttons: impl IntoIterator<Item = MouseButton>,
        mouse: DVec2,
    ) {
        self.held_keys = keys.into_iter().collect();
        self.held_buttons = buttons.into_iter().collect();
        self.pointer = mouse;
        self.update(dt);
    }

    // -- Keys --

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.is_down(key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.is_pressed(key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys.is_released(key)
    }

    pub fn is_key_double_pressed(&self, key: KeyCode) -> bool {
        self.keys.is_double_pressed(key)
    }

    pub fn key_down_duration(&self, key: KeyCode) -> f64 {
        self.keys.duration(key)
    }

    pub fn is_key_long_down(&self, key: KeyCode) -> bool {
        self.keys.is_long_down(key, self.long_press_duration)
    }

    pub fn is_key_long_pressed(&self, key: KeyCode) -> bool {
        self.keys.is_long_pressed(key, self.long_press_duration)
    }

    pub fn key_long_press_percentage(&self, key: KeyCode) -> f64 {
        self.keys
            .long_press_percentage(key, self.long_press_duration)
    }

    pub fn keys(&self) -> &ButtonTracker<KeyCode> {
        &self.keys
    }

    // -- Mouse --

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.buttons.is_down(button)
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons.is_pressed(button)
    }

    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.buttons.is_released(button)
    }

    pub fn is_mouse_double_pressed(&self, button: MouseButton) -> bool {
        self.buttons.is_double_pressed(button)
    }

    pub fn mouse_down_duration(&self, button: MouseButton) -> f64 {
        self.buttons.duration(button)
    }

    pub fn is_mouse_long_down(&self, button: MouseButton) -> bool {
        self.buttons.is_long_down(button, self.long_press_duration)
    }

    pub fn is_mouse_long_pressed(&self, button: MouseButton) -> bool {
        self.buttons.is_long_pressed(button, self.long_press_duration)
    }

    pub fn mouse_long_press_percentage(&self, button: MouseButton) -> f64 {
        self.buttons
            .long_press_percentage(button, self.long_press_duration)
    }

    pub fn buttons(&self) -> &ButtonTracker<MouseButton> {
        &self.buttons
    }

    pub fn mouse_position(&self) -> DVec2 {
        self.mouse_position
    }

    /// Per-axis direction of the last mouse movement: -1, 0 or 1.
    pub fn mouse_direction(&self) -> IVec2 {
        let delta = self.mouse_position - self.previous_mouse_position;
        let axis = |d: f64| {
            if d > 0.0 {
                1
            } else if d < 0.0 {
                -1
            } else {
                0
            }
        };
        IVec2::new(axis(delta.x), axis(delta.y))
    }
}
