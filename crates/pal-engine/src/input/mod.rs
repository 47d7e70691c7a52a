pub mod queue;
pub mod state;

pub use queue::{InputEvent, InputQueue, KeyCode, MouseButton};
pub use state::{ButtonTracker, InputState, PressState};
