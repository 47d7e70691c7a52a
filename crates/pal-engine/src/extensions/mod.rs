pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{Animator, Tween, TweenId, TweenLoop, TweenValue};
