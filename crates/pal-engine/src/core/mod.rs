pub mod rect;
pub mod rng;
pub mod scene;

pub use rect::Rect;
pub use rng::Rng;
pub use scene::{Scene, SortKey};
