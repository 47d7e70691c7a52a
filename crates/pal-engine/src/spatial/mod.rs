pub mod body;
pub mod movement;
pub mod registry;

pub use body::{BodyCallback, BodyDesc, BodyKind, OverlapEvent, OverlapKind, OwnerPositions, SpatialBody};
pub use registry::BodyRegistry;
