pub mod camera;
pub mod recorder;
pub mod traits;

pub use camera::Camera;
pub use recorder::{DrawCommand, RecordingRenderer};
pub use traits::Renderer;
