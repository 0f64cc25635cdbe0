/// wirecube core library - matrix math and cube animation
///
/// This library holds the stateless math (matrices, rotations, projection)
/// and the owned scene state that a front end advances once per frame.

pub mod animation;
pub mod error;
pub mod matrix;
pub mod projection;
pub mod rotation;
pub mod scene;

// Re-export commonly used types
pub use animation::{RotationAngle, Stepper, Tracked, DEFAULT_STEP};
pub use error::{Error, Result};
pub use matrix::Matrix;
pub use projection::Camera;
pub use rotation::{rotation_x, rotation_y, rotation_y_observed, rotation_z, Axis};
pub use scene::{
    Corner, DrawPrimitive, Edge, Frame, Primitive, PrimitiveKind, Role, SceneConfig, SceneModel,
};
