//! Core modules for an interactive 3D solid viewer.
//!
//! The crate exposes the pieces a touch-driven viewer is built from:
//! procedural mesh generation for the five parametric solids, in-place
//! shape transforms, a gesture-driven look-at camera and an ordered
//! scene.  Windowing, touch-event plumbing and rasterization are
//! intentionally kept outside of the crate so that the code remains
//! testable and easy to embed; the core consumes gesture deltas and
//! exposes mesh buffers plus view/projection matrices.

pub mod camera;
pub mod gesture;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod shape;
pub mod viewer;

pub use camera::{Camera, GESTURE_SENSITIVITY};
pub use gesture::{map_gesture, CameraAction, GestureEvent, GestureQueue};
pub use mesh::{Mesh, MeshError};
pub use render::{interleave, FrameParams, Rasterizer, Vertex};
pub use scene::Scene;
pub use shape::{Shape, ShapeKind};
pub use viewer::Viewer;
