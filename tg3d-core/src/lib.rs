//! TG3D Core Library - 3D geometry kernel and character-grid rasterizer
//!
//! Geometric primitives with in-place transform algebra (rotation around an
//! arbitrary axis, scaling, flipping, vertex welding), parametric solid
//! generators, and a scanline rasterizer that renders triangle meshes into
//! a monospace character grid. Pure and synchronous: no I/O, no threads,
//! no error type to handle.

pub mod geometry;
pub mod mesh;
pub mod render;
pub mod solids;

// Re-export commonly used types
pub use geometry::{Line, Point, Triangle};
pub use mesh::Mesh;
pub use render::Renderer;
pub use solids::BasePlane;
