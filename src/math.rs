//! Math type aliases for vertex attribute data.
//!
//! Attribute vectors are always f32: positions and normals are [`Vec3`],
//! UV coordinates are [`Vec2`], colors and weight groups are [`Vec4`].

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;
