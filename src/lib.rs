//! # mesh-weld
//!
//! Converts a "face-soup" mesh, where every triangle corner independently
//! carries position, normal, tangent, up to eight UV channels, a vertex
//! color, and skinning data, into a GPU-ready indexed mesh: a deduplicated
//! array of unique vertices plus a triangle index buffer referencing them.
//!
//! Two corners merge when they reference the same source mesh vertex and
//! every attribute they carry is equal within a fixed epsilon (bone indices
//! compare exactly). Output order is deterministic: unique vertices appear
//! in first-occurrence order.
//!
//! # Example
//!
//! ```ignore
//! use mesh_weld::builder::MeshWelder;
//! use mesh_weld::channels::VertexChannels;
//! use mesh_weld::flatten::FlatMesh;
//! use mesh_weld::vertex::CornerAttributes;
//!
//! let mut welder = MeshWelder::new(4, VertexChannels::position_normal());
//! for (slot, position, normal) in corners {
//!     welder.add_corner(slot, CornerAttributes::new(position, normal))?;
//! }
//! let mesh = welder.finish();
//! let flat = FlatMesh::from_indexed(&mesh);
//! ```

pub mod approx;
pub mod builder;
pub mod channels;
pub mod error;
pub mod flatten;
pub mod math;
pub mod vertex;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
