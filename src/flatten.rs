//! Flat attribute arrays for serializer and GPU consumption.
//!
//! A scene serializer embeds mesh data as parallel flat numeric arrays: one
//! array of positions, one of normals, one per UV channel, one index array.
//! [`FlatMesh`] performs that flattening in `final_index` order and
//! guarantees every array's length is `vertex_count × component_count` with
//! all indices inside `[0, vertex_count)`.

use crate::builder::IndexedMesh;
use crate::channels::{MAX_INFLUENCE_GROUPS, UV_CHANNEL_COUNT};
use crate::vertex::Tangent;

/// Index format for indexed drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned integers (max 65535 vertices).
    #[default]
    Uint16,
    /// 32-bit unsigned integers.
    Uint32,
}

impl IndexFormat {
    /// Size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

/// Parallel flat attribute arrays of a finished mesh, in `final_index`
/// order. Channels absent from the mesh are `None`; present channels are
/// full-length (no holes, no zero-fill sentinels).
#[derive(Debug, Clone)]
pub struct FlatMesh {
    vertex_count: u32,
    positions: Vec<f32>,
    normals: Vec<f32>,
    tangents: Option<Vec<f32>>,
    uv: [Option<Vec<f32>>; UV_CHANNEL_COUNT],
    colors: Option<Vec<f32>>,
    bone_indices: [Option<Vec<u32>>; MAX_INFLUENCE_GROUPS],
    weights: [Option<Vec<f32>>; MAX_INFLUENCE_GROUPS],
    indices: Vec<u32>,
}

impl FlatMesh {
    /// Flatten a finished mesh into parallel arrays.
    pub fn from_indexed(mesh: &IndexedMesh) -> Self {
        let channels = mesh.channels();
        let count = mesh.vertex_count() as usize;

        let mut positions = Vec::with_capacity(count * 3);
        let mut normals = Vec::with_capacity(count * 3);
        let mut tangents = channels
            .tangent()
            .map(|arity| Vec::with_capacity(count * arity.component_count()));
        let mut uv: [Option<Vec<f32>>; UV_CHANNEL_COUNT] = std::array::from_fn(|set| {
            channels
                .has_uv_channel(set)
                .then(|| Vec::with_capacity(count * 2))
        });
        let mut colors = channels.has_color().then(|| Vec::with_capacity(count * 4));
        let mut bone_indices: [Option<Vec<u32>>; MAX_INFLUENCE_GROUPS] = std::array::from_fn(|g| {
            (g < channels.influence_groups()).then(|| Vec::with_capacity(count * 4))
        });
        let mut weights: [Option<Vec<f32>>; MAX_INFLUENCE_GROUPS] = std::array::from_fn(|g| {
            (g < channels.influence_groups()).then(|| Vec::with_capacity(count * 4))
        });

        for record in mesh.vertices() {
            let attrs = record.attributes();
            positions.extend_from_slice(attrs.position().as_slice());
            normals.extend_from_slice(attrs.normal().as_slice());

            if let (Some(out), Some(tangent)) = (tangents.as_mut(), attrs.tangent()) {
                match tangent {
                    Tangent::Xyz(t) => out.extend_from_slice(t.as_slice()),
                    Tangent::Xyzw(t) => out.extend_from_slice(t.as_slice()),
                }
            }
            for (set, out) in uv.iter_mut().enumerate() {
                if let (Some(out), Some(value)) = (out.as_mut(), attrs.uv(set)) {
                    out.extend_from_slice(value.as_slice());
                }
            }
            if let (Some(out), Some(color)) = (colors.as_mut(), attrs.color()) {
                out.extend_from_slice(color.as_slice());
            }
            for group in 0..MAX_INFLUENCE_GROUPS {
                if let (Some(out), Some(bones)) =
                    (bone_indices[group].as_mut(), attrs.bone_indices(group))
                {
                    out.extend(bones.indices().iter().map(|&i| i as u32));
                }
                if let (Some(out), Some(value)) = (weights[group].as_mut(), attrs.weights(group)) {
                    out.extend_from_slice(value.as_slice());
                }
            }
        }

        debug_assert_eq!(positions.len(), count * 3);
        debug_assert_eq!(normals.len(), count * 3);

        Self {
            vertex_count: mesh.vertex_count(),
            positions,
            normals,
            tangents,
            uv,
            colors,
            bone_indices,
            weights,
            indices: mesh.indices().to_vec(),
        }
    }

    /// Number of unique vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Flat positions, `vertex_count × 3` floats.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat normals, `vertex_count × 3` floats.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Flat tangents (`vertex_count × 3` or `× 4` floats per the mesh's
    /// tangent arity), if present.
    pub fn tangents(&self) -> Option<&[f32]> {
        self.tangents.as_deref()
    }

    /// Flat UV set `set` (`vertex_count × 2` floats), if present.
    pub fn uv(&self, set: usize) -> Option<&[f32]> {
        self.uv.get(set).and_then(|v| v.as_deref())
    }

    /// Flat RGBA colors (`vertex_count × 4` floats), if present.
    pub fn colors(&self) -> Option<&[f32]> {
        self.colors.as_deref()
    }

    /// Flat bone indices of influence group `group` (`vertex_count × 4`
    /// integers, widened to u32 for upload), if present.
    pub fn bone_indices(&self, group: usize) -> Option<&[u32]> {
        self.bone_indices.get(group).and_then(|v| v.as_deref())
    }

    /// Flat weights of influence group `group` (`vertex_count × 4` floats),
    /// if present.
    pub fn weights(&self, group: usize) -> Option<&[f32]> {
        self.weights.get(group).and_then(|v| v.as_deref())
    }

    /// The triangle index buffer.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Smallest index format that can address every vertex.
    pub fn index_format(&self) -> IndexFormat {
        if self.vertex_count > u16::MAX as u32 {
            IndexFormat::Uint32
        } else {
            IndexFormat::Uint16
        }
    }

    /// The index buffer narrowed to u16, or `None` when the mesh has too
    /// many vertices for 16-bit indices.
    pub fn indices_u16(&self) -> Option<Vec<u16>> {
        if self.index_format() != IndexFormat::Uint16 {
            return None;
        }
        Some(self.indices.iter().map(|&i| i as u16).collect())
    }

    /// Raw bytes of the position array.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the normal array.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Raw bytes of the index buffer in the format reported by
    /// [`index_format`](Self::index_format).
    pub fn index_bytes(&self) -> Vec<u8> {
        match self.indices_u16() {
            Some(narrow) => bytemuck::cast_slice(&narrow).to_vec(),
            None => bytemuck::cast_slice(&self.indices).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MeshWelder;
    use crate::channels::{TangentArity, VertexChannels};
    use crate::math::{Vec2, Vec3, Vec4};
    use crate::vertex::{BoneIndices, CornerAttributes, Tangent};

    /// One triangle with every channel family populated.
    fn full_channel_mesh() -> IndexedMesh {
        let channels = VertexChannels::position_normal()
            .with_tangent(TangentArity::Xyzw)
            .with_uv_channels(2)
            .with_color()
            .with_influence_groups(1);
        let mut welder = MeshWelder::new(3, channels);
        for slot in 0..3u32 {
            let x = slot as f32;
            let attrs = CornerAttributes::new(Vec3::new(x, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0))
                .with_tangent(Tangent::Xyzw(Vec4::new(1.0, 0.0, 0.0, 1.0)))
                .with_uv(0, Vec2::new(x, 0.0))
                .with_uv(1, Vec2::new(0.0, x))
                .with_color(Vec4::new(x, x, x, 1.0))
                .with_influences(0, BoneIndices::new([slot as u16, 0, 0, 0]), Vec4::new(1.0, 0.0, 0.0, 0.0));
            welder.add_corner(slot, attrs).unwrap();
        }
        welder.finish()
    }

    #[test]
    fn test_array_lengths() {
        let mesh = full_channel_mesh();
        let flat = FlatMesh::from_indexed(&mesh);
        let n = flat.vertex_count() as usize;
        assert_eq!(n, 3);
        assert_eq!(flat.positions().len(), n * 3);
        assert_eq!(flat.normals().len(), n * 3);
        assert_eq!(flat.tangents().unwrap().len(), n * 4);
        assert_eq!(flat.uv(0).unwrap().len(), n * 2);
        assert_eq!(flat.uv(1).unwrap().len(), n * 2);
        assert_eq!(flat.uv(2), None);
        assert_eq!(flat.colors().unwrap().len(), n * 4);
        assert_eq!(flat.bone_indices(0).unwrap().len(), n * 4);
        assert_eq!(flat.weights(0).unwrap().len(), n * 4);
        assert_eq!(flat.bone_indices(1), None);
    }

    #[test]
    fn test_absent_channels_are_none() {
        let mut welder = MeshWelder::new(1, VertexChannels::position_normal());
        welder
            .add_corner(
                0,
                CornerAttributes::new(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0)),
            )
            .unwrap();
        let flat = FlatMesh::from_indexed(&welder.finish());
        assert_eq!(flat.tangents(), None);
        assert_eq!(flat.uv(0), None);
        assert_eq!(flat.colors(), None);
        assert_eq!(flat.bone_indices(0), None);
        assert_eq!(flat.weights(0), None);
    }

    #[test]
    fn test_final_index_order() {
        let mesh = full_channel_mesh();
        let flat = FlatMesh::from_indexed(&mesh);
        // Positions were (0,0,0), (1,0,0), (2,0,0) in allocation order.
        assert_eq!(flat.positions(), &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert_eq!(flat.bone_indices(0).unwrap(), &[0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = full_channel_mesh();
        let flat = FlatMesh::from_indexed(&mesh);
        assert_eq!(flat.indices().len(), 3);
        for &index in flat.indices() {
            assert!(index < flat.vertex_count());
        }
    }

    #[test]
    fn test_index_format_and_narrowing() {
        let mesh = full_channel_mesh();
        let flat = FlatMesh::from_indexed(&mesh);
        assert_eq!(flat.index_format(), IndexFormat::Uint16);
        let narrow = flat.indices_u16().unwrap();
        assert_eq!(narrow, vec![0u16, 1, 2]);
        assert_eq!(flat.index_bytes().len(), 3 * IndexFormat::Uint16.size());
    }

    #[test]
    fn test_byte_views() {
        let mesh = full_channel_mesh();
        let flat = FlatMesh::from_indexed(&mesh);
        assert_eq!(flat.position_bytes().len(), flat.positions().len() * 4);
        assert_eq!(flat.normal_bytes().len(), flat.normals().len() * 4);
    }

    #[test]
    fn test_index_format_size() {
        assert_eq!(IndexFormat::Uint16.size(), 2);
        assert_eq!(IndexFormat::Uint32.size(), 4);
    }
}
