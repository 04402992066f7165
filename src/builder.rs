//! Corner-stream welding and index buffer construction.
//!
//! [`MeshWelder`] consumes face corners three per triangle. Each corner
//! either reuses an already-allocated [`VertexRecord`] that matches it, or
//! allocates a new one; the final indices returned in call order form the
//! triangle index buffer. [`MeshWelder::finish`] hands both arrays to the
//! caller as an [`IndexedMesh`].
//!
//! Merging is scoped per source vertex slot: a corner is only ever compared
//! against records allocated for the same original vertex. Most original
//! vertices split into at most a handful of shaded corners, so the welder
//! keeps one small candidate list per slot and the typical cost per corner
//! stays near O(1) even at tens of thousands of corners.

use crate::channels::VertexChannels;
use crate::error::WeldError;
use crate::vertex::{CornerAttributes, VertexRecord};

/// Welds a stream of face corners into unique vertices plus an index buffer.
///
/// One welder instance handles one mesh: create it with the source mesh's
/// vertex count and channel shape, feed every corner through
/// [`add_corner`](Self::add_corner), then call [`finish`](Self::finish).
/// `finish` consumes the welder, so no corner can be added afterwards.
pub struct MeshWelder {
    channels: VertexChannels,
    records: Vec<VertexRecord>,
    indices: Vec<u32>,
    /// Final indices of the records allocated for each source vertex slot.
    slot_records: Vec<Vec<u32>>,
}

impl MeshWelder {
    /// Create a welder for a mesh with `source_vertex_count` original
    /// vertices whose corners all carry the channels in `channels`.
    pub fn new(source_vertex_count: u32, channels: VertexChannels) -> Self {
        Self {
            channels,
            records: Vec::new(),
            indices: Vec::new(),
            slot_records: vec![Vec::new(); source_vertex_count as usize],
        }
    }

    /// The channel shape every corner must match.
    pub fn channels(&self) -> VertexChannels {
        self.channels
    }

    /// Number of unique vertices allocated so far.
    pub fn vertex_count(&self) -> u32 {
        self.records.len() as u32
    }

    /// Number of corners consumed so far.
    pub fn corner_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Feed one corner and get the final index of its unique vertex.
    ///
    /// If a record already allocated for `original_index` matches the
    /// attributes under the welding tolerance, its index is reused;
    /// otherwise a new record is allocated at the end of the unique-vertex
    /// array. Either way the returned index is also appended to the index
    /// buffer, so the return sequence read in call order is exactly the
    /// triangle index buffer.
    ///
    /// # Errors
    ///
    /// [`WeldError::OriginalIndexOutOfRange`] if `original_index` is not a
    /// valid source vertex slot, [`WeldError::ChannelMismatch`] if the
    /// attribute bundle's shape differs from the mesh's declared channels.
    pub fn add_corner(
        &mut self,
        original_index: u32,
        attributes: CornerAttributes,
    ) -> Result<u32, WeldError> {
        let Some(candidates) = self.slot_records.get(original_index as usize) else {
            return Err(WeldError::OriginalIndexOutOfRange {
                original_index,
                source_vertex_count: self.slot_records.len() as u32,
            });
        };
        if attributes.channels() != Some(self.channels) {
            return Err(WeldError::ChannelMismatch { original_index });
        }

        for &final_index in candidates {
            let record = &self.records[final_index as usize];
            if record.matches(original_index, &attributes) {
                self.indices.push(final_index);
                return Ok(final_index);
            }
        }

        let final_index = self.records.len() as u32;
        self.records
            .push(VertexRecord::new(original_index, final_index, attributes));
        self.slot_records[original_index as usize].push(final_index);
        self.indices.push(final_index);
        Ok(final_index)
    }

    /// Finish the mesh, transferring the unique-vertex and index arrays to
    /// the caller. Consumes the welder.
    pub fn finish(self) -> IndexedMesh {
        log::debug!(
            "welded {} corners into {} unique vertices",
            self.indices.len(),
            self.records.len()
        );
        IndexedMesh {
            vertices: self.records,
            indices: self.indices,
            channels: self.channels,
        }
    }
}

/// A finished indexed mesh: unique vertices in first-occurrence order plus
/// the triangle index buffer, three indices per input triangle.
#[derive(Debug, Clone)]
pub struct IndexedMesh {
    vertices: Vec<VertexRecord>,
    indices: Vec<u32>,
    channels: VertexChannels,
}

impl IndexedMesh {
    /// The unique vertices, ordered by `final_index`.
    pub fn vertices(&self) -> &[VertexRecord] {
        &self.vertices
    }

    /// The triangle index buffer.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The channel shape of every vertex.
    pub fn channels(&self) -> VertexChannels {
        self.channels
    }

    /// Number of unique vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Number of indices (three per triangle).
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> u32 {
        self.indices.len() as u32 / 3
    }
}
