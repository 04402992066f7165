//! Mesh-wide attribute channel description.
//!
//! Which optional channels a mesh carries (tangents, UV sets, color,
//! skinning groups) is fixed for all corners of that mesh and supplied by
//! the caller up front. [`VertexChannels`] is the type-checked form of that
//! contract: the welder validates every corner's attribute bundle against
//! it, so "absent" stays unambiguous and never collides with "zero-valued".
//!
//! Position and normal are always present and have no flag here.

/// Number of independently optional UV channels.
pub const UV_CHANNEL_COUNT: usize = 8;

/// Maximum number of skinning influence groups (bone indices + weights).
pub const MAX_INFLUENCE_GROUPS: usize = 4;

/// Component count of a mesh's tangent channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TangentArity {
    /// Three components (direction only).
    Xyz,
    /// Four components (w = handedness).
    Xyzw,
}

impl TangentArity {
    /// Number of float components per tangent.
    pub fn component_count(&self) -> usize {
        match self {
            Self::Xyz => 3,
            Self::Xyzw => 4,
        }
    }
}

/// The set of optional attribute channels present on every corner of a mesh.
///
/// Built with the `with_*` methods:
///
/// ```ignore
/// let channels = VertexChannels::position_normal()
///     .with_tangent(TangentArity::Xyzw)
///     .with_uv_channels(2)
///     .with_influence_groups(1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexChannels {
    tangent: Option<TangentArity>,
    uv_mask: u8,
    color: bool,
    influence_groups: u8,
}

impl VertexChannels {
    /// Channel set with only the required attributes (position + normal).
    pub fn position_normal() -> Self {
        Self::default()
    }

    /// Add a tangent channel with the given arity.
    pub fn with_tangent(mut self, arity: TangentArity) -> Self {
        self.tangent = Some(arity);
        self
    }

    /// Add one UV channel by set index (0..8).
    pub fn with_uv_channel(mut self, set: usize) -> Self {
        if set < UV_CHANNEL_COUNT {
            self.uv_mask |= 1 << set;
        }
        self
    }

    /// Add the first `count` UV channels.
    pub fn with_uv_channels(mut self, count: usize) -> Self {
        for set in 0..count.min(UV_CHANNEL_COUNT) {
            self.uv_mask |= 1 << set;
        }
        self
    }

    /// Add a vertex color channel (RGBA).
    pub fn with_color(mut self) -> Self {
        self.color = true;
        self
    }

    /// Add skinning data: `count` groups of bone indices plus weights (0..=4).
    pub fn with_influence_groups(mut self, count: usize) -> Self {
        self.influence_groups = count.min(MAX_INFLUENCE_GROUPS) as u8;
        self
    }

    /// Tangent channel arity, if the mesh has tangents.
    pub fn tangent(&self) -> Option<TangentArity> {
        self.tangent
    }

    /// Whether UV set `set` is present.
    pub fn has_uv_channel(&self, set: usize) -> bool {
        set < UV_CHANNEL_COUNT && self.uv_mask & (1 << set) != 0
    }

    /// Whether a vertex color channel is present.
    pub fn has_color(&self) -> bool {
        self.color
    }

    /// Number of skinning influence groups.
    pub fn influence_groups(&self) -> usize {
        self.influence_groups as usize
    }

    /// Whether the mesh carries any skinning data.
    pub fn is_skinned(&self) -> bool {
        self.influence_groups > 0
    }
}
