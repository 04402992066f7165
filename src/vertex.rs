//! Per-corner attribute bundles and the records the welder allocates.
//!
//! A [`CornerAttributes`] value is everything one triangle corner carries:
//! required position and normal, plus whichever optional channels the mesh
//! declares. A [`VertexRecord`] is one unique output vertex: an attribute
//! bundle bound to the source vertex slot it came from and the final index
//! it was allocated. Records are immutable once built and owned by the
//! welder until the finished mesh is handed to the caller.

use crate::approx::{option_approx_eq, ApproxEq};
use crate::channels::{TangentArity, VertexChannels, MAX_INFLUENCE_GROUPS, UV_CHANNEL_COUNT};
use crate::math::{Vec2, Vec3, Vec4};

/// A tangent vector, three or four components depending on whether the
/// source tool exports handedness in `w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tangent {
    /// Direction only.
    Xyz(Vec3),
    /// Direction plus handedness in `w`.
    Xyzw(Vec4),
}

impl Tangent {
    /// Component count of this tangent.
    pub fn arity(&self) -> TangentArity {
        match self {
            Self::Xyz(_) => TangentArity::Xyz,
            Self::Xyzw(_) => TangentArity::Xyzw,
        }
    }
}

impl ApproxEq for Tangent {
    fn approx_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Xyz(a), Self::Xyz(b)) => a.approx_eq(b),
            (Self::Xyzw(a), Self::Xyzw(b)) => a.approx_eq(b),
            _ => {
                debug_assert!(false, "tangent arity must be uniform per mesh");
                false
            }
        }
    }
}

/// One group of four bone indices. Compares exactly, never by epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneIndices([u16; 4]);

impl BoneIndices {
    /// Four explicit bone indices.
    pub fn new(indices: [u16; 4]) -> Self {
        Self(indices)
    }

    /// Decode the packed form historically used for the first group:
    /// four byte-sized indices in one u32, lowest byte first.
    pub fn from_packed(packed: u32) -> Self {
        Self([
            (packed & 0xff) as u16,
            ((packed >> 8) & 0xff) as u16,
            ((packed >> 16) & 0xff) as u16,
            ((packed >> 24) & 0xff) as u16,
        ])
    }

    /// The four bone indices.
    pub fn indices(&self) -> [u16; 4] {
        self.0
    }
}

/// Exact comparison of optional bone-index groups. Mixed presence is a
/// caller error, handled like [`option_approx_eq`].
fn option_exact_eq(a: &Option<BoneIndices>, b: &Option<BoneIndices>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => {
            debug_assert!(
                false,
                "bone indices present on one comparand only; channel presence must be uniform per mesh"
            );
            false
        }
    }
}

/// The full attribute bundle of one face corner.
///
/// Built with the `with_*` methods:
///
/// ```ignore
/// let corner = CornerAttributes::new(position, normal)
///     .with_uv(0, uv)
///     .with_influences(0, BoneIndices::from_packed(packed), weights);
/// ```
#[derive(Debug, Clone)]
pub struct CornerAttributes {
    position: Vec3,
    normal: Vec3,
    tangent: Option<Tangent>,
    uv: [Option<Vec2>; UV_CHANNEL_COUNT],
    color: Option<Vec4>,
    bones: [Option<BoneIndices>; MAX_INFLUENCE_GROUPS],
    weights: [Option<Vec4>; MAX_INFLUENCE_GROUPS],
}

impl CornerAttributes {
    /// A corner with only the required attributes.
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            tangent: None,
            uv: [None; UV_CHANNEL_COUNT],
            color: None,
            bones: [None; MAX_INFLUENCE_GROUPS],
            weights: [None; MAX_INFLUENCE_GROUPS],
        }
    }

    /// Set the tangent.
    pub fn with_tangent(mut self, tangent: Tangent) -> Self {
        self.tangent = Some(tangent);
        self
    }

    /// Set UV set `set` (0..8). Out-of-range sets are ignored.
    pub fn with_uv(mut self, set: usize, uv: Vec2) -> Self {
        if set < UV_CHANNEL_COUNT {
            self.uv[set] = Some(uv);
        }
        self
    }

    /// Set the vertex color (RGBA).
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = Some(color);
        self
    }

    /// Set influence group `group` (0..4): four bone indices plus the
    /// matching weight vector. Out-of-range groups are ignored.
    pub fn with_influences(mut self, group: usize, bones: BoneIndices, weights: Vec4) -> Self {
        if group < MAX_INFLUENCE_GROUPS {
            self.bones[group] = Some(bones);
            self.weights[group] = Some(weights);
        }
        self
    }

    /// Position (always present).
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Normal (always present).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Tangent, if present.
    pub fn tangent(&self) -> Option<Tangent> {
        self.tangent
    }

    /// UV set `set`, if present.
    pub fn uv(&self, set: usize) -> Option<Vec2> {
        self.uv.get(set).copied().flatten()
    }

    /// Vertex color, if present.
    pub fn color(&self) -> Option<Vec4> {
        self.color
    }

    /// Bone indices of influence group `group`, if present.
    pub fn bone_indices(&self, group: usize) -> Option<BoneIndices> {
        self.bones.get(group).copied().flatten()
    }

    /// Weights of influence group `group`, if present.
    pub fn weights(&self, group: usize) -> Option<Vec4> {
        self.weights.get(group).copied().flatten()
    }

    /// Derive the channel shape of this bundle.
    ///
    /// Returns `None` for internally inconsistent bundles: an influence
    /// group with bone indices but no weights (or vice versa), or groups
    /// that are not a leading run (group 2 present without group 1).
    pub fn channels(&self) -> Option<VertexChannels> {
        let mut channels = VertexChannels::position_normal();
        if let Some(tangent) = self.tangent {
            channels = channels.with_tangent(tangent.arity());
        }
        for set in 0..UV_CHANNEL_COUNT {
            if self.uv[set].is_some() {
                channels = channels.with_uv_channel(set);
            }
        }
        if self.color.is_some() {
            channels = channels.with_color();
        }

        let mut groups = 0;
        for group in 0..MAX_INFLUENCE_GROUPS {
            match (&self.bones[group], &self.weights[group]) {
                (Some(_), Some(_)) => {
                    if group != groups {
                        return None; // gap in influence groups
                    }
                    groups += 1;
                }
                (None, None) => {}
                _ => return None, // bones without weights or weights without bones
            }
        }
        Some(channels.with_influence_groups(groups))
    }

    /// Whether another bundle describes the same vertex: every present
    /// attribute equal within [`crate::approx::EPSILON`], bone indices
    /// exactly. Both bundles must have the same channel shape.
    pub fn approx_eq(&self, other: &Self) -> bool {
        if !self.position.approx_eq(&other.position) {
            return false;
        }
        if !self.normal.approx_eq(&other.normal) {
            return false;
        }
        if !option_approx_eq(&self.tangent, &other.tangent) {
            return false;
        }
        for set in 0..UV_CHANNEL_COUNT {
            if !option_approx_eq(&self.uv[set], &other.uv[set]) {
                return false;
            }
        }
        if !option_approx_eq(&self.color, &other.color) {
            return false;
        }
        for group in 0..MAX_INFLUENCE_GROUPS {
            if !option_exact_eq(&self.bones[group], &other.bones[group]) {
                return false;
            }
            if !option_approx_eq(&self.weights[group], &other.weights[group]) {
                return false;
            }
        }
        true
    }
}

/// One unique output vertex: an attribute bundle bound to its source vertex
/// slot and the final index assigned at allocation. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct VertexRecord {
    original_index: u32,
    final_index: u32,
    attributes: CornerAttributes,
}

impl VertexRecord {
    pub(crate) fn new(original_index: u32, final_index: u32, attributes: CornerAttributes) -> Self {
        Self {
            original_index,
            final_index,
            attributes,
        }
    }

    /// Index of the source mesh vertex this record attaches to.
    pub fn original_index(&self) -> u32 {
        self.original_index
    }

    /// Position of this record in the emitted unique-vertex array.
    pub fn final_index(&self) -> u32 {
        self.final_index
    }

    /// The record's attribute bundle.
    pub fn attributes(&self) -> &CornerAttributes {
        &self.attributes
    }

    /// Whether a corner can reuse this record: same source vertex slot and
    /// an attribute bundle equal under the welding tolerance. The final
    /// index never participates in identity.
    pub fn matches(&self, original_index: u32, attributes: &CornerAttributes) -> bool {
        self.original_index == original_index && self.attributes.approx_eq(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx::EPSILON;

    fn base_corner() -> CornerAttributes {
        CornerAttributes::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn test_packed_bone_indices() {
        let bones = BoneIndices::from_packed(0x0403_0201);
        assert_eq!(bones.indices(), [1, 2, 3, 4]);
        assert_eq!(bones, BoneIndices::new([1, 2, 3, 4]));
    }

    #[test]
    fn test_bone_indices_compare_exactly() {
        assert_ne!(BoneIndices::new([0, 1, 2, 3]), BoneIndices::new([0, 1, 2, 4]));
    }

    #[test]
    fn test_channels_derivation() {
        let corner = base_corner()
            .with_tangent(Tangent::Xyzw(Vec4::new(1.0, 0.0, 0.0, 1.0)))
            .with_uv(0, Vec2::new(0.5, 0.5))
            .with_color(Vec4::new(1.0, 1.0, 1.0, 1.0))
            .with_influences(0, BoneIndices::new([0, 0, 0, 0]), Vec4::new(1.0, 0.0, 0.0, 0.0));

        let channels = corner.channels().unwrap();
        assert_eq!(channels.tangent(), Some(TangentArity::Xyzw));
        assert!(channels.has_uv_channel(0));
        assert!(!channels.has_uv_channel(1));
        assert!(channels.has_color());
        assert_eq!(channels.influence_groups(), 1);
    }

    #[test]
    fn test_channels_reject_influence_gap() {
        let corner = base_corner().with_influences(
            1,
            BoneIndices::new([0, 0, 0, 0]),
            Vec4::new(1.0, 0.0, 0.0, 0.0),
        );
        assert_eq!(corner.channels(), None);
    }

    #[test]
    fn test_approx_eq_within_epsilon() {
        let a = base_corner().with_uv(0, Vec2::new(0.25, 0.75));
        let b = CornerAttributes::new(
            Vec3::new(1.0, 2.0 + EPSILON * 0.5, 3.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_uv(0, Vec2::new(0.25, 0.75));
        assert!(a.approx_eq(&b));
    }

    #[test]
    fn test_approx_eq_normal_split() {
        let a = base_corner();
        let b = CornerAttributes::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(!a.approx_eq(&b));
    }

    #[test]
    fn test_approx_eq_bone_indices_exact() {
        let weights = Vec4::new(0.6, 0.4, 0.0, 0.0);
        let a = base_corner().with_influences(0, BoneIndices::new([1, 2, 0, 0]), weights);
        let b = base_corner().with_influences(0, BoneIndices::new([1, 3, 0, 0]), weights);
        assert!(!a.approx_eq(&b));
    }

    #[test]
    fn test_record_matches_scopes_by_slot() {
        let record = VertexRecord::new(5, 0, base_corner());
        assert!(record.matches(5, &base_corner()));
        assert!(!record.matches(6, &base_corner()));
    }

    #[test]
    fn test_tangent_arity() {
        assert_eq!(Tangent::Xyz(Vec3::zeros()).arity(), TangentArity::Xyz);
        assert_eq!(Tangent::Xyzw(Vec4::zeros()).arity(), TangentArity::Xyzw);
    }
}
