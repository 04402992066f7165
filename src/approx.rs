//! Approximate equality for vertex attribute comparisons.
//!
//! Authoring tools emit per-corner attribute values that differ by tiny
//! floating-point noise even when they describe the same vertex. Welding
//! therefore compares float attributes component-wise against a single
//! process-wide tolerance, [`EPSILON`]. Integer attributes (bone indices)
//! never go through this module; they compare exactly.

use crate::math::{Vec2, Vec3, Vec4};

/// Maximum per-component difference under which two float attribute values
/// are considered equal. Shared by every attribute comparison; the boundary
/// is inclusive (a difference of exactly `EPSILON` is equal).
pub const EPSILON: f32 = 1e-5;

/// Component-wise equality within [`EPSILON`].
pub trait ApproxEq {
    /// Returns true if every component of `self` is within [`EPSILON`]
    /// of the matching component of `other`.
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f32 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() <= EPSILON
    }
}

impl ApproxEq for Vec2 {
    fn approx_eq(&self, other: &Self) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| (a - b).abs() <= EPSILON)
    }
}

impl ApproxEq for Vec3 {
    fn approx_eq(&self, other: &Self) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| (a - b).abs() <= EPSILON)
    }
}

impl ApproxEq for Vec4 {
    fn approx_eq(&self, other: &Self) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| (a - b).abs() <= EPSILON)
    }
}

impl ApproxEq for [f32; 4] {
    fn approx_eq(&self, other: &Self) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| (a - b).abs() <= EPSILON)
    }
}

/// Compare two optional attribute values.
///
/// Absent on both sides is vacuously equal. Present on one side only is a
/// caller-contract violation (channel presence must be uniform across one
/// mesh): debug builds assert, release builds report unequal rather than
/// silently merging distinct vertices.
pub(crate) fn option_approx_eq<T: ApproxEq>(a: &Option<T>, b: &Option<T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.approx_eq(b),
        _ => {
            debug_assert!(
                false,
                "attribute present on one comparand only; channel presence must be uniform per mesh"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_within_epsilon() {
        assert!(1.0f32.approx_eq(&(1.0 + EPSILON * 0.5)));
        assert!(0.0f32.approx_eq(&0.0));
    }

    #[test]
    fn test_scalar_boundary_inclusive() {
        // A difference of exactly EPSILON still merges.
        assert!(0.0f32.approx_eq(&EPSILON));
        assert!(!0.0f32.approx_eq(&(EPSILON + EPSILON * 0.1)));
    }

    #[test]
    fn test_vec3_componentwise() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(1.0, 2.0 + EPSILON * 0.9, 3.0);
        let c = Vec3::new(1.0, 2.0 + EPSILON * 2.0, 3.0);
        assert!(a.approx_eq(&b));
        assert!(!a.approx_eq(&c));
    }

    #[test]
    fn test_vec2_and_vec4() {
        assert!(Vec2::new(0.5, 0.5).approx_eq(&Vec2::new(0.5, 0.5)));
        let w1 = Vec4::new(0.7, 0.3, 0.0, 0.0);
        let w2 = Vec4::new(0.7, 0.3, 0.0, EPSILON * 3.0);
        assert!(!w1.approx_eq(&w2));
    }

    #[test]
    fn test_float4_array() {
        let a = [0.1f32, 0.2, 0.3, 1.0];
        let b = [0.1f32, 0.2, 0.3, 1.0];
        assert!(a.approx_eq(&b));
    }

    #[test]
    fn test_option_both_absent() {
        assert!(option_approx_eq::<f32>(&None, &None));
    }

    #[test]
    fn test_option_both_present() {
        assert!(option_approx_eq(&Some(1.0f32), &Some(1.0)));
        assert!(!option_approx_eq(&Some(1.0f32), &Some(2.0)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "uniform per mesh")]
    fn test_option_mixed_presence_asserts() {
        option_approx_eq(&Some(1.0f32), &None);
    }
}
